use crate::overlay::geometry::{Point, Size};

/// Activation state of the top-level host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostWindowState {
    pub is_active: bool,
    pub is_visible: bool,
    pub is_minimized: bool,
}

impl HostWindowState {
    /// Active, visible and not minimized.
    pub fn is_presentable(&self) -> bool {
        self.is_active && self.is_visible && !self.is_minimized
    }
}

/// Bounds and visibility of the render-surface container, in global
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceState {
    pub global_top_left: Point,
    pub size: Size,
    pub is_visible: bool,
}

/// Samples the host window and the render-surface container on demand.
///
/// `None` means the resource is not constructed yet (startup ordering) and
/// callers treat it as a silent no-op. Implementations must not cache: every
/// call reflects the state at the time of the call.
pub trait WindowStateSampler {
    fn host_state(&self) -> Option<HostWindowState>;
    fn surface_state(&self) -> Option<SurfaceState>;
}

impl<T: WindowStateSampler + ?Sized> WindowStateSampler for std::rc::Rc<T> {
    fn host_state(&self) -> Option<HostWindowState> {
        (**self).host_state()
    }

    fn surface_state(&self) -> Option<SurfaceState> {
        (**self).surface_state()
    }
}
