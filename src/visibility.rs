use crate::overlay::geometry::Size;
use crate::window_manager::{HostWindowState, SurfaceState};

/// Decide whether the overlay should be on screen for the given samples.
pub fn should_show(host: &HostWindowState, surface: &SurfaceState) -> bool {
    host.is_presentable() && surface.is_visible
}

/// A surface no larger than `min` in either dimension is too small to carry
/// the overlay; it is hidden rather than squeezed.
pub fn surface_is_usable(surface: &SurfaceState, min: Size) -> bool {
    surface.size.exceeds(min)
}

/// Full visibility decision used by the recompute path.
pub fn overlay_visible(host: &HostWindowState, surface: &SurfaceState, min: Size) -> bool {
    let visible = should_show(host, surface) && surface_is_usable(surface, min);
    tracing::trace!(?host, ?surface, visible, "overlay visibility evaluated");
    visible
}
