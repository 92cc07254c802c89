use crate::overlay::events::OverlayEvent;
use crate::overlay::geometry::{Point, Size};
use crate::window_manager::{HostWindowState, SurfaceState, WindowStateSampler};
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;

/// Host window and render-surface state observed during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSample {
    pub focused: bool,
    pub minimized: bool,
    pub visible: bool,
    pub outer_pos: Option<Point>,
    pub inner_size: Option<Size>,
    pub surface: Option<SurfaceState>,
}

impl FrameSample {
    pub fn host(&self) -> HostWindowState {
        HostWindowState {
            is_active: self.focused,
            is_visible: self.visible,
            is_minimized: self.minimized,
        }
    }
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x.round() as i32, pos.y.round() as i32)
}

fn to_size(size: egui::Vec2) -> Size {
    Size::new(size.x.round() as i32, size.y.round() as i32)
}

/// Read the root viewport's state. `surface_rect` is the render-surface
/// container in window-local points, `overlay_focused` whether the overlay
/// viewport currently holds focus; focus on the overlay counts as the host
/// being active so clicking a button never deactivates the panel.
pub fn sample_frame(
    ctx: &egui::Context,
    surface_rect: Option<egui::Rect>,
    overlay_focused: bool,
) -> FrameSample {
    let info = ctx.input(|i| i.viewport().clone());
    let minimized = info.minimized.unwrap_or(false);
    let visible = info
        .inner_rect
        .map_or(true, |rect| rect.width() > 0.0 && rect.height() > 0.0);
    let focused = info.focused.unwrap_or(true) || overlay_focused;

    let surface = match (info.inner_rect, surface_rect) {
        (Some(inner), Some(local)) => Some(SurfaceState {
            global_top_left: to_point(inner.min + local.min.to_vec2()),
            size: to_size(local.size()),
            is_visible: visible && !minimized && local.width() > 0.0 && local.height() > 0.0,
        }),
        _ => None,
    };

    FrameSample {
        focused,
        minimized,
        visible,
        outer_pos: info.outer_rect.map(|rect| to_point(rect.min)),
        inner_size: info.inner_rect.map(|rect| to_size(rect.size())),
        surface,
    }
}

/// Translate the difference between two consecutive samples into the
/// notifications a native toolkit would have delivered.
pub fn diff_samples(prev: Option<&FrameSample>, next: &FrameSample) -> Vec<OverlayEvent> {
    let mut events = Vec::new();
    let Some(prev) = prev else {
        if next.visible {
            events.push(OverlayEvent::Show);
        }
        if next.focused {
            events.push(OverlayEvent::Activate);
        }
        if next.surface.is_some_and(|s| s.is_visible) {
            events.push(OverlayEvent::SurfaceShow);
        }
        return events;
    };

    if prev.focused != next.focused {
        events.push(if next.focused {
            OverlayEvent::Activate
        } else {
            OverlayEvent::Deactivate
        });
    }
    if prev.visible != next.visible {
        events.push(if next.visible {
            OverlayEvent::Show
        } else {
            OverlayEvent::Hide
        });
    }
    if prev.minimized != next.minimized {
        events.push(OverlayEvent::StateChange);
    }
    if prev.outer_pos != next.outer_pos {
        events.push(OverlayEvent::Move);
    }
    if prev.inner_size != next.inner_size {
        events.push(OverlayEvent::Resize);
    }

    let was_shown = prev.surface.is_some_and(|s| s.is_visible);
    let is_shown = next.surface.is_some_and(|s| s.is_visible);
    if is_shown && !was_shown {
        events.push(OverlayEvent::SurfaceShow);
    } else if let (Some(before), Some(after)) = (prev.surface, next.surface) {
        // The container moves inside the window when side panels resize.
        if before.size != after.size || before.global_top_left != after.global_top_left {
            events.push(OverlayEvent::SurfaceResize);
        }
    }
    events
}

/// Sampler backed by the latest frame sample.
#[derive(Debug, Clone, Default)]
pub struct SharedSampler {
    sample: Rc<RefCell<Option<FrameSample>>>,
}

impl SharedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, sample: FrameSample) {
        *self.sample.borrow_mut() = Some(sample);
    }
}

impl WindowStateSampler for SharedSampler {
    fn host_state(&self) -> Option<HostWindowState> {
        self.sample.borrow().map(|sample| sample.host())
    }

    fn surface_state(&self) -> Option<SurfaceState> {
        self.sample.borrow().and_then(|sample| sample.surface)
    }
}

/// Publishes each frame's sample and reports what changed since the last one.
#[derive(Debug, Default)]
pub struct HostTracker {
    sampler: SharedSampler,
    last: Option<FrameSample>,
}

impl HostTracker {
    pub fn new(sampler: SharedSampler) -> Self {
        Self {
            sampler,
            last: None,
        }
    }

    pub fn observe(&mut self, sample: FrameSample) -> Vec<OverlayEvent> {
        self.sampler.publish(sample);
        let events = diff_samples(self.last.as_ref(), &sample);
        self.last = Some(sample);
        events
    }
}
