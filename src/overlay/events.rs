use crate::settings::TimingSettings;
use std::time::Duration;

/// Object whose notification is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    HostWindow,
    SurfaceContainer,
}

/// Raw notification kinds delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    Activate,
    Deactivate,
    Show,
    Hide,
    Resize,
    Move,
    StateChange,
}

/// Normalized notification the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    Activate,
    Deactivate,
    Show,
    Hide,
    Resize,
    Move,
    StateChange,
    SurfaceResize,
    SurfaceShow,
}

impl OverlayEvent {
    /// Normalize a (source, kind) pair. Container notifications other than
    /// resize and show carry no meaning for the overlay.
    pub fn from_parts(source: EventSource, kind: WindowEventKind) -> Option<Self> {
        match (source, kind) {
            (EventSource::HostWindow, WindowEventKind::Activate) => Some(Self::Activate),
            (EventSource::HostWindow, WindowEventKind::Deactivate) => Some(Self::Deactivate),
            (EventSource::HostWindow, WindowEventKind::Show) => Some(Self::Show),
            (EventSource::HostWindow, WindowEventKind::Hide) => Some(Self::Hide),
            (EventSource::HostWindow, WindowEventKind::Resize) => Some(Self::Resize),
            (EventSource::HostWindow, WindowEventKind::Move) => Some(Self::Move),
            (EventSource::HostWindow, WindowEventKind::StateChange) => Some(Self::StateChange),
            (EventSource::SurfaceContainer, WindowEventKind::Resize) => Some(Self::SurfaceResize),
            (EventSource::SurfaceContainer, WindowEventKind::Show) => Some(Self::SurfaceShow),
            (EventSource::SurfaceContainer, _) => None,
        }
    }

    pub fn source(self) -> EventSource {
        match self {
            Self::SurfaceResize | Self::SurfaceShow => EventSource::SurfaceContainer,
            _ => EventSource::HostWindow,
        }
    }

    /// Events that arrive before the overlay is ready and would be replaced by
    /// the first-layout recomputes anyway.
    pub fn superseded_by_first_layout(self) -> bool {
        matches!(self, Self::Resize | Self::Move | Self::StateChange)
    }
}

/// What to do synchronously, before the deferred recompute fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateAction {
    None,
    Hide,
    /// Hide when the host is minimized or invisible.
    HideIfHostDown,
    /// Hide when the surface is too small to carry the overlay.
    HideIfSurfaceDegenerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub immediate: ImmediateAction,
    pub delay: Duration,
}

pub fn reaction_for(event: OverlayEvent, timing: &TimingSettings) -> Reaction {
    let (immediate, delay_ms) = match event {
        OverlayEvent::Activate => (ImmediateAction::None, timing.activate_delay_ms),
        OverlayEvent::Deactivate => (ImmediateAction::Hide, timing.deactivate_delay_ms),
        OverlayEvent::Show => (ImmediateAction::None, timing.show_delay_ms),
        OverlayEvent::Hide => (ImmediateAction::Hide, timing.hide_delay_ms),
        OverlayEvent::Resize | OverlayEvent::Move => {
            (ImmediateAction::None, timing.geometry_delay_ms)
        }
        OverlayEvent::StateChange => (
            ImmediateAction::HideIfHostDown,
            timing.state_change_delay_ms,
        ),
        OverlayEvent::SurfaceResize | OverlayEvent::SurfaceShow => (
            ImmediateAction::HideIfSurfaceDegenerate,
            timing.surface_delay_ms,
        ),
    };
    Reaction {
        immediate,
        delay: Duration::from_millis(delay_ms),
    }
}
