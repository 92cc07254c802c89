#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayLifecycle {
    #[default]
    Uninitialized,
    PendingFirstLayout,
    Ready,
}

impl OverlayLifecycle {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Lifecycle only moves forward; staying put is always allowed.
pub fn can_transition(from: OverlayLifecycle, to: OverlayLifecycle) -> bool {
    matches!(
        (from, to),
        (
            OverlayLifecycle::Uninitialized,
            OverlayLifecycle::PendingFirstLayout
        ) | (OverlayLifecycle::PendingFirstLayout, OverlayLifecycle::Ready)
    ) || from == to
}
