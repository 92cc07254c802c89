use crate::overlay::buttons::{ButtonCallback, ButtonHandle, OverlayAction};
use crate::overlay::geometry::{OverlayRect, Point, Size};

/// Window-level properties applied to the overlay once, during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayProperties {
    pub frameless: bool,
    pub always_on_top: bool,
    /// Showing or clicking the overlay must not steal activation from the
    /// host window.
    pub non_activating: bool,
    pub translucent: bool,
    /// Hidden from the task bar, like a tool window.
    pub tool_window: bool,
    pub min_size: Size,
}

impl OverlayProperties {
    /// Borderless floating panel that can grow to any size.
    pub fn floating_panel() -> Self {
        Self {
            frameless: true,
            always_on_top: true,
            non_activating: true,
            translucent: true,
            tool_window: true,
            min_size: Size::new(1, 1),
        }
    }
}

/// Floating panel kept aligned to the render surface.
///
/// Implementations are expected to use borderless, always-on-top windows so
/// the panel can float over a foreign-owned surface.
pub trait OverlayWindow {
    fn configure(&mut self, properties: &OverlayProperties);
    fn set_geometry(&mut self, rect: OverlayRect);
    /// Show and raise above sibling windows.
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;

    /// Action buttons already living in the overlay, with the action each
    /// one is bound to.
    fn action_buttons(&self) -> Vec<(ButtonHandle, OverlayAction)>;
    fn create_button(
        &mut self,
        label: &str,
        size: Size,
        action: OverlayAction,
        on_click: ButtonCallback,
    ) -> ButtonHandle;
    /// Position is relative to the overlay's top-left corner.
    fn move_button(&mut self, button: ButtonHandle, position: Point);
}
