use crate::overlay::buttons::{ButtonCallback, ButtonHandle, OverlayAction};
use crate::overlay::geometry::{OverlayRect, Point, Size};
use crate::overlay::window::{OverlayProperties, OverlayWindow};
use eframe::egui;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(36, 39, 44, 160);
const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(57, 62, 70);

struct OverlayButton {
    label: String,
    size: Size,
    position: Point,
    action: OverlayAction,
    on_click: ButtonCallback,
}

/// Overlay rendered as a separate immediate egui viewport.
///
/// The viewport is only submitted while visible; egui closes the native
/// window on frames where it is not shown.
pub struct EguiOverlay {
    id: egui::ViewportId,
    properties: Option<OverlayProperties>,
    visible: bool,
    rect: OverlayRect,
    buttons: Vec<OverlayButton>,
    focused: bool,
}

impl Default for EguiOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiOverlay {
    pub fn new() -> Self {
        Self {
            id: egui::ViewportId::from_hash_of("overlay_sync_panel"),
            properties: None,
            visible: false,
            rect: OverlayRect::default(),
            buttons: Vec::new(),
            focused: false,
        }
    }

    pub fn viewport_id(&self) -> egui::ViewportId {
        self.id
    }

    /// Whether the overlay viewport held focus during its last frame.
    pub fn focused(&self) -> bool {
        self.visible && self.focused
    }

    pub fn rect(&self) -> OverlayRect {
        self.rect
    }

    fn builder(&self) -> egui::ViewportBuilder {
        let props = self
            .properties
            .unwrap_or_else(OverlayProperties::floating_panel);
        let mut builder = egui::ViewportBuilder::default()
            .with_title("Overlay")
            .with_decorations(!props.frameless)
            .with_transparent(props.translucent)
            .with_taskbar(!props.tool_window)
            .with_active(!props.non_activating)
            .with_min_inner_size([props.min_size.width as f32, props.min_size.height as f32])
            .with_position([self.rect.x as f32, self.rect.y as f32])
            .with_inner_size([self.rect.width.max(1) as f32, self.rect.height.max(1) as f32]);
        if props.always_on_top {
            builder = builder.with_always_on_top();
        }
        builder
    }

    /// Draw the overlay for this frame and return the callbacks of clicked
    /// buttons. Callbacks are returned rather than invoked so the caller can
    /// run them after releasing any borrow on the overlay.
    pub fn show_viewport(&mut self, ctx: &egui::Context) -> Vec<ButtonCallback> {
        if !self.visible {
            self.focused = false;
            return Vec::new();
        }

        let builder = self.builder();
        let buttons = &self.buttons;
        let (clicked, focused) = ctx.show_viewport_immediate(self.id, builder, |ctx, _class| {
            let mut clicked = Vec::new();
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(PANEL_FILL).rounding(8.0))
                .show(ctx, |ui| {
                    for button in buttons {
                        let rect = egui::Rect::from_min_size(
                            egui::pos2(button.position.x as f32, button.position.y as f32),
                            egui::vec2(button.size.width as f32, button.size.height as f32),
                        );
                        let widget = egui::Button::new(
                            egui::RichText::new(&button.label).color(egui::Color32::WHITE),
                        )
                        .fill(BUTTON_FILL)
                        .rounding(5.0);
                        if ui.put(rect, widget).clicked() {
                            tracing::trace!(action = ?button.action, "overlay button clicked");
                            clicked.push(button.on_click.clone());
                        }
                    }
                });
            if ctx.input(|i| i.viewport().close_requested()) {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
            let focused = ctx.input(|i| i.viewport().focused.unwrap_or(false));
            (clicked, focused)
        });
        self.focused = focused;
        clicked
    }
}

impl OverlayWindow for EguiOverlay {
    fn configure(&mut self, properties: &OverlayProperties) {
        self.properties = Some(*properties);
    }

    fn set_geometry(&mut self, rect: OverlayRect) {
        self.rect = rect;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn action_buttons(&self) -> Vec<(ButtonHandle, OverlayAction)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(index, button)| (ButtonHandle(index), button.action))
            .collect()
    }

    fn create_button(
        &mut self,
        label: &str,
        size: Size,
        action: OverlayAction,
        on_click: ButtonCallback,
    ) -> ButtonHandle {
        self.buttons.push(OverlayButton {
            label: label.to_string(),
            size,
            position: Point::default(),
            action,
            on_click,
        });
        ButtonHandle(self.buttons.len() - 1)
    }

    fn move_button(&mut self, button: ButtonHandle, position: Point) {
        if let Some(button) = self.buttons.get_mut(button.0) {
            button.position = position;
        }
    }
}
