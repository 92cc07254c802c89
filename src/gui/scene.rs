use crate::overlay::buttons::ActionHandler;
use eframe::egui;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Plane,
}

impl PrimitiveKind {
    pub fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Plane => "Plane",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub id: u32,
    pub kind: PrimitiveKind,
    pub name: String,
    pub visible: bool,
}

/// Stand-in for the renderer and outliner the overlay buttons drive.
#[derive(Debug, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub show_grid: bool,
    pub screenshot_requested: bool,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            show_grid: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, kind: PrimitiveKind) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let count = self.primitives.iter().filter(|p| p.kind == kind).count();
        self.primitives.push(Primitive {
            id,
            kind,
            name: format!("{} {}", kind.label(), count + 1),
            visible: true,
        });
        id
    }

    pub fn remove(&mut self, id: u32) {
        self.primitives.retain(|p| p.id != id);
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for primitive in &mut self.primitives {
            primitive.visible = visible;
        }
    }

    /// Paint visible primitives and the optional grid into `rect`.
    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(24, 26, 30));
        if self.show_grid {
            let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(55));
            let step = 40.0;
            let mut x = rect.left();
            while x <= rect.right() {
                painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
                x += step;
            }
            let mut y = rect.top();
            while y <= rect.bottom() {
                painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
                y += step;
            }
        }

        let visible: Vec<&Primitive> = self.primitives.iter().filter(|p| p.visible).collect();
        let slots = visible.len().max(1) as f32;
        for (i, primitive) in visible.iter().enumerate() {
            let center = egui::pos2(
                rect.left() + rect.width() * (i as f32 + 0.5) / slots,
                rect.center().y,
            );
            let color = egui::Color32::from_rgb(0, 173, 181);
            match primitive.kind {
                PrimitiveKind::Cube => {
                    painter.rect_filled(
                        egui::Rect::from_center_size(center, egui::vec2(60.0, 60.0)),
                        2.0,
                        color,
                    );
                }
                PrimitiveKind::Sphere => {
                    painter.circle_filled(center, 32.0, color);
                }
                PrimitiveKind::Plane => {
                    painter.rect_filled(
                        egui::Rect::from_center_size(center, egui::vec2(90.0, 12.0)),
                        0.0,
                        color,
                    );
                }
            }
        }
    }
}

/// Routes overlay button actions into the shared scene.
#[derive(Clone)]
pub struct SceneActions {
    scene: Rc<RefCell<Scene>>,
}

impl SceneActions {
    pub fn new(scene: Rc<RefCell<Scene>>) -> Self {
        Self { scene }
    }
}

impl ActionHandler for SceneActions {
    fn capture_screenshot(&self) {
        self.scene.borrow_mut().screenshot_requested = true;
    }

    fn set_all_visible(&self, visible: bool) {
        self.scene.borrow_mut().set_all_visible(visible);
    }

    fn toggle_grid(&self) {
        let mut scene = self.scene.borrow_mut();
        scene.show_grid = !scene.show_grid;
    }
}

/// Save a captured frame as a timestamped PNG inside `dir`.
pub fn save_screenshot(image: &egui::ColorImage, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let [width, height] = image.size;
    let pixels: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| anyhow::anyhow!("screenshot buffer does not match {width}x{height}"))?;
    let path = dir.join(format!(
        "screenshot_{}.png",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    buffer.save(&path)?;
    Ok(path)
}
