mod host;
mod overlay_viewport;
mod scene;

pub use host::{diff_samples, sample_frame, FrameSample, HostTracker, SharedSampler};
pub use overlay_viewport::EguiOverlay;
pub use scene::{save_screenshot, Primitive, PrimitiveKind, Scene, SceneActions};

use crate::overlay::{ActionHandler, FrameScheduler, OverlayController};
use crate::settings::OverlaySettings;
use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

pub type DemoController = OverlayController<EguiOverlay, SharedSampler, FrameScheduler>;

/// Host window with an outliner on the left and the render surface in the
/// centre; the overlay floats above the surface in its own viewport.
pub struct OverlayDemoApp {
    scene: Rc<RefCell<Scene>>,
    scheduler: Rc<FrameScheduler>,
    tracker: HostTracker,
    controller: Rc<DemoController>,
    screenshot_dir: PathBuf,
    status: Option<String>,
}

impl OverlayDemoApp {
    pub fn new(settings: OverlaySettings) -> Self {
        let scene = Rc::new(RefCell::new(Scene::new()));
        {
            let mut scene = scene.borrow_mut();
            scene.add(PrimitiveKind::Cube);
            scene.add(PrimitiveKind::Sphere);
        }

        let scheduler = Rc::new(FrameScheduler::new());
        let sampler = SharedSampler::new();
        let actions: Rc<dyn ActionHandler> = Rc::new(SceneActions::new(scene.clone()));
        let screenshot_dir = settings.screenshot_dir();
        let controller = OverlayController::new(
            Some(EguiOverlay::new()),
            sampler.clone(),
            scheduler.clone(),
            actions,
            settings,
        );
        controller.start();

        Self {
            scene,
            scheduler,
            tracker: HostTracker::new(sampler),
            controller,
            screenshot_dir,
            status: None,
        }
    }

    fn outliner(&mut self, ctx: &egui::Context) {
        let mut scene = self.scene.borrow_mut();
        let status = self.status.as_deref();
        egui::SidePanel::left("outliner")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Scene");
                ui.horizontal(|ui| {
                    for kind in [PrimitiveKind::Cube, PrimitiveKind::Sphere, PrimitiveKind::Plane] {
                        if ui.button(kind.label()).clicked() {
                            scene.add(kind);
                        }
                    }
                });
                ui.separator();

                let mut removed = None;
                for primitive in &mut scene.primitives {
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut primitive.visible, primitive.name.as_str());
                        if ui.small_button("x").clicked() {
                            removed = Some(primitive.id);
                        }
                    });
                }
                if let Some(id) = removed {
                    scene.remove(id);
                }

                ui.separator();
                ui.checkbox(&mut scene.show_grid, "Grid");
                if let Some(status) = status {
                    ui.label(status);
                }
            });
    }

    fn render_surface(&self, ctx: &egui::Context) -> egui::Rect {
        let scene = self.scene.borrow();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                scene.paint(ui.painter(), rect);
                rect
            })
            .inner
    }

    fn save_captured_frames(&mut self, ctx: &egui::Context) {
        let images: Vec<_> = ctx.input(|i| {
            i.raw
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });
        for image in images {
            match save_screenshot(&image, &self.screenshot_dir) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "screenshot saved");
                    self.status = Some(format!("Saved {}", path.display()));
                }
                Err(err) => {
                    tracing::error!("failed to save screenshot: {err}");
                    self.status = Some(format!("Screenshot failed: {err}"));
                }
            }
        }
    }
}

impl eframe::App for OverlayDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.save_captured_frames(ctx);
        if ctx.input(|i| i.viewport().close_requested()) {
            self.controller.teardown();
        }

        self.outliner(ctx);
        let surface_rect = self.render_surface(ctx);

        let overlay_focused = self
            .controller
            .with_overlay(|overlay| overlay.focused())
            .unwrap_or(false);
        let sample = sample_frame(ctx, Some(surface_rect), overlay_focused);
        for event in self.tracker.observe(sample) {
            self.controller.notify(event);
        }
        self.scheduler.run_due(Instant::now());

        let clicked = self
            .controller
            .with_overlay_mut(|overlay| overlay.show_viewport(ctx))
            .unwrap_or_default();
        for on_click in clicked {
            on_click();
        }

        if std::mem::take(&mut self.scene.borrow_mut().screenshot_requested) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
        }
        if let Some(deadline) = self.scheduler.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

impl Drop for OverlayDemoApp {
    fn drop(&mut self) {
        self.controller.teardown();
    }
}
