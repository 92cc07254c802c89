#![allow(dead_code)]

use overlay_sync::overlay::{
    ActionHandler, ButtonCallback, ButtonHandle, ManualScheduler, OverlayAction, OverlayController,
    OverlayProperties, OverlayRect, OverlayWindow, Point, Size,
};
use overlay_sync::settings::OverlaySettings;
use overlay_sync::window_manager::{HostWindowState, SurfaceState, WindowStateSampler};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOp {
    Configure,
    Geometry(OverlayRect),
    Show,
    Hide,
    CreateButton(OverlayAction),
}

pub struct MockButton {
    pub label: String,
    pub size: Size,
    pub position: Point,
    pub action: OverlayAction,
    pub on_click: ButtonCallback,
}

/// Overlay that records every call made on it.
#[derive(Default)]
pub struct MockOverlay {
    pub properties: Option<OverlayProperties>,
    pub visible: bool,
    pub rect: Option<OverlayRect>,
    pub buttons: Vec<MockButton>,
    pub ops: Vec<OverlayOp>,
}

impl MockOverlay {
    pub fn count(&self, op: OverlayOp) -> usize {
        self.ops.iter().filter(|o| **o == op).count()
    }

    pub fn button_positions(&self) -> Vec<Point> {
        self.buttons.iter().map(|b| b.position).collect()
    }

    pub fn callback(&self, index: usize) -> ButtonCallback {
        self.buttons[index].on_click.clone()
    }

    /// Simulate a button that was placed in the overlay by someone else and
    /// already wired to `action`.
    pub fn with_prebuilt(actions: &[(OverlayAction, ButtonCallback)]) -> Self {
        let mut overlay = Self::default();
        for (action, on_click) in actions {
            overlay.buttons.push(MockButton {
                label: format!("{action:?}"),
                size: Size::new(120, 40),
                position: Point::default(),
                action: *action,
                on_click: on_click.clone(),
            });
        }
        overlay
    }
}

impl OverlayWindow for MockOverlay {
    fn configure(&mut self, properties: &OverlayProperties) {
        self.properties = Some(*properties);
        self.ops.push(OverlayOp::Configure);
    }

    fn set_geometry(&mut self, rect: OverlayRect) {
        self.rect = Some(rect);
        self.ops.push(OverlayOp::Geometry(rect));
    }

    fn show(&mut self) {
        self.visible = true;
        self.ops.push(OverlayOp::Show);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.ops.push(OverlayOp::Hide);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn action_buttons(&self) -> Vec<(ButtonHandle, OverlayAction)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, b)| (ButtonHandle(i), b.action))
            .collect()
    }

    fn create_button(
        &mut self,
        label: &str,
        size: Size,
        action: OverlayAction,
        on_click: ButtonCallback,
    ) -> ButtonHandle {
        self.buttons.push(MockButton {
            label: label.to_string(),
            size,
            position: Point::default(),
            action,
            on_click,
        });
        self.ops.push(OverlayOp::CreateButton(action));
        ButtonHandle(self.buttons.len() - 1)
    }

    fn move_button(&mut self, button: ButtonHandle, position: Point) {
        if let Some(b) = self.buttons.get_mut(button.0) {
            b.position = position;
        }
    }
}

/// Sampler whose answers the test sets directly.
#[derive(Clone, Default)]
pub struct MockSampler {
    state: Rc<RefCell<(Option<HostWindowState>, Option<SurfaceState>)>>,
}

impl MockSampler {
    pub fn set_host(&self, host: HostWindowState) {
        self.state.borrow_mut().0 = Some(host);
    }

    pub fn set_surface(&self, surface: SurfaceState) {
        self.state.borrow_mut().1 = Some(surface);
    }

    pub fn clear_surface(&self) {
        self.state.borrow_mut().1 = None;
    }

    pub fn update_host(&self, f: impl FnOnce(&mut HostWindowState)) {
        let mut state = self.state.borrow_mut();
        let mut host = state.0.unwrap_or_default();
        f(&mut host);
        state.0 = Some(host);
    }
}

impl WindowStateSampler for MockSampler {
    fn host_state(&self) -> Option<HostWindowState> {
        self.state.borrow().0
    }

    fn surface_state(&self) -> Option<SurfaceState> {
        self.state.borrow().1
    }
}

/// Records which collaborator calls the overlay buttons made.
#[derive(Default)]
pub struct RecordingActions {
    pub calls: RefCell<Vec<String>>,
}

impl ActionHandler for RecordingActions {
    fn capture_screenshot(&self) {
        self.calls.borrow_mut().push("screenshot".into());
    }

    fn set_all_visible(&self, visible: bool) {
        self.calls.borrow_mut().push(format!("visible:{visible}"));
    }

    fn toggle_grid(&self) {
        self.calls.borrow_mut().push("grid".into());
    }
}

pub type TestController = OverlayController<MockOverlay, MockSampler, ManualScheduler>;

pub struct Harness {
    pub controller: Rc<TestController>,
    pub scheduler: Rc<ManualScheduler>,
    pub sampler: MockSampler,
    pub actions: Rc<RecordingActions>,
}

pub fn active_host() -> HostWindowState {
    HostWindowState {
        is_active: true,
        is_visible: true,
        is_minimized: false,
    }
}

pub fn surface(x: i32, y: i32, width: i32, height: i32) -> SurfaceState {
    SurfaceState {
        global_top_left: Point::new(x, y),
        size: Size::new(width, height),
        is_visible: true,
    }
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

pub fn harness_with(overlay: Option<MockOverlay>) -> Harness {
    let scheduler = Rc::new(ManualScheduler::new());
    let sampler = MockSampler::default();
    let actions = Rc::new(RecordingActions::default());
    let controller = OverlayController::new(
        overlay,
        sampler.clone(),
        scheduler.clone(),
        actions.clone(),
        OverlaySettings::default(),
    );
    Harness {
        controller,
        scheduler,
        sampler,
        actions,
    }
}

pub fn harness() -> Harness {
    harness_with(Some(MockOverlay::default()))
}

/// Harness with an active host, an 800x600 surface at (100, 50) and the
/// first-layout recomputes already settled.
pub fn ready_harness() -> Harness {
    let h = harness();
    h.sampler.set_host(active_host());
    h.sampler.set_surface(surface(100, 50, 800, 600));
    h.controller.initialize();
    h.scheduler.run_until_idle();
    h
}
