use crate::overlay::geometry::Size;
use crate::overlay::window::OverlayWindow;
use std::rc::Rc;

pub const BUTTON_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    Screenshot,
    ShowAll,
    HideAll,
    ToggleGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub index: usize,
    pub label: &'static str,
    pub action: OverlayAction,
}

pub const BUTTON_SPECS: [ButtonSpec; BUTTON_COUNT] = [
    ButtonSpec {
        index: 0,
        label: "Screenshot",
        action: OverlayAction::Screenshot,
    },
    ButtonSpec {
        index: 1,
        label: "Show All",
        action: OverlayAction::ShowAll,
    },
    ButtonSpec {
        index: 2,
        label: "Hide All",
        action: OverlayAction::HideAll,
    },
    ButtonSpec {
        index: 3,
        label: "Toggle Grid",
        action: OverlayAction::ToggleGrid,
    },
];

/// Overlay-owned button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonHandle(pub usize);

pub type ButtonCallback = Rc<dyn Fn()>;

/// Collaborators the overlay buttons forward to.
pub trait ActionHandler {
    fn capture_screenshot(&self);
    fn set_all_visible(&self, visible: bool);
    fn toggle_grid(&self);
}

pub fn dispatch_action(handler: &dyn ActionHandler, action: OverlayAction) {
    tracing::debug!(?action, "overlay action");
    match action {
        OverlayAction::Screenshot => handler.capture_screenshot(),
        OverlayAction::ShowAll => handler.set_all_visible(true),
        OverlayAction::HideAll => handler.set_all_visible(false),
        OverlayAction::ToggleGrid => handler.toggle_grid(),
    }
}

/// Callback factory that forwards every click to `handler`.
pub fn forward_to(handler: Rc<dyn ActionHandler>) -> impl FnMut(OverlayAction) -> ButtonCallback {
    move |action| -> ButtonCallback {
        let handler = handler.clone();
        Rc::new(move || dispatch_action(handler.as_ref(), action))
    }
}

/// Arena of at most [`BUTTON_COUNT`] handles, indexed by `ButtonSpec` position.
#[derive(Debug, Default)]
pub struct ButtonRegistry {
    slots: [Option<ButtonHandle>; BUTTON_COUNT],
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn get(&self, index: usize) -> Option<ButtonHandle> {
        self.slots.get(index).copied().flatten()
    }

    /// Constructed handles in declaration order.
    pub fn handles(&self) -> impl Iterator<Item = ButtonHandle> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Make sure every `ButtonSpec` has exactly one bound button and return the
    /// handles in declaration order.
    ///
    /// Slots already filled are reused as-is. An empty slot first adopts an
    /// overlay button already bound to the same action; only when none exists
    /// is a new button created, with `bind` called for it in the same step.
    /// Surplus overlay buttons are left alone.
    pub fn ensure_buttons<W, B>(
        &mut self,
        overlay: &mut W,
        specs: &[ButtonSpec; BUTTON_COUNT],
        size: Size,
        mut bind: B,
    ) -> [ButtonHandle; BUTTON_COUNT]
    where
        W: OverlayWindow + ?Sized,
        B: FnMut(OverlayAction) -> ButtonCallback,
    {
        let mut existing = if self.is_complete() {
            Vec::new()
        } else {
            overlay.action_buttons()
        };
        existing.retain(|(handle, _)| !self.slots.contains(&Some(*handle)));

        let mut handles = [ButtonHandle::default(); BUTTON_COUNT];
        for (slot, spec) in specs.iter().enumerate() {
            let handle = match self.slots[slot] {
                Some(handle) => handle,
                None => {
                    let adopted = existing
                        .iter()
                        .position(|(_, action)| *action == spec.action)
                        .map(|pos| existing.remove(pos).0);
                    let handle = match adopted {
                        Some(handle) => {
                            tracing::debug!(label = spec.label, "adopted existing overlay button");
                            handle
                        }
                        None => {
                            tracing::debug!(label = spec.label, "created overlay button");
                            overlay.create_button(spec.label, size, spec.action, bind(spec.action))
                        }
                    };
                    self.slots[slot] = Some(handle);
                    handle
                }
            };
            handles[slot] = handle;
        }
        handles
    }
}
