use crate::overlay::buttons::{forward_to, ActionHandler, ButtonRegistry, BUTTON_SPECS};
use crate::overlay::events::{reaction_for, ImmediateAction, OverlayEvent};
use crate::overlay::geometry::{compute_layout, OverlayLayout};
use crate::overlay::scheduler::{Scheduler, Task};
use crate::overlay::state::{can_transition, OverlayLifecycle};
use crate::overlay::window::{OverlayProperties, OverlayWindow};
use crate::settings::OverlaySettings;
use crate::visibility::{overlay_visible, surface_is_usable};
use crate::window_manager::WindowStateSampler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Name of the restartable timer that performs first-time setup.
pub const SETUP_TIMER: &str = "overlay-setup";

struct ControllerState<W> {
    lifecycle: OverlayLifecycle,
    overlay: Option<W>,
    buttons: ButtonRegistry,
    /// Events seen before the overlay was ready, replayed once it is. Holds
    /// at most one entry per event kind, in first-seen order.
    deferred: Vec<OverlayEvent>,
    last_layout: Option<OverlayLayout>,
    torn_down: bool,
    recomputes: u64,
}

impl<W> ControllerState<W> {
    fn transition(&mut self, to: OverlayLifecycle) -> bool {
        let from = self.lifecycle;
        if !can_transition(from, to) {
            tracing::warn!(?from, ?to, "rejected overlay lifecycle transition");
            return false;
        }
        if from != to {
            tracing::debug!(?from, ?to, "overlay lifecycle");
        }
        self.lifecycle = to;
        true
    }
}

/// Keeps the overlay locked to the render surface.
///
/// Lives behind an `Rc`; every deferred task holds only a `Weak` back to it,
/// so tasks that fire after the controller is dropped do nothing.
pub struct OverlayController<W, H, S> {
    this: Weak<Self>,
    state: RefCell<ControllerState<W>>,
    sampler: H,
    scheduler: Rc<S>,
    actions: Rc<dyn ActionHandler>,
    settings: OverlaySettings,
}

impl<W, H, S> OverlayController<W, H, S>
where
    W: OverlayWindow + 'static,
    H: WindowStateSampler + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        overlay: Option<W>,
        sampler: H,
        scheduler: Rc<S>,
        actions: Rc<dyn ActionHandler>,
        settings: OverlaySettings,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            state: RefCell::new(ControllerState {
                lifecycle: OverlayLifecycle::Uninitialized,
                overlay,
                buttons: ButtonRegistry::new(),
                deferred: Vec::new(),
                last_layout: None,
                torn_down: false,
                recomputes: 0,
            }),
            sampler,
            scheduler,
            actions,
            settings,
        })
    }

    pub fn lifecycle(&self) -> OverlayLifecycle {
        self.state.borrow().lifecycle
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Layout applied by the most recent successful recompute.
    pub fn last_layout(&self) -> Option<OverlayLayout> {
        self.state.borrow().last_layout
    }

    pub fn recompute_count(&self) -> u64 {
        self.state.borrow().recomputes
    }

    pub fn deferred_events(&self) -> Vec<OverlayEvent> {
        self.state.borrow().deferred.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.borrow().torn_down
    }

    pub fn with_overlay<R>(&self, f: impl FnOnce(&W) -> R) -> Option<R> {
        self.state.borrow().overlay.as_ref().map(f)
    }

    pub fn with_overlay_mut<R>(&self, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        self.state.borrow_mut().overlay.as_mut().map(f)
    }

    /// Hand over the overlay widget when it is constructed after the
    /// controller. Ignored if one is already attached. Restarts the setup
    /// timer when setup has not happened yet.
    pub fn attach_overlay(&self, overlay: W) {
        let needs_setup = {
            let mut state = self.state.borrow_mut();
            if state.overlay.is_some() {
                tracing::debug!("overlay already attached; ignoring");
                return;
            }
            state.overlay = Some(overlay);
            !state.torn_down && state.lifecycle == OverlayLifecycle::Uninitialized
        };
        if needs_setup {
            self.start();
        }
    }

    /// Wrap `f` so it runs against this controller if it still exists.
    fn deferred(&self, f: impl FnOnce(&Self) + 'static) -> Task {
        let this = self.this.clone();
        Box::new(move || match this.upgrade() {
            Some(controller) => f(&*controller),
            None => tracing::trace!("overlay controller dropped; deferred task skipped"),
        })
    }

    fn schedule_recompute(&self, delay: std::time::Duration) {
        self.scheduler
            .schedule_once(delay, self.deferred(|controller| controller.recompute()));
    }

    /// Start (or restart) the setup timer that calls [`Self::initialize`]
    /// once the host toolkit has had a chance to lay itself out.
    pub fn start(&self) {
        tracing::debug!(delay = ?self.settings.timing.setup_delay(), "overlay setup scheduled");
        self.scheduler.schedule_named(
            SETUP_TIMER,
            self.settings.timing.setup_delay(),
            self.deferred(|controller| controller.initialize()),
        );
    }

    pub fn initialize(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.torn_down {
                tracing::trace!("initialize after teardown ignored");
                return;
            }
            match state.lifecycle {
                OverlayLifecycle::Uninitialized => {}
                OverlayLifecycle::PendingFirstLayout | OverlayLifecycle::Ready => {
                    tracing::trace!("overlay already initialized");
                    return;
                }
            }

            let ControllerState {
                overlay, buttons, ..
            } = &mut *state;
            let Some(overlay) = overlay.as_mut() else {
                tracing::debug!("overlay widget not attached yet; setup deferred");
                return;
            };
            overlay.configure(&OverlayProperties::floating_panel());
            overlay.hide();
            buttons.ensure_buttons(
                overlay,
                &BUTTON_SPECS,
                self.settings.layout.metrics().button_size(),
                forward_to(self.actions.clone()),
            );
            state.transition(OverlayLifecycle::PendingFirstLayout);
        }

        let confirm = self.settings.timing.confirm_layout_delay();
        self.scheduler.schedule_once(
            self.settings.timing.first_layout_delay(),
            self.deferred(move |controller| {
                controller.recompute();
                controller.schedule_recompute(confirm);
            }),
        );

        let replay = {
            let mut state = self.state.borrow_mut();
            state.transition(OverlayLifecycle::Ready);
            std::mem::take(&mut state.deferred)
        };
        for event in replay {
            self.notify(event);
        }
    }

    pub fn notify(&self, event: OverlayEvent) {
        let mut state = self.state.borrow_mut();
        if state.torn_down {
            tracing::trace!(?event, "event after teardown ignored");
            return;
        }
        if !state.lifecycle.is_ready() {
            if event.superseded_by_first_layout() {
                tracing::trace!(?event, "dropped before first layout");
            } else if state.deferred.contains(&event) {
                tracing::trace!(?event, "already recorded until overlay is ready");
            } else {
                tracing::trace!(?event, "recorded until overlay is ready");
                state.deferred.push(event);
            }
            return;
        }

        let reaction = reaction_for(event, &self.settings.timing);
        if self.hides_immediately(reaction.immediate) {
            if let Some(overlay) = state.overlay.as_mut() {
                overlay.hide();
            }
        }
        drop(state);

        tracing::trace!(?event, delay = ?reaction.delay, "recompute scheduled");
        self.schedule_recompute(reaction.delay);
    }

    fn hides_immediately(&self, immediate: ImmediateAction) -> bool {
        match immediate {
            ImmediateAction::None => false,
            ImmediateAction::Hide => true,
            ImmediateAction::HideIfHostDown => self
                .sampler
                .host_state()
                .is_some_and(|host| host.is_minimized || !host.is_visible),
            ImmediateAction::HideIfSurfaceDegenerate => {
                self.sampler.surface_state().is_some_and(|surface| {
                    !surface_is_usable(&surface, self.settings.layout.min_surface())
                })
            }
        }
    }

    /// Sample, lay out and apply. Safe to call any number of times.
    pub fn recompute(&self) {
        let mut state = self.state.borrow_mut();
        if state.torn_down || state.lifecycle == OverlayLifecycle::Uninitialized {
            return;
        }

        let ControllerState {
            overlay,
            buttons,
            last_layout,
            recomputes,
            ..
        } = &mut *state;
        let Some(overlay) = overlay.as_mut() else {
            return;
        };
        let (Some(host), Some(surface)) = (self.sampler.host_state(), self.sampler.surface_state())
        else {
            tracing::trace!("window state unavailable; overlay kept hidden");
            overlay.hide();
            return;
        };

        let layout = compute_layout(&surface, &self.settings.layout.metrics());
        overlay.set_geometry(layout.rect);
        for (handle, position) in buttons.handles().zip(layout.buttons) {
            overlay.move_button(handle, position);
        }

        let visible = overlay_visible(&host, &surface, self.settings.layout.min_surface());
        if visible {
            overlay.show();
        } else {
            overlay.hide();
        }

        *last_layout = Some(layout);
        *recomputes += 1;
        tracing::debug!(rect = ?layout.rect, visible, "overlay geometry applied");
    }

    pub fn teardown(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(overlay) = state.overlay.as_mut() {
            overlay.hide();
        }
        if !state.torn_down {
            state.torn_down = true;
            state.deferred.clear();
            tracing::debug!("overlay torn down");
        }
    }
}
