use overlay_sync::overlay::{
    ButtonCallback, ButtonRegistry, OverlayAction, Size, BUTTON_COUNT, BUTTON_SPECS,
};
use std::cell::RefCell;
use std::rc::Rc;

#[path = "mock_host.rs"]
mod mock_host;
use mock_host::*;

fn noop() -> ButtonCallback {
    Rc::new(|| {})
}

fn counting_bind(
    bound: Rc<RefCell<Vec<OverlayAction>>>,
) -> impl FnMut(OverlayAction) -> ButtonCallback {
    move |action| {
        bound.borrow_mut().push(action);
        noop()
    }
}

#[test]
fn ensure_buttons_is_idempotent() {
    let mut overlay = MockOverlay::default();
    let mut registry = ButtonRegistry::new();
    let bound = Rc::new(RefCell::new(Vec::new()));

    let first = registry.ensure_buttons(
        &mut overlay,
        &BUTTON_SPECS,
        Size::new(120, 40),
        counting_bind(bound.clone()),
    );
    for _ in 0..2 {
        let again = registry.ensure_buttons(
            &mut overlay,
            &BUTTON_SPECS,
            Size::new(120, 40),
            counting_bind(bound.clone()),
        );
        assert_eq!(again, first);
    }

    assert!(registry.is_complete());
    assert_eq!(overlay.buttons.len(), BUTTON_COUNT);
    assert_eq!(bound.borrow().len(), BUTTON_COUNT);
}

#[test]
fn buttons_are_created_in_declared_order() {
    let mut overlay = MockOverlay::default();
    let mut registry = ButtonRegistry::new();
    registry.ensure_buttons(&mut overlay, &BUTTON_SPECS, Size::new(120, 40), |_| noop());

    let labels: Vec<_> = overlay.buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Screenshot", "Show All", "Hide All", "Toggle Grid"]);
    assert!(overlay.buttons.iter().all(|b| b.size == Size::new(120, 40)));
}

#[test]
fn existing_bound_buttons_are_adopted_without_rebinding() {
    let mut overlay = MockOverlay::with_prebuilt(&[
        (OverlayAction::HideAll, noop()),
        (OverlayAction::Screenshot, noop()),
    ]);
    let mut registry = ButtonRegistry::new();
    let bound = Rc::new(RefCell::new(Vec::new()));

    let handles = registry.ensure_buttons(
        &mut overlay,
        &BUTTON_SPECS,
        Size::new(120, 40),
        counting_bind(bound.clone()),
    );

    assert_eq!(overlay.buttons.len(), BUTTON_COUNT);
    assert_eq!(
        *bound.borrow(),
        vec![OverlayAction::ShowAll, OverlayAction::ToggleGrid]
    );
    assert_eq!(overlay.buttons[handles[0].0].action, OverlayAction::Screenshot);
    assert_eq!(overlay.buttons[handles[2].0].action, OverlayAction::HideAll);
    assert_eq!(registry.get(1), Some(handles[1]));
}

#[test]
fn surplus_overlay_buttons_are_ignored() {
    let mut overlay = MockOverlay::with_prebuilt(&[
        (OverlayAction::ToggleGrid, noop()),
        (OverlayAction::ToggleGrid, noop()),
    ]);
    let mut registry = ButtonRegistry::new();

    let handles = registry.ensure_buttons(&mut overlay, &BUTTON_SPECS, Size::new(120, 40), |_| noop());

    assert_eq!(overlay.buttons.len(), 5);
    assert_eq!(registry.handles().count(), BUTTON_COUNT);
    assert_eq!(handles[3].0, 0);
}

#[test]
fn each_button_reaches_its_own_action() {
    let h = ready_harness();

    let on_click = h.controller.with_overlay(|o| o.callback(3)).unwrap();
    on_click();
    on_click();
    let on_click = h.controller.with_overlay(|o| o.callback(2)).unwrap();
    on_click();

    assert_eq!(*h.actions.calls.borrow(), vec!["grid", "grid", "visible:false"]);
}
