use overlay_sync::overlay::{OverlayEvent, OverlayRect, Point};

#[path = "mock_host.rs"]
mod mock_host;
use mock_host::*;

fn column(x: i32) -> Vec<Point> {
    [10, 60, 110, 160].into_iter().map(|y| Point::new(x, y)).collect()
}

fn visible(h: &Harness) -> bool {
    h.controller.with_overlay(|o| o.visible).unwrap()
}

#[test]
fn ready_overlay_covers_surface_with_right_aligned_column() {
    let h = ready_harness();

    assert!(visible(&h));
    let (rect, positions) = h
        .controller
        .with_overlay(|o| (o.rect, o.button_positions()))
        .unwrap();
    assert_eq!(
        rect,
        Some(OverlayRect {
            x: 100,
            y: 50,
            width: 800,
            height: 600
        })
    );
    assert_eq!(positions, column(670));
}

#[test]
fn minimize_hides_immediately_and_restore_reshows_at_new_bounds() {
    let h = ready_harness();

    h.sampler.update_host(|host| host.is_minimized = true);
    h.controller.notify(OverlayEvent::StateChange);
    assert!(!visible(&h));
    h.scheduler.run_until_idle();
    assert!(!visible(&h));

    h.sampler.update_host(|host| host.is_minimized = false);
    h.sampler.set_surface(surface(200, 120, 800, 600));
    h.controller.notify(OverlayEvent::StateChange);
    assert!(!visible(&h));
    h.scheduler.run_until_idle();

    assert!(visible(&h));
    assert_eq!(
        h.controller.last_layout().map(|layout| layout.rect),
        Some(OverlayRect {
            x: 200,
            y: 120,
            width: 800,
            height: 600
        })
    );
}

#[test]
fn surface_shrink_moves_buttons_with_right_edge() {
    let h = ready_harness();

    h.sampler.set_surface(surface(100, 50, 400, 300));
    h.controller.notify(OverlayEvent::SurfaceResize);
    h.scheduler.run_until_idle();

    let layout = h.controller.last_layout().unwrap();
    assert_eq!(
        layout.rect,
        OverlayRect {
            x: 100,
            y: 50,
            width: 400,
            height: 300
        }
    );
    assert_eq!(layout.buttons.to_vec(), column(270));
    assert_eq!(
        h.controller.with_overlay(|o| o.button_positions()).unwrap(),
        column(270)
    );
    assert!(visible(&h));
}

#[test]
fn recompute_without_changes_is_stable() {
    let h = ready_harness();
    let before = h.controller.last_layout();

    h.controller.recompute();
    h.controller.recompute();

    assert_eq!(h.controller.last_layout(), before);
    assert!(visible(&h));
}

#[test]
fn deactivate_hides_before_recompute() {
    let h = ready_harness();

    h.sampler.update_host(|host| host.is_active = false);
    h.controller.notify(OverlayEvent::Deactivate);
    assert!(!visible(&h));
    assert_eq!(h.scheduler.pending(), 1);

    h.scheduler.run_until_idle();
    assert!(!visible(&h));

    h.sampler.update_host(|host| host.is_active = true);
    h.controller.notify(OverlayEvent::Activate);
    h.scheduler.run_until_idle();
    assert!(visible(&h));
}

#[test]
fn host_hide_hides_before_recompute_and_show_restores() {
    let h = ready_harness();

    h.sampler.update_host(|host| host.is_visible = false);
    h.controller.notify(OverlayEvent::Hide);
    assert!(!visible(&h));
    assert_eq!(h.scheduler.pending(), 1);

    h.scheduler.run_until_idle();
    assert!(!visible(&h));

    h.sampler.update_host(|host| host.is_visible = true);
    h.controller.notify(OverlayEvent::Show);
    assert!(!visible(&h));
    h.scheduler.run_until_idle();
    assert!(visible(&h));
}

#[test]
fn degenerate_surface_keeps_overlay_hidden_but_tracks_geometry() {
    let h = ready_harness();

    h.sampler.set_surface(surface(100, 50, 50, 50));
    h.controller.notify(OverlayEvent::SurfaceResize);
    assert!(!visible(&h));
    h.scheduler.run_until_idle();

    assert!(!visible(&h));
    assert_eq!(
        h.controller.with_overlay(|o| o.rect).unwrap(),
        Some(OverlayRect {
            x: 100,
            y: 50,
            width: 50,
            height: 50
        })
    );
}

#[test]
fn hidden_surface_still_receives_geometry() {
    let h = ready_harness();

    let mut hidden = surface(300, 300, 640, 480);
    hidden.is_visible = false;
    h.sampler.set_surface(hidden);
    h.controller.recompute();

    assert!(!visible(&h));
    assert_eq!(
        h.controller.last_layout().map(|layout| layout.rect.origin()),
        Some(Point::new(300, 300))
    );
}

#[test]
fn missing_surface_hides_and_keeps_last_layout() {
    let h = ready_harness();
    let before = h.controller.last_layout();
    let count = h.controller.recompute_count();

    h.sampler.clear_surface();
    h.controller.recompute();

    assert!(!visible(&h));
    assert_eq!(h.controller.last_layout(), before);
    assert_eq!(h.controller.recompute_count(), count);
}

#[test]
fn every_event_schedules_its_own_recompute() {
    let h = ready_harness();
    let count = h.controller.recompute_count();

    for _ in 0..3 {
        h.controller.notify(OverlayEvent::Move);
    }
    assert_eq!(h.scheduler.pending(), 3);
    h.scheduler.advance(ms(10));

    assert_eq!(h.controller.recompute_count(), count + 3);
}

#[test]
fn show_restacks_after_longer_delay() {
    let h = ready_harness();
    let count = h.controller.recompute_count();

    h.controller.notify(OverlayEvent::Show);
    h.scheduler.advance(ms(49));
    assert_eq!(h.controller.recompute_count(), count);
    h.scheduler.advance(ms(1));
    assert_eq!(h.controller.recompute_count(), count + 1);
}

#[test]
fn overlay_buttons_forward_to_scene_actions() {
    let h = ready_harness();

    for index in 0..4 {
        let on_click = h.controller.with_overlay(|o| o.callback(index)).unwrap();
        on_click();
    }

    assert_eq!(
        *h.actions.calls.borrow(),
        vec!["screenshot", "visible:true", "visible:false", "grid"]
    );
}
