use task_arcade::entities::*;
use task_arcade::input::*;

fn zone() -> Rect {
    Rect::new(300.0, 240.0, 120.0, 120.0)
}

// ── Activations ───────────────────────────────────────────────────────────────

#[test]
fn at_most_one_activation_per_frame() {
    let mut input = InputAdapter::default();
    let first = input.push(InputEvent::KeyDown(Key::Action));
    assert_eq!(first.map(|a| a.source), Some(ActivationSource::Key));
    assert!(input.push(InputEvent::Click(Vec2::new(1.0, 1.0))).is_none());
    assert!(input.push(InputEvent::TouchStart(Vec2::new(2.0, 2.0))).is_none());

    let frame = input.take_frame();
    assert_eq!(frame.activation.map(|a| a.source), Some(ActivationSource::Key));
    assert!(!input.take_frame().activated());
}

#[test]
fn pointer_activations_carry_their_position() {
    let mut input = InputAdapter::default();
    input.push(InputEvent::Click(Vec2::new(12.0, 34.0)));
    let frame = input.take_frame();
    let a = frame.activation.expect("click activation");
    assert_eq!(a.source, ActivationSource::Click);
    assert_eq!(a.at, Some(Vec2::new(12.0, 34.0)));
}

#[test]
fn directional_keys_do_not_activate() {
    let mut input = InputAdapter::default();
    assert!(input.push(InputEvent::KeyDown(Key::Left)).is_none());
    assert!(!input.take_frame().activated());
}

#[test]
fn cancelled_activation_is_dropped() {
    let mut input = InputAdapter::default();
    input.push(InputEvent::KeyDown(Key::Action));
    input.cancel_activation();
    assert!(!input.take_frame().activated());
}

// ── Pointer ───────────────────────────────────────────────────────────────────

#[test]
fn pointer_is_clamped_to_bounds() {
    let mut input = InputAdapter::default();
    input.set_bounds(Some(zone()));
    input.push(InputEvent::PointerMove(Vec2::new(0.0, 0.0)));
    assert_eq!(input.pointer(), Vec2::new(300.0, 240.0));

    input.push(InputEvent::PointerMove(Vec2::new(999.0, 300.0)));
    assert_eq!(input.take_frame().pointer, Vec2::new(420.0, 300.0));
}

#[test]
fn setting_bounds_reclamps_current_pointer() {
    let mut input = InputAdapter::default();
    input.push(InputEvent::PointerMove(Vec2::new(10.0, 500.0)));
    assert_eq!(input.pointer(), Vec2::new(10.0, 500.0));
    input.set_bounds(Some(zone()));
    assert_eq!(input.pointer(), Vec2::new(300.0, 360.0));
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[test]
fn key_stays_held_within_the_window() {
    let mut input = InputAdapter::new(Some(HOLD_WINDOW));
    input.push(InputEvent::KeyDown(Key::Left));
    for _ in 0..HOLD_WINDOW {
        assert!(input.take_frame().left);
    }
    assert!(!input.take_frame().left);
}

#[test]
fn repeat_refreshes_the_window() {
    let mut input = InputAdapter::new(Some(2));
    input.push(InputEvent::KeyDown(Key::Right));
    assert!(input.take_frame().right);
    assert!(input.take_frame().right);
    input.push(InputEvent::KeyDown(Key::Right));
    assert!(input.take_frame().right);
    assert!(input.take_frame().right);
    assert!(!input.take_frame().right);
}

#[test]
fn without_window_key_is_held_until_release() {
    let mut input = InputAdapter::new(None);
    input.push(InputEvent::KeyDown(Key::Up));
    for _ in 0..100 {
        assert!(input.take_frame().up);
    }
    input.push(InputEvent::KeyUp(Key::Up));
    assert!(!input.take_frame().up);
}

#[test]
fn reset_forgets_keys_and_activation_but_keeps_pointer() {
    let mut input = InputAdapter::new(None);
    input.push(InputEvent::PointerMove(Vec2::new(5.0, 6.0)));
    input.push(InputEvent::KeyDown(Key::Down));
    input.push(InputEvent::KeyDown(Key::Action));
    input.reset();

    let frame = input.take_frame();
    assert!(!frame.down);
    assert!(!frame.activated());
    assert_eq!(frame.pointer, Vec2::new(5.0, 6.0));
}
