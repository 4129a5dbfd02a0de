use super::*;
use crate::config::{Action, KeybindingsConfig};
use crate::draw::{BorderSpec, ClearRequest};
use crate::geometry::{DragQuadrant, Point, Rect, classify};
use crate::input::{Key, MouseButton};

fn create_test_input_state() -> InputState {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    let mut state = InputState::with_defaults(BorderSpec::default(), true, action_map);
    state.update_screen_dimensions(1920, 1080);
    state
}

fn drag(state: &mut InputState, from: (i32, i32), to: (i32, i32)) {
    state.on_mouse_press(MouseButton::Left, from.0, from.1);
    state.on_mouse_motion(to.0, to.1);
    state.on_mouse_release(MouseButton::Left, to.0, to.1);
}

fn drawn_state(from: (i32, i32), to: (i32, i32)) -> InputState {
    let mut state = create_test_input_state();
    drag(&mut state, from, to);
    assert_eq!(state.state, SelectionState::Drawn);
    state
}

#[test]
fn test_starts_idle_without_selection() {
    let state = create_test_input_state();
    assert_eq!(state.state, SelectionState::Idle);
    assert_eq!(state.visible_selection(), None);
    assert_eq!(state.selection_rect(), None);
}

#[test]
fn test_press_sets_both_points() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 100, 100);

    assert_eq!(state.state, SelectionState::Dragging);
    assert_eq!(state.anchor, Point::new(100, 100));
    assert_eq!(state.cursor, Point::new(100, 100));
}

#[test]
fn test_upper_left_drag_exports_canonical_rect() {
    let state = drawn_state((100, 100), (50, 40));

    assert_eq!(classify(state.anchor, state.cursor), DragQuadrant::UpperLeft);
    assert_eq!(state.selection_rect(), Some(Rect::new(50, 40, 50, 60)));
}

#[test]
fn test_click_without_drag_returns_to_idle() {
    let mut state = create_test_input_state();
    drag(&mut state, (10, 10), (10, 10));

    assert_eq!(state.state, SelectionState::Idle);
    assert_eq!(classify(state.anchor, state.cursor), DragQuadrant::Degenerate);
    assert_eq!(state.selection_rect(), None);
}

#[test]
fn test_zero_width_drag_returns_to_idle() {
    let mut state = create_test_input_state();
    drag(&mut state, (10, 10), (10, 300));
    assert_eq!(state.state, SelectionState::Idle);
}

#[test]
fn test_redrag_from_drawn_keeps_anchor_and_flips_quadrant() {
    let mut state = drawn_state((100, 100), (200, 200));
    assert_eq!(classify(state.anchor, state.cursor), DragQuadrant::LowerRight);

    state.on_mouse_press(MouseButton::Left, 40, 30);
    assert_eq!(state.state, SelectionState::Dragging);
    assert_eq!(state.anchor, Point::new(100, 100));
    assert_eq!(classify(state.anchor, state.cursor), DragQuadrant::UpperLeft);

    state.on_mouse_release(MouseButton::Left, 40, 30);
    assert_eq!(state.selection_rect(), Some(Rect::new(40, 30, 60, 70)));
}

#[test]
fn test_motion_is_clamped_to_screen() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 100, 100);
    state.on_mouse_motion(5000, -20);

    assert_eq!(state.cursor, Point::new(1920, 0));
}

#[test]
fn test_motion_ignored_when_not_dragging() {
    let mut state = create_test_input_state();
    state.needs_redraw = false;
    state.on_mouse_motion(300, 300);

    assert_eq!(state.cursor, Point::ORIGIN);
    assert!(!state.needs_redraw);
}

#[test]
fn test_right_button_does_not_start_selection() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Right, 100, 100);
    assert_eq!(state.state, SelectionState::Idle);
}

#[test]
fn test_select_all_covers_screen() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('a'));

    assert_eq!(state.state, SelectionState::Drawn);
    assert_eq!(state.anchor, Point::new(0, 0));
    assert_eq!(state.cursor, Point::new(1920, 1080));
    assert_eq!(state.selection_rect(), Some(Rect::new(0, 0, 1920, 1080)));
}

#[test]
fn test_clear_resets_points_and_queues_request() {
    let mut state = drawn_state((10, 10), (300, 200));
    state.on_key_press(Key::Char('z'));

    assert_eq!(state.state, SelectionState::Idle);
    assert_eq!(state.anchor, Point::ORIGIN);
    assert_eq!(state.cursor, Point::ORIGIN);
    assert_eq!(state.take_clear_request(), Some(ClearRequest));
    assert_eq!(state.take_clear_request(), None);
}

#[test]
fn test_nudge_grows_and_shrinks_edges() {
    let mut state = drawn_state((10, 10), (110, 60));

    state.on_key_press(Key::Right);
    assert_eq!(state.selection_rect(), Some(Rect::new(10, 10, 101, 50)));

    state.on_key_press(Key::Shift);
    state.on_key_press(Key::Up);
    assert_eq!(state.selection_rect(), Some(Rect::new(10, 7, 101, 53)));
    state.on_key_release(Key::Shift);

    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Right);
    assert_eq!(state.selection_rect(), Some(Rect::new(10, 7, 100, 53)));
}

#[test]
fn test_nudge_and_inverse_restore_rect() {
    let mut state = drawn_state((400, 300), (100, 50));
    let before = state.selection_rect();

    for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
        state.on_key_press(key);
        state.on_key_press(Key::Ctrl);
        state.on_key_press(key);
        state.on_key_release(Key::Ctrl);
        assert_eq!(state.selection_rect(), before, "{:?}", key);
    }
}

#[test]
fn test_nudge_clamps_to_screen() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('a'));
    state.on_key_press(Key::Left);
    state.on_key_press(Key::Down);

    assert_eq!(state.selection_rect(), Some(Rect::new(0, 0, 1920, 1080)));
}

#[test]
fn test_nudge_ignored_unless_drawn() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Right);
    assert_eq!(state.cursor, Point::ORIGIN);

    state.on_mouse_press(MouseButton::Left, 50, 50);
    state.on_key_press(Key::Right);
    assert_eq!(state.cursor, Point::new(50, 50));
}

#[test]
fn test_export_action_requires_drawn_selection() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('c'));
    assert_eq!(state.take_pending_export(), None);

    let mut state = drawn_state((10, 10), (50, 50));
    state.on_key_press(Key::Char('c'));
    assert_eq!(state.take_pending_export(), Some(Action::CopySelection));
    assert_eq!(state.take_pending_export(), None);
}

#[test]
fn test_export_action_resets_modifiers() {
    let mut state = drawn_state((10, 10), (50, 50));
    state.handle_action(Action::SaveSelection);
    state.modifiers.ctrl = true;
    state.handle_action(Action::PrintSelection);

    assert!(!state.modifiers.ctrl);
    assert_eq!(state.take_pending_export(), Some(Action::PrintSelection));
}

#[test]
fn test_view_popup_swallows_input_until_closed() {
    let mut state = drawn_state((10, 10), (50, 50));
    state.on_key_press(Key::Char('v'));
    assert!(state.viewing);

    state.on_key_press(Key::Char('a'));
    state.on_mouse_press(MouseButton::Left, 500, 500);
    assert_eq!(state.state, SelectionState::Drawn);
    assert_eq!(state.selection_rect(), Some(Rect::new(10, 10, 40, 40)));

    state.on_key_press(Key::Escape);
    assert!(!state.viewing);
    assert!(!state.should_exit);

    state.on_key_press(Key::Escape);
    assert!(state.should_exit);
}

#[test]
fn test_view_requires_selection() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('v'));
    assert!(!state.viewing);
}

#[test]
fn test_toggles() {
    let mut state = create_test_input_state();
    assert!(state.show_tips);
    assert!(state.border.enabled);

    state.on_key_press(Key::Char('t'));
    state.on_key_press(Key::Char('b'));

    assert!(!state.show_tips);
    assert!(!state.border.enabled);
}

#[test]
fn test_exit_keys() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('q'));
    assert!(state.should_exit);
}

#[test]
fn test_modified_letter_does_not_trigger_plain_binding() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Char('q'));
    assert!(!state.should_exit);
}
