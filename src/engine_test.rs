#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::LineKind;
use crate::formation::Team;

// Default viewport is 900x540: pitch origin (18, 18), size 864x504,
// token radius 18, ball radius 10.

fn board() -> (EngineCore, TokenId) {
    let mut engine = EngineCore::new();
    engine.store.clear_team(Team::A);
    engine.store.clear_team(Team::B);
    let id = engine.store.add_player(Team::A);
    engine.store.update_player_pos(&id, 30.0, 30.0);
    engine.store.set_ball_pos(70.0, 70.0);
    (engine, id)
}

fn px(engine: &EngineCore, x: f64, y: f64) -> Point {
    engine.pitch.pct_to_px(PctPoint::new(x, y))
}

fn down(engine: &mut EngineCore, pt: Point) -> Vec<Action> {
    engine.on_pointer_down(pt, Button::Primary, Modifiers::default())
}

fn move_to(engine: &mut EngineCore, pt: Point) -> Vec<Action> {
    engine.on_pointer_move(pt, Modifiers::default())
}

fn up(engine: &mut EngineCore, pt: Point) -> Vec<Action> {
    engine.on_pointer_up(pt, Button::Primary, Modifiers::default())
}

fn gesture(engine: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    let mut actions = down(engine, from);
    actions.extend(move_to(engine, to));
    actions.extend(up(engine, to));
    actions
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn assert_near(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

fn undo_depth(engine: &EngineCore) -> usize {
    engine.store.history().past_len()
}

// =============================================================
// Construction / viewport
// =============================================================

#[test]
fn new_engine_is_idle_in_select_mode() {
    let engine = EngineCore::new();
    assert!(matches!(engine.input, InputState::Idle));
    assert_eq!(engine.store.draw_mode(), DrawMode::Select);
    assert_eq!(engine.min_line_length(), MIN_LINE_LENGTH_PCT);
    assert_eq!(engine.pitch, PitchGeometry::default());
}

#[test]
fn set_viewport_relays_out_pitch() {
    let mut engine = EngineCore::new();
    engine.set_viewport(1000.0, 600.0);
    assert_eq!(engine.pitch, PitchGeometry::from_viewport(1000.0, 600.0));
    assert_eq!(engine.pitch.x0, 20.0);
}

#[test]
fn with_config_uses_min_line_length_and_history_limit() {
    let config = BoardConfig { min_line_length: 5.0, history_limit: Some(2), ..BoardConfig::default() };
    let engine = EngineCore::with_config(&config);
    assert_eq!(engine.min_line_length(), 5.0);
    assert_eq!(engine.store.history().capacity(), Some(2));
}

// =============================================================
// Drafting
// =============================================================

#[test]
fn pass_draft_becomes_line() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let (from, to) = (px(&engine, 20.0, 80.0), px(&engine, 40.0, 80.0));

    let actions = gesture(&mut engine, from, to);

    assert_eq!(engine.store.lines().len(), 1);
    let line = &engine.store.lines()[0];
    assert_eq!(line.kind, LineKind::Pass);
    assert_near(line.from.x_pct, 20.0);
    assert_near(line.from.y_pct, 80.0);
    assert_near(line.to.x_pct, 40.0);
    assert_near(line.to.y_pct, 80.0);
    assert_eq!(&actions[actions.len() - 2..], &[Action::LineCreated(line.id), Action::RenderNeeded]);
}

#[test]
fn run_mode_draws_run_lines() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Run);
    let (from, to) = (px(&engine, 10.0, 90.0), px(&engine, 40.0, 60.0));
    gesture(&mut engine, from, to);
    assert_eq!(engine.store.lines()[0].kind, LineKind::Run);
}

#[test]
fn short_draft_is_discarded_without_commit() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let depth = undo_depth(&engine);
    let (from, to) = (px(&engine, 20.0, 80.0), px(&engine, 20.0, 80.5));

    let actions = gesture(&mut engine, from, to);

    assert!(engine.store.lines().is_empty());
    assert_eq!(undo_depth(&engine), depth);
    assert!(actions.contains(&Action::DraftDiscarded));
}

#[test]
fn draft_without_motion_is_discarded() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let at = px(&engine, 20.0, 80.0);
    down(&mut engine, at);
    let actions = up(&mut engine, at);
    assert_eq!(actions, vec![Action::DraftDiscarded, Action::RenderNeeded]);
    assert!(engine.store.lines().is_empty());
}

#[test]
fn draft_ends_at_last_move_not_release_point() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let (a, b, c) = (px(&engine, 20.0, 80.0), px(&engine, 40.0, 80.0), px(&engine, 60.0, 80.0));
    down(&mut engine, a);
    move_to(&mut engine, b);
    up(&mut engine, c);
    assert_near(engine.store.lines()[0].to.x_pct, 40.0);
}

#[test]
fn draft_preview_follows_pointer() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let (a, b) = (px(&engine, 20.0, 80.0), px(&engine, 35.0, 85.0));
    down(&mut engine, a);
    assert_eq!(move_to(&mut engine, b), vec![Action::RenderNeeded]);

    let draft = engine.draft().unwrap();
    assert_eq!(draft.kind, LineKind::Pass);
    assert_near(draft.to.x_pct, 35.0);
    assert_near(draft.to.y_pct, 85.0);
    assert!(engine.store.lines().is_empty());
}

#[test]
fn draft_endpoints_clamp_to_pitch() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let from = px(&engine, 50.0, 90.0);
    gesture(&mut engine, from, Point::new(5000.0, 5000.0));
    let line = &engine.store.lines()[0];
    assert_eq!(line.to.x_pct, 100.0);
    assert_eq!(line.to.y_pct, 100.0);
}

#[test]
fn tokens_are_not_dragged_in_pass_mode() {
    let (mut engine, id) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let (on_player, elsewhere) = (px(&engine, 30.0, 30.0), px(&engine, 60.0, 30.0));

    gesture(&mut engine, on_player, elsewhere);

    let player = engine.store.player(&id).unwrap();
    assert_eq!((player.x_pct, player.y_pct), (30.0, 30.0));
    assert_eq!(engine.store.lines().len(), 1);
}

#[test]
fn min_line_length_is_configurable() {
    let mut engine = EngineCore::with_store(BoardStore::new(), 30.0);
    engine.set_draw_mode(DrawMode::Pass);
    let (from, to) = (px(&engine, 10.0, 95.0), px(&engine, 30.0, 95.0));
    let actions = gesture(&mut engine, from, to);
    assert!(actions.contains(&Action::DraftDiscarded));
    assert!(engine.store.lines().is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn press_on_line_selects_it_in_select_mode() {
    let (mut engine, _) = board();
    let id = engine.store.add_line(LineKind::Run, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    let depth = undo_depth(&engine);

    let at = px(&engine, 30.0, 50.0);
    assert_eq!(down(&mut engine, at), vec![Action::RenderNeeded]);

    assert_eq!(engine.store.selected_line_id(), Some(id));
    assert!(engine.draft().is_none());
    assert_eq!(engine.store.lines().len(), 1);
    assert_eq!(undo_depth(&engine), depth);
}

#[test]
fn draft_can_start_on_an_existing_line() {
    for mode in [DrawMode::Pass, DrawMode::Run] {
        let (mut engine, _) = board();
        let first = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 20.0), PctPoint::new(40.0, 20.0));
        engine.set_draw_mode(mode);

        let (from, to) = (px(&engine, 40.0, 20.0), px(&engine, 60.0, 40.0));
        down(&mut engine, from);
        assert!(engine.draft().is_some());
        assert_eq!(engine.store.selected_line_id(), None);
        let actions = [move_to(&mut engine, to), up(&mut engine, to)].concat();

        let lines = engine.store.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, first);
        assert_eq!(lines[1].kind, mode.line_kind().unwrap());
        assert_near(lines[1].from.x_pct, 40.0);
        assert_near(lines[1].from.y_pct, 20.0);
        assert_near(lines[1].to.x_pct, 60.0);
        assert_near(lines[1].to.y_pct, 40.0);
        assert!(actions.contains(&Action::LineCreated(lines[1].id)));
        assert_eq!(engine.store.selected_line_id(), None);
    }
}

#[test]
fn click_on_line_in_draw_mode_selects_it() {
    for mode in [DrawMode::Pass, DrawMode::Run] {
        let (mut engine, _) = board();
        let id = engine.store.add_line(LineKind::Run, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
        engine.set_draw_mode(mode);
        let depth = undo_depth(&engine);

        let at = px(&engine, 30.0, 50.0);
        down(&mut engine, at);
        assert_eq!(engine.store.selected_line_id(), None);
        let actions = up(&mut engine, at);

        assert_eq!(actions, vec![Action::DraftDiscarded, Action::RenderNeeded]);
        assert_eq!(engine.store.selected_line_id(), Some(id));
        assert_eq!(engine.store.lines().len(), 1);
        assert_eq!(undo_depth(&engine), depth);
        assert!(matches!(engine.input, InputState::Idle));
    }
}

#[test]
fn short_draft_off_any_line_selects_nothing() {
    let (mut engine, _) = board();
    let id = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    engine.store.select_line(Some(id));
    engine.set_draw_mode(DrawMode::Pass);

    let (from, to) = (px(&engine, 60.0, 10.0), px(&engine, 60.5, 10.0));
    gesture(&mut engine, from, to);

    assert_eq!(engine.store.selected_line_id(), None);
    assert_eq!(engine.store.lines().len(), 1);
}

#[test]
fn press_on_empty_pitch_clears_selection_in_every_mode() {
    for mode in [DrawMode::Select, DrawMode::Pass, DrawMode::Run] {
        let (mut engine, _) = board();
        let id = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
        engine.store.select_line(Some(id));
        engine.set_draw_mode(mode);

        let at = px(&engine, 50.0, 90.0);
        down(&mut engine, at);

        assert_eq!(engine.store.selected_line_id(), None);
    }
}

#[test]
fn line_on_top_of_player_wins_the_press() {
    let (mut engine, id) = board();
    let line = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 30.0), PctPoint::new(40.0, 30.0));
    let (at, away) = (px(&engine, 30.0, 30.0), px(&engine, 60.0, 60.0));

    gesture(&mut engine, at, away);

    assert_eq!(engine.store.selected_line_id(), Some(line));
    let player = engine.store.player(&id).unwrap();
    assert_eq!((player.x_pct, player.y_pct), (30.0, 30.0));
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_player_keeps_grab_offset() {
    let (mut engine, id) = board();
    let token = px(&engine, 30.0, 30.0);
    let grab = Point::new(token.x + 5.0, token.y);
    let target = px(&engine, 60.0, 60.0);
    let release = Point::new(target.x + 5.0, target.y);

    gesture(&mut engine, grab, release);

    let player = engine.store.player(&id).unwrap();
    assert_near(player.x_pct, 60.0);
    assert_near(player.y_pct, 60.0);
    assert!(matches!(engine.input, InputState::Idle));
}

#[test]
fn drag_release_clamps_to_pitch() {
    let (mut engine, id) = board();
    let token = px(&engine, 30.0, 30.0);

    gesture(&mut engine, token, Point::new(5000.0, -100.0));

    let player = engine.store.player(&id).unwrap();
    assert_eq!((player.x_pct, player.y_pct), (100.0, 0.0));
}

#[test]
fn drag_is_undoable() {
    let (mut engine, id) = board();
    let (from, to) = (px(&engine, 30.0, 30.0), px(&engine, 45.0, 45.0));
    gesture(&mut engine, from, to);
    while engine.store.player(&id).is_some_and(|p| p.x_pct != 30.0) {
        assert!(engine.store.can_undo());
        engine.store.undo();
    }
    assert_eq!(engine.store.player(&id).unwrap().y_pct, 30.0);
}

#[test]
fn press_without_motion_mutates_nothing() {
    let (mut engine, id) = board();
    let depth = undo_depth(&engine);
    let at = px(&engine, 30.0, 30.0);

    down(&mut engine, at);
    assert!(up(&mut engine, at).is_empty());

    assert_eq!(undo_depth(&engine), depth);
    let player = engine.store.player(&id).unwrap();
    assert_eq!((player.x_pct, player.y_pct), (30.0, 30.0));
}

#[test]
fn drag_ball() {
    let (mut engine, _) = board();
    let (from, to) = (px(&engine, 70.0, 70.0), px(&engine, 10.0, 20.0));
    gesture(&mut engine, from, to);
    assert_near(engine.store.ball().x_pct, 10.0);
    assert_near(engine.store.ball().y_pct, 20.0);
    assert!(engine.store.ball().visible);
}

#[test]
fn hidden_ball_cannot_be_dragged() {
    let (mut engine, _) = board();
    engine.store.set_ball_visible(false);
    let (from, to) = (px(&engine, 70.0, 70.0), px(&engine, 10.0, 20.0));
    gesture(&mut engine, from, to);
    assert_eq!(engine.store.ball().x_pct, 70.0);
}

#[test]
fn ball_is_grabbed_before_player_underneath() {
    let (mut engine, id) = board();
    engine.store.set_ball_pos(30.0, 30.0);
    let (from, to) = (px(&engine, 30.0, 30.0), px(&engine, 50.0, 90.0));
    gesture(&mut engine, from, to);
    assert_near(engine.store.ball().y_pct, 90.0);
    assert_eq!(engine.store.player(&id).unwrap().y_pct, 30.0);
}

#[test]
fn non_primary_button_is_ignored() {
    let (mut engine, id) = board();
    let (at, away) = (px(&engine, 30.0, 30.0), px(&engine, 60.0, 60.0));
    let actions = engine.on_pointer_down(at, Button::Secondary, Modifiers::default());
    assert!(actions.is_empty());
    assert!(matches!(engine.input, InputState::Idle));
    assert!(move_to(&mut engine, away).is_empty());
    assert_eq!(engine.store.player(&id).unwrap().x_pct, 30.0);
}

// =============================================================
// Mode changes / cancel
// =============================================================

#[test]
fn cancel_gesture_drops_draft() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let (a, b) = (px(&engine, 20.0, 80.0), px(&engine, 40.0, 80.0));
    down(&mut engine, a);
    move_to(&mut engine, b);

    assert_eq!(engine.cancel_gesture(), vec![Action::RenderNeeded]);
    assert!(engine.draft().is_none());
    assert!(up(&mut engine, b).is_empty());
    assert!(engine.store.lines().is_empty());
}

#[test]
fn cancel_gesture_when_idle_is_silent() {
    let mut engine = EngineCore::new();
    assert!(engine.cancel_gesture().is_empty());
}

#[test]
fn switching_mode_cancels_draft() {
    let (mut engine, _) = board();
    engine.set_draw_mode(DrawMode::Pass);
    let a = px(&engine, 20.0, 80.0);
    down(&mut engine, a);

    let actions = engine.set_draw_mode(DrawMode::Select);

    assert_eq!(actions, vec![Action::RenderNeeded, Action::RenderNeeded]);
    assert!(engine.draft().is_none());
    assert_eq!(engine.store.draw_mode(), DrawMode::Select);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_removes_selected_line() {
    let (mut engine, _) = board();
    let id = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    engine.store.select_line(Some(id));

    assert_eq!(engine.on_key_down(&Key::new("Delete"), Modifiers::default()), vec![Action::RenderNeeded]);
    assert!(engine.store.lines().is_empty());
    assert_eq!(engine.store.selected_line_id(), None);
}

#[test]
fn backspace_removes_selected_line() {
    let (mut engine, _) = board();
    let id = engine.store.add_line(LineKind::Run, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    engine.store.select_line(Some(id));
    engine.on_key_down(&Key::new("Backspace"), Modifiers::default());
    assert!(engine.store.lines().is_empty());
}

#[test]
fn delete_without_selection_does_nothing() {
    let (mut engine, _) = board();
    engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    let depth = undo_depth(&engine);

    assert!(engine.on_key_down(&Key::new("Delete"), Modifiers::default()).is_empty());
    assert_eq!(engine.store.lines().len(), 1);
    assert_eq!(undo_depth(&engine), depth);
}

#[test]
fn ctrl_z_undoes_and_ctrl_y_redoes() {
    let (mut engine, _) = board();
    engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));

    engine.on_key_down(&Key::new("z"), ctrl());
    assert!(engine.store.lines().is_empty());

    engine.on_key_down(&Key::new("y"), ctrl());
    assert_eq!(engine.store.lines().len(), 1);
}

#[test]
fn cmd_shift_z_redoes() {
    let (mut engine, _) = board();
    engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    let cmd = Modifiers { meta: true, ..Modifiers::default() };
    engine.on_key_down(&Key::new("z"), cmd);
    assert!(engine.store.lines().is_empty());

    engine.on_key_down(&Key::new("Z"), Modifiers { shift: true, ..cmd });
    assert_eq!(engine.store.lines().len(), 1);
}

#[test]
fn plain_z_is_not_undo() {
    let (mut engine, _) = board();
    engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    assert!(engine.on_key_down(&Key::new("z"), Modifiers::default()).is_empty());
    assert_eq!(engine.store.lines().len(), 1);
}

#[test]
fn shortcuts_are_suppressed_while_typing() {
    let (mut engine, _) = board();
    let id = engine.store.add_line(LineKind::Pass, PctPoint::new(20.0, 50.0), PctPoint::new(40.0, 50.0));
    engine.store.select_line(Some(id));
    engine.set_text_input_focus(true);

    assert!(engine.on_key_down(&Key::new("Delete"), Modifiers::default()).is_empty());
    assert!(engine.on_key_down(&Key::new("z"), ctrl()).is_empty());
    assert_eq!(engine.store.lines().len(), 1);

    engine.set_text_input_focus(false);
    engine.on_key_down(&Key::new("Delete"), Modifiers::default());
    assert!(engine.store.lines().is_empty());
}
