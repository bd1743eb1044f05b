//! Interaction controller: turns pointer and keyboard events into store commands.
//!
//! In [`DrawMode::Select`] a press on a token or the visible ball starts a
//! drag that moves it on every pointer-move and once more, clamped to the
//! pitch, on release. In pass/run mode a press opens a [`Draft`] that
//! follows the pointer and becomes a line on release only if it is at least
//! the minimum length. Every press clears the selection first, except a
//! select-mode press on a line, which selects it. In pass/run mode a press
//! that lands on a line still opens a draft; if it is released too short to
//! draw, the line is selected instead.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::BoardConfig;
use crate::consts::MIN_LINE_LENGTH_PCT;
use crate::doc::{LineId, PctPoint, TokenId};
use crate::hit::{Hit, hit_test};
use crate::input::{Button, Draft, DrawMode, InputState, Key, Modifiers, UiState};
use crate::pitch::{PitchGeometry, Point};
use crate::store::BoardStore;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Something visible changed (document, selection, or the draft preview).
    RenderNeeded,
    /// A draft was long enough and became a line.
    LineCreated(LineId),
    /// A draft was released below the minimum length and dropped.
    DraftDiscarded,
}

/// Core controller state. Holds the document plus everything view-local:
/// pitch geometry, UI flags and the in-flight gesture.
#[derive(Debug)]
pub struct EngineCore {
    pub store: BoardStore,
    pub pitch: PitchGeometry,
    pub ui: UiState,
    pub input: InputState,
    min_line_length: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_store(BoardStore::new(), MIN_LINE_LENGTH_PCT)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller over a fresh store built from `config`.
    #[must_use]
    pub fn with_config(config: &BoardConfig) -> Self {
        Self::with_store(BoardStore::with_config(config), config.min_line_length)
    }

    /// Controller over an existing store.
    #[must_use]
    pub fn with_store(store: BoardStore, min_line_length: f64) -> Self {
        Self {
            store,
            pitch: PitchGeometry::default(),
            ui: UiState::default(),
            input: InputState::Idle,
            min_line_length,
        }
    }

    // --- Viewport / mode ---

    /// Re-lay out the pitch for new viewport dimensions.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.pitch = PitchGeometry::from_viewport(width, height);
    }

    /// Switch draw mode. Any in-flight gesture is dropped.
    pub fn set_draw_mode(&mut self, mode: DrawMode) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.store.set_draw_mode(mode);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Tell the controller whether keyboard focus is inside a text field.
    pub fn set_text_input_focus(&mut self, focused: bool) {
        self.ui.text_input_focused = focused;
    }

    /// Discard any in-flight drag or draft without touching the document.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Drafting { .. } => vec![Action::RenderNeeded],
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The line being drafted, for preview rendering.
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match &self.input {
            InputState::Drafting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Minimum draft length in percent units.
    #[must_use]
    pub fn min_line_length(&self) -> f64 {
        self.min_line_length
    }

    /// Topmost object under a pixel position.
    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> Option<Hit> {
        hit_test(screen_pt, self.store.scene(), &self.pitch)
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        tracing::trace!(x = screen_pt.x, y = screen_pt.y, "pointer down");

        let hit = self.hit(screen_pt);
        let mode = self.store.draw_mode();
        if let (Some(Hit::Line(id)), None) = (hit, mode.line_kind()) {
            self.input = InputState::Idle;
            self.store.select_line(Some(id));
            return vec![Action::RenderNeeded];
        }

        self.store.select_line(None);

        self.input = match mode.line_kind() {
            Some(kind) => InputState::Drafting {
                draft: Draft::start(kind, self.pitch.pointer_to_pct(screen_pt)),
                pressed_line: match hit {
                    Some(Hit::Line(id)) => Some(id),
                    _ => None,
                },
            },
            None => self.begin_drag(hit, screen_pt),
        };
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Drafting { draft, .. } => {
                draft.to = self.pitch.pointer_to_pct(screen_pt);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingPlayer { id, grab_offset, moved } => {
                *moved = true;
                let (id, at) = (*id, self.pitch.px_to_pct(offset(screen_pt, *grab_offset)));
                self.store.update_player_pos(&id, at.x_pct, at.y_pct);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingBall { grab_offset, moved } => {
                *moved = true;
                let at = self.pitch.px_to_pct(offset(screen_pt, *grab_offset));
                self.store.set_ball_pos(at.x_pct, at.y_pct);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        tracing::trace!(x = screen_pt.x, y = screen_pt.y, "pointer up");

        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Drafting { draft, pressed_line } => self.finish_draft(draft, pressed_line),
            InputState::DraggingPlayer { id, grab_offset, moved } => {
                if !moved {
                    return Vec::new();
                }
                let at = self.release_pct(screen_pt, grab_offset);
                self.store.update_player_pos(&id, at.x_pct, at.y_pct);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingBall { grab_offset, moved } => {
                if !moved {
                    return Vec::new();
                }
                let at = self.release_pct(screen_pt, grab_offset);
                self.store.set_ball_pos(at.x_pct, at.y_pct);
                vec![Action::RenderNeeded]
            }
        }
    }

    // --- Keyboard ---

    /// Delete/Backspace removes the selected line; Ctrl/Cmd+Z undoes;
    /// Ctrl/Cmd+Y and Ctrl/Cmd+Shift+Z redo. Ignored while a text field has focus.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.ui.text_input_focused {
            return Vec::new();
        }

        if key.is("Delete") || key.is("Backspace") {
            if self.store.selected_line_id().is_none() {
                return Vec::new();
            }
            self.store.remove_selected_line();
            return vec![Action::RenderNeeded];
        }

        if !modifiers.command() {
            return Vec::new();
        }
        if key.is("z") && !modifiers.shift {
            self.store.undo();
            return vec![Action::RenderNeeded];
        }
        if key.is("y") || (key.is("z") && modifiers.shift) {
            self.store.redo();
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Internals ---

    fn begin_drag(&self, hit: Option<Hit>, screen_pt: Point) -> InputState {
        match hit {
            Some(Hit::Ball) => InputState::DraggingBall {
                grab_offset: grab_offset(self.pitch.pct_to_px(self.store.ball().pos()), screen_pt),
                moved: false,
            },
            Some(Hit::Player(id)) => self.begin_player_drag(id, screen_pt),
            Some(Hit::Line(_)) | None => InputState::Idle,
        }
    }

    fn begin_player_drag(&self, id: TokenId, screen_pt: Point) -> InputState {
        match self.store.player(&id) {
            Some(player) => InputState::DraggingPlayer {
                id,
                grab_offset: grab_offset(self.pitch.pct_to_px(player.pos()), screen_pt),
                moved: false,
            },
            None => InputState::Idle,
        }
    }

    fn release_pct(&self, screen_pt: Point, grab_offset: Point) -> PctPoint {
        self.pitch.px_to_pct(self.pitch.clamp_px(offset(screen_pt, grab_offset)))
    }

    fn finish_draft(&mut self, draft: Draft, pressed_line: Option<LineId>) -> Vec<Action> {
        if !draft.is_long_enough(self.min_line_length) {
            tracing::debug!(length = draft.length(), min = self.min_line_length, "draft discarded");
            if let Some(id) = pressed_line {
                self.store.select_line(Some(id));
            }
            return vec![Action::DraftDiscarded, Action::RenderNeeded];
        }
        let id = self.store.add_line(draft.kind, draft.from, draft.to);
        vec![Action::LineCreated(id), Action::RenderNeeded]
    }
}

fn grab_offset(token_px: Point, pointer_px: Point) -> Point {
    Point::new(token_px.x - pointer_px.x, token_px.y - pointer_px.y)
}

fn offset(pointer_px: Point, grab_offset: Point) -> Point {
    Point::new(pointer_px.x + grab_offset.x, pointer_px.y + grab_offset.y)
}
