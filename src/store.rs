//! The board document and its command surface.
//!
//! `BoardStore` is the sole owner and sole writer of the live scene. Every
//! content-changing command records the pre-mutation scene in [`History`]
//! and then applies its change, so undo always returns to the state right
//! before the last edit. Selection and draw-mode changes, reads, export and
//! undo/redo themselves never commit.
//!
//! Commands that target a missing id still commit and then change nothing.
//! The one guarded case is [`BoardStore::remove_selected_line`] with no
//! selection, which neither commits nor mutates.
//!
//! Hosts observe changes through [`BoardStore::subscribe`]; each listener
//! receives the list of [`Field`]s a command touched.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fmt;

use uuid::Uuid;

use crate::config::BoardConfig;
use crate::doc::{BallToken, LineId, LineKind, PctPoint, PlayerToken, Snapshot, TacticLine, TokenId};
use crate::error::BoardError;
use crate::export;
use crate::formation::{self, FormationId, Team};
use crate::history::History;
use crate::input::DrawMode;

/// Home side's formation after construction and reset.
pub const DEFAULT_HOME_FORMATION: FormationId = FormationId::F433;

/// Away side's formation after construction and reset.
pub const DEFAULT_AWAY_FORMATION: FormationId = FormationId::F442;

/// A slice of board state that a command may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Players,
    Ball,
    Lines,
    Selection,
    DrawMode,
    /// Undo/redo availability.
    History,
}

const SCENE_FIELDS: [Field; 5] = [Field::Players, Field::Ball, Field::Lines, Field::Selection, Field::History];

/// Handle returned by [`BoardStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&[Field])>;

/// The live board: players, ball, lines, selection, draw mode and history.
pub struct BoardStore {
    scene: Snapshot,
    draw_mode: DrawMode,
    history: History,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::with_history(History::new())
    }
}

impl fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardStore")
            .field("scene", &self.scene)
            .field("draw_mode", &self.draw_mode)
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl BoardStore {
    /// A board in its default state with unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A board in its default state with the configured history cap.
    #[must_use]
    pub fn with_config(config: &BoardConfig) -> Self {
        Self::with_history(History::with_capacity(config.history_limit))
    }

    fn with_history(history: History) -> Self {
        Self {
            scene: Snapshot {
                players: default_players(),
                ball: BallToken::default(),
                lines: Vec::new(),
                selected_line_id: None,
            },
            draw_mode: DrawMode::default(),
            history,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    // --- Queries ---

    /// All players in draw order; later entries sit on top.
    #[must_use]
    pub fn players(&self) -> &[PlayerToken] {
        &self.scene.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &TokenId) -> Option<&PlayerToken> {
        self.scene.players.iter().find(|p| p.id == *id)
    }

    /// The ball, including its visibility flag.
    #[must_use]
    pub fn ball(&self) -> &BallToken {
        &self.scene.ball
    }

    /// Lines in creation order, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[TacticLine] {
        &self.scene.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&TacticLine> {
        self.scene.lines.iter().find(|l| l.id == *id)
    }

    /// Current pointer mode. Not part of undo history.
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// The selected line, if any. Always names an existing line.
    #[must_use]
    pub fn selected_line_id(&self) -> Option<LineId> {
        self.scene.selected_line_id
    }

    /// The live scene (everything undo/redo restores).
    #[must_use]
    pub fn scene(&self) -> &Snapshot {
        &self.scene
    }

    /// Undo/redo stacks, for depth queries.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether `undo` would restore anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether `redo` would restore anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Pretty-printed export JSON of players, ball and lines.
    pub fn export_json(&self) -> Result<String, BoardError> {
        export::export_json(&self.scene)
    }

    // --- Subscriptions ---

    /// Register a listener called after every state change with the fields it touched.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Field]) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, fields: &[Field]) {
        for (_, listener) in &mut self.listeners {
            listener(fields);
        }
    }

    /// Commit the pre-mutation scene, apply `change`, then notify.
    fn edit<R>(&mut self, fields: &[Field], change: impl FnOnce(&mut Snapshot) -> R) -> R {
        self.history.commit(&self.scene);
        let out = change(&mut self.scene);
        self.notify(fields);
        out
    }

    // --- Players ---

    /// Add a player for `team` on the centre spot, numbered one past the
    /// team's current highest number.
    pub fn add_player(&mut self, team: Team) -> TokenId {
        let id = Uuid::new_v4();
        self.edit(&[Field::Players, Field::History], |scene| {
            let number = scene
                .players
                .iter()
                .filter(|p| p.team == team)
                .map(|p| p.number)
                .max()
                .unwrap_or(0)
                + 1;
            let at = PctPoint::center();
            scene.players.push(PlayerToken { id, team, number, x_pct: at.x_pct, y_pct: at.y_pct });
        });
        id
    }

    /// Move a player, clamping to the pitch.
    pub fn update_player_pos(&mut self, id: &TokenId, x_pct: f64, y_pct: f64) {
        let at = PctPoint::new(x_pct, y_pct).clamped();
        self.edit(&[Field::Players, Field::History], |scene| {
            if let Some(p) = scene.players.iter_mut().find(|p| p.id == *id) {
                p.x_pct = at.x_pct;
                p.y_pct = at.y_pct;
            }
        });
    }

    /// Replace `team`'s players with a fresh instance of `formation`.
    /// The other team's tokens keep their ids and positions.
    pub fn apply_formation(&mut self, team: Team, formation: FormationId) {
        let formed = formation::instantiate(team, formation);
        self.edit(&[Field::Players, Field::History], |scene| {
            scene.players.retain(|p| p.team != team);
            scene.players.extend(formed);
        });
    }

    /// Remove every player of `team`.
    pub fn clear_team(&mut self, team: Team) {
        self.edit(&[Field::Players, Field::History], |scene| {
            scene.players.retain(|p| p.team != team);
        });
    }

    /// Restore the default line-ups and re-centre the ball. Lines and
    /// selection are kept.
    pub fn reset(&mut self) {
        let players = default_players();
        self.edit(&[Field::Players, Field::Ball, Field::History], |scene| {
            scene.players = players;
            scene.ball = BallToken::default();
        });
    }

    // --- Ball ---

    /// Move the ball, clamping to the pitch. Visibility is unchanged.
    pub fn set_ball_pos(&mut self, x_pct: f64, y_pct: f64) {
        let at = PctPoint::new(x_pct, y_pct).clamped();
        self.edit(&[Field::Ball, Field::History], |scene| {
            scene.ball.x_pct = at.x_pct;
            scene.ball.y_pct = at.y_pct;
        });
    }

    pub fn set_ball_visible(&mut self, visible: bool) {
        self.edit(&[Field::Ball, Field::History], |scene| {
            scene.ball.visible = visible;
        });
    }

    /// Put the ball on the centre spot and show it.
    pub fn center_ball(&mut self) {
        self.edit(&[Field::Ball, Field::History], |scene| {
            scene.ball = BallToken::default();
        });
    }

    // --- Draw mode ---

    /// Switch pointer mode. Not recorded in history.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
        self.notify(&[Field::DrawMode]);
    }

    // --- Lines ---

    /// Append a line with both endpoints clamped. No minimum length is
    /// enforced here.
    pub fn add_line(&mut self, kind: LineKind, from: PctPoint, to: PctPoint) -> LineId {
        let line = TacticLine { id: Uuid::new_v4(), kind, from: from.clamped(), to: to.clamped() };
        let id = line.id;
        self.edit(&[Field::Lines, Field::History], |scene| {
            scene.lines.push(line);
        });
        tracing::debug!(%id, %kind, "line added");
        id
    }

    /// Remove a line, clearing the selection if it pointed at it.
    pub fn remove_line(&mut self, id: &LineId) {
        self.edit(&[Field::Lines, Field::Selection, Field::History], |scene| {
            scene.lines.retain(|l| l.id != *id);
            if scene.selected_line_id.as_ref() == Some(id) {
                scene.selected_line_id = None;
            }
        });
    }

    /// Remove every line and clear the selection.
    pub fn clear_lines(&mut self) {
        self.edit(&[Field::Lines, Field::Selection, Field::History], |scene| {
            scene.lines.clear();
            scene.selected_line_id = None;
        });
    }

    /// Select a line, or clear the selection with `None`. Ids that name no
    /// line are ignored. Not recorded in history.
    pub fn select_line(&mut self, id: Option<LineId>) {
        if let Some(id) = id {
            if self.line(&id).is_none() {
                tracing::debug!(%id, "select ignored: no such line");
                return;
            }
        }
        self.scene.selected_line_id = id;
        self.notify(&[Field::Selection]);
    }

    /// Remove the selected line. Does nothing, and records nothing, when no
    /// line is selected.
    pub fn remove_selected_line(&mut self) {
        if let Some(id) = self.scene.selected_line_id {
            self.remove_line(&id);
        }
    }

    // --- History ---

    /// Step back one edit. No-op with empty history.
    pub fn undo(&mut self) {
        if self.history.undo(&mut self.scene) {
            self.notify(&SCENE_FIELDS);
        }
    }

    /// Step forward one undone edit. No-op with nothing to redo.
    pub fn redo(&mut self) {
        if self.history.redo(&mut self.scene) {
            self.notify(&SCENE_FIELDS);
        }
    }
}

fn default_players() -> Vec<PlayerToken> {
    let mut players = formation::instantiate(Team::A, DEFAULT_HOME_FORMATION);
    players.extend(formation::instantiate(Team::B, DEFAULT_AWAY_FORMATION));
    players
}
