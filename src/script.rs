//! Line-oriented command scripts for driving a board without a UI.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! formation A 4-4-2
//! mode pass
//! drag 20 20 40 20      # pointer gesture in percent coordinates
//! line run 50 50 70 30  # direct store call, no length filter
//! select 0
//! delete-selected
//! undo
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::str::FromStr;

use crate::doc::{LineKind, PctPoint};
use crate::engine::{Action, EngineCore};
use crate::error::BoardError;
use crate::formation::{FormationId, Team};
use crate::input::{Button, DrawMode, Modifiers};
use crate::store::BoardStore;

/// A single parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddPlayer(Team),
    /// Move the first player of `team` wearing `number`.
    MovePlayer { team: Team, number: u32, at: PctPoint },
    Ball(PctPoint),
    BallVisible(bool),
    CenterBall,
    Formation(Team, FormationId),
    ClearTeam(Team),
    Reset,
    Mode(DrawMode),
    Line { kind: LineKind, from: PctPoint, to: PctPoint },
    /// Press at `from`, move to `to`, release: goes through the interaction controller.
    Drag { from: PctPoint, to: PctPoint },
    /// Press and release at one point.
    Click(PctPoint),
    /// Select the line at an index into the line list, or clear with `None`.
    Select(Option<usize>),
    RemoveLine(usize),
    DeleteSelected,
    ClearLines,
    Undo,
    Redo,
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<Command>, BoardError> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(raw, idx + 1)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// Parse one line. Returns `None` for blank lines and comments.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<Command>, BoardError> {
    let content = raw.split('#').next().unwrap_or("").trim();
    if content.is_empty() {
        return Ok(None);
    }
    let words: Vec<&str> = content.split_whitespace().collect();
    let fail = |message: String| BoardError::Script { line, message };
    let (name, args) = match words.split_first() {
        Some((name, args)) => (*name, args),
        None => return Ok(None),
    };

    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(fail(format!("`{name}` takes {n} argument(s), got {}", args.len())))
        }
    };
    let wrap = |e: BoardError| fail(e.to_string());

    let cmd = match name {
        "add-player" => {
            arity(1)?;
            Command::AddPlayer(parse(args[0]).map_err(wrap)?)
        }
        "move-player" => {
            arity(4)?;
            Command::MovePlayer {
                team: parse(args[0]).map_err(wrap)?,
                number: number(args[1]).map_err(wrap)?,
                at: point(args[2], args[3]).map_err(wrap)?,
            }
        }
        "ball" => {
            arity(2)?;
            Command::Ball(point(args[0], args[1]).map_err(wrap)?)
        }
        "ball-visible" => {
            arity(1)?;
            Command::BallVisible(boolean(args[0]).map_err(wrap)?)
        }
        "center-ball" => {
            arity(0)?;
            Command::CenterBall
        }
        "formation" => {
            arity(2)?;
            Command::Formation(parse(args[0]).map_err(wrap)?, parse(args[1]).map_err(wrap)?)
        }
        "clear-team" => {
            arity(1)?;
            Command::ClearTeam(parse(args[0]).map_err(wrap)?)
        }
        "reset" => {
            arity(0)?;
            Command::Reset
        }
        "mode" => {
            arity(1)?;
            Command::Mode(parse(args[0]).map_err(wrap)?)
        }
        "line" => {
            arity(5)?;
            Command::Line {
                kind: parse(args[0]).map_err(wrap)?,
                from: point(args[1], args[2]).map_err(wrap)?,
                to: point(args[3], args[4]).map_err(wrap)?,
            }
        }
        "drag" | "draw" => {
            arity(4)?;
            Command::Drag {
                from: point(args[0], args[1]).map_err(wrap)?,
                to: point(args[2], args[3]).map_err(wrap)?,
            }
        }
        "click" => {
            arity(2)?;
            Command::Click(point(args[0], args[1]).map_err(wrap)?)
        }
        "select" => {
            arity(1)?;
            if args[0] == "none" {
                Command::Select(None)
            } else {
                Command::Select(Some(index(args[0]).map_err(wrap)?))
            }
        }
        "remove-line" => {
            arity(1)?;
            Command::RemoveLine(index(args[0]).map_err(wrap)?)
        }
        "delete-selected" => {
            arity(0)?;
            Command::DeleteSelected
        }
        "clear-lines" => {
            arity(0)?;
            Command::ClearLines
        }
        "undo" => {
            arity(0)?;
            Command::Undo
        }
        "redo" => {
            arity(0)?;
            Command::Redo
        }
        other => return Err(fail(format!("unknown command `{other}`"))),
    };
    Ok(Some(cmd))
}

fn parse<T: FromStr<Err = BoardError>>(raw: &str) -> Result<T, BoardError> {
    raw.parse()
}

fn number(raw: &str) -> Result<u32, BoardError> {
    raw.parse().map_err(|_| BoardError::InvalidNumber(raw.to_owned()))
}

fn index(raw: &str) -> Result<usize, BoardError> {
    raw.parse().map_err(|_| BoardError::InvalidNumber(raw.to_owned()))
}

fn coord(raw: &str) -> Result<f64, BoardError> {
    raw.parse().map_err(|_| BoardError::InvalidNumber(raw.to_owned()))
}

fn point(x: &str, y: &str) -> Result<PctPoint, BoardError> {
    Ok(PctPoint::new(coord(x)?, coord(y)?))
}

fn boolean(raw: &str) -> Result<bool, BoardError> {
    match raw {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(BoardError::InvalidNumber(other.to_owned())),
    }
}

/// Run one command against the engine, returning the controller's actions
/// for gesture and mode commands and an empty list otherwise.
pub fn apply(engine: &mut EngineCore, cmd: &Command) -> Vec<Action> {
    match cmd {
        Command::Mode(mode) => engine.set_draw_mode(*mode),
        Command::Drag { from, to } => drag(engine, *from, *to),
        Command::Click(at) => click(engine, *at),
        _ => {
            apply_to_store(&mut engine.store, cmd);
            Vec::new()
        }
    }
}

fn apply_to_store(store: &mut BoardStore, cmd: &Command) {
    match cmd {
        Command::AddPlayer(team) => {
            store.add_player(*team);
        }
        Command::MovePlayer { team, number, at } => {
            let found = store
                .players()
                .iter()
                .find(|p| p.team == *team && p.number == *number)
                .map(|p| p.id);
            match found {
                Some(id) => store.update_player_pos(&id, at.x_pct, at.y_pct),
                None => tracing::warn!(%team, number, "move-player: no such player"),
            }
        }
        Command::Ball(at) => store.set_ball_pos(at.x_pct, at.y_pct),
        Command::BallVisible(visible) => store.set_ball_visible(*visible),
        Command::CenterBall => store.center_ball(),
        Command::Formation(team, formation) => store.apply_formation(*team, *formation),
        Command::ClearTeam(team) => store.clear_team(*team),
        Command::Reset => store.reset(),
        Command::Line { kind, from, to } => {
            store.add_line(*kind, *from, *to);
        }
        Command::Select(None) => store.select_line(None),
        Command::Select(Some(index)) => match store.lines().get(*index).map(|l| l.id) {
            Some(id) => store.select_line(Some(id)),
            None => tracing::warn!(index, "select: no such line"),
        },
        Command::RemoveLine(index) => match store.lines().get(*index).map(|l| l.id) {
            Some(id) => store.remove_line(&id),
            None => tracing::warn!(index, "remove-line: no such line"),
        },
        Command::DeleteSelected => store.remove_selected_line(),
        Command::ClearLines => store.clear_lines(),
        Command::Undo => store.undo(),
        Command::Redo => store.redo(),
        Command::Mode(_) | Command::Drag { .. } | Command::Click(_) => {}
    }
}

/// Run every command in order.
pub fn run(engine: &mut EngineCore, commands: &[Command]) -> Vec<Action> {
    commands.iter().flat_map(|cmd| apply(engine, cmd)).collect()
}

fn click(engine: &mut EngineCore, at: PctPoint) -> Vec<Action> {
    let px = engine.pitch.pct_to_px(at);
    let mut actions = engine.on_pointer_down(px, Button::Primary, Modifiers::default());
    actions.extend(engine.on_pointer_up(px, Button::Primary, Modifiers::default()));
    actions
}

fn drag(engine: &mut EngineCore, from: PctPoint, to: PctPoint) -> Vec<Action> {
    let start = engine.pitch.pct_to_px(from);
    let end = engine.pitch.pct_to_px(to);
    let mut actions = engine.on_pointer_down(start, Button::Primary, Modifiers::default());
    actions.extend(engine.on_pointer_move(end, Modifiers::default()));
    actions.extend(engine.on_pointer_up(end, Button::Primary, Modifiers::default()));
    actions
}
