//! Input model: draw modes, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `DrawMode` decides how a pointer-down is interpreted. `InputState` is the
//! gesture being tracked between pointer-down and pointer-up, carrying what
//! the controller needs to issue store commands while the pointer moves and
//! once more on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::{LineId, LineKind, PctPoint, TokenId};
use crate::error::BoardError;
use crate::pitch::{Point, pct_distance};

/// Global pointer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Drag tokens and the ball; click lines to select them.
    #[default]
    Select,
    /// Press-drag-release draws a pass line.
    Pass,
    /// Press-drag-release draws a run line.
    Run,
}

impl DrawMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Pass => "pass",
            Self::Run => "run",
        }
    }

    /// The kind of line this mode drafts, if any.
    #[must_use]
    pub fn line_kind(self) -> Option<LineKind> {
        match self {
            Self::Select => None,
            Self::Pass => Some(LineKind::Pass),
            Self::Run => Some(LineKind::Run),
        }
    }

    /// Whether tokens and the ball can be dragged in this mode.
    #[must_use]
    pub fn tokens_draggable(self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "pass" => Ok(Self::Pass),
            "run" => Ok(Self::Run),
            other => Err(BoardError::UnknownDrawMode(other.to_owned())),
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Case-insensitive comparison against a key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Persistent UI state that is not part of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    /// Keyboard focus is inside a text field; board shortcuts are suppressed.
    pub text_input_focused: bool,
}

/// A line being drawn but not yet committed to the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub kind: LineKind,
    pub from: PctPoint,
    pub to: PctPoint,
}

impl Draft {
    /// A zero-length draft anchored at `at`.
    #[must_use]
    pub fn start(kind: LineKind, at: PctPoint) -> Self {
        Self { kind, from: at, to: at }
    }

    /// Length in percent units.
    #[must_use]
    pub fn length(&self) -> f64 {
        pct_distance(self.from, self.to)
    }

    /// Whether this draft is long enough to become a line.
    #[must_use]
    pub fn is_long_enough(&self, min_length: f64) -> bool {
        self.length() >= min_length
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A player token is being dragged.
    DraggingPlayer {
        id: TokenId,
        /// Token centre minus pointer position at grab time, in pixels.
        grab_offset: Point,
        /// Set once the pointer has moved; a press without motion mutates nothing.
        moved: bool,
    },
    /// The ball is being dragged.
    DraggingBall {
        /// Ball centre minus pointer position at grab time, in pixels.
        grab_offset: Point,
        moved: bool,
    },
    /// A pass/run line is being drafted.
    Drafting {
        draft: Draft,
        /// Line under the pointer at press time. A release too short to
        /// draw selects it instead.
        pressed_line: Option<LineId>,
    },
}
