//! Document model: player tokens, the ball, tactic lines, and scene snapshots.
//!
//! All positions are percentages of pitch width/height so the document never
//! depends on viewport size. Field names serialize in camelCase (`xPct`,
//! `yPct`) to match the export format.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{PASS_STROKE_PX, PCT_CENTER, RUN_STROKE_PX};
use crate::error::BoardError;
use crate::formation::Team;
use crate::pitch::{clamp_pct, pct_distance};

/// Unique identifier for a player token.
pub type TokenId = Uuid;

/// Unique identifier for a tactic line.
pub type LineId = Uuid;

/// A position in percent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PctPoint {
    pub x_pct: f64,
    pub y_pct: f64,
}

impl PctPoint {
    #[must_use]
    pub fn new(x_pct: f64, y_pct: f64) -> Self {
        Self { x_pct, y_pct }
    }

    /// The centre spot.
    #[must_use]
    pub fn center() -> Self {
        Self::new(PCT_CENTER, PCT_CENTER)
    }

    /// This point with both coordinates clamped into `[0, 100]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(clamp_pct(self.x_pct), clamp_pct(self.y_pct))
    }
}

/// A player on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerToken {
    /// Stable identity; survives position updates and undo/redo.
    pub id: TokenId,
    pub team: Team,
    /// Jersey number. Not required to be unique.
    pub number: u32,
    pub x_pct: f64,
    pub y_pct: f64,
}

impl PlayerToken {
    #[must_use]
    pub fn pos(&self) -> PctPoint {
        PctPoint::new(self.x_pct, self.y_pct)
    }
}

/// The single ball on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallToken {
    pub x_pct: f64,
    pub y_pct: f64,
    pub visible: bool,
}

impl Default for BallToken {
    /// Centred and visible.
    fn default() -> Self {
        Self { x_pct: PCT_CENTER, y_pct: PCT_CENTER, visible: true }
    }
}

impl BallToken {
    #[must_use]
    pub fn pos(&self) -> PctPoint {
        PctPoint::new(self.x_pct, self.y_pct)
    }
}

/// What a tactic line depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Ball movement between players. Drawn solid.
    Pass,
    /// Player movement off the ball. Drawn dashed and thicker.
    Run,
}

impl LineKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Run => "run",
        }
    }

    /// Rendered stroke width in pixels.
    #[must_use]
    pub fn stroke_width(self) -> f64 {
        match self {
            Self::Pass => PASS_STROKE_PX,
            Self::Run => RUN_STROKE_PX,
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Self::Pass),
            "run" => Ok(Self::Run),
            other => Err(BoardError::UnknownLineKind(other.to_owned())),
        }
    }
}

/// A directional annotation drawn on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticLine {
    pub id: LineId,
    pub kind: LineKind,
    pub from: PctPoint,
    pub to: PctPoint,
}

impl TacticLine {
    /// Length in percent units.
    #[must_use]
    pub fn length(&self) -> f64 {
        pct_distance(self.from, self.to)
    }
}

/// Value copy of everything undo/redo restores.
///
/// Draw mode is not captured; it never rewinds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub players: Vec<PlayerToken>,
    pub ball: BallToken,
    pub lines: Vec<TacticLine>,
    pub selected_line_id: Option<LineId>,
}
