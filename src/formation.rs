//! Teams and the preset formation catalog.
//!
//! Catalog positions are authored for the home side attacking rightward.
//! The away side mirrors x (`100 - x`) and keeps y.

#[cfg(test)]
#[path = "formation_test.rs"]
mod formation_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{PCT_MAX, SQUAD_SIZE};
use crate::doc::PlayerToken;
use crate::error::BoardError;

/// Which side a token plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Home side, attacking rightward.
    A,
    /// Away side, attacking leftward.
    B,
}

impl Team {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            other => Err(BoardError::UnknownTeam(other.to_owned())),
        }
    }
}

/// A preset formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationId {
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-2-3-1")]
    F4231,
}

impl FormationId {
    /// Every formation in the catalog, in menu order.
    pub const ALL: [Self; 4] = [Self::F442, Self::F433, Self::F352, Self::F4231];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F442 => "4-4-2",
            Self::F433 => "4-3-3",
            Self::F352 => "3-5-2",
            Self::F4231 => "4-2-3-1",
        }
    }
}

impl fmt::Display for FormationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormationId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| BoardError::UnknownFormation(s.to_owned()))
    }
}

type Slots = [(f64, f64); SQUAD_SIZE];

// Index 0 is the goalkeeper; the rest run defence to attack, top to bottom.
const F442: Slots = [
    (8.0, 50.0),
    (22.0, 18.0),
    (22.0, 40.0),
    (22.0, 60.0),
    (22.0, 82.0),
    (50.0, 18.0),
    (50.0, 40.0),
    (50.0, 60.0),
    (50.0, 82.0),
    (78.0, 40.0),
    (78.0, 60.0),
];

const F433: Slots = [
    (8.0, 50.0),
    (22.0, 18.0),
    (22.0, 40.0),
    (22.0, 60.0),
    (22.0, 82.0),
    (50.0, 30.0),
    (50.0, 50.0),
    (50.0, 70.0),
    (78.0, 25.0),
    (82.0, 50.0),
    (78.0, 75.0),
];

const F352: Slots = [
    (8.0, 50.0),
    (22.0, 30.0),
    (22.0, 50.0),
    (22.0, 70.0),
    (44.0, 15.0),
    (44.0, 35.0),
    (50.0, 50.0),
    (44.0, 65.0),
    (44.0, 85.0),
    (78.0, 40.0),
    (78.0, 60.0),
];

const F4231: Slots = [
    (8.0, 50.0),
    (22.0, 18.0),
    (22.0, 40.0),
    (22.0, 60.0),
    (22.0, 82.0),
    (44.0, 40.0),
    (44.0, 60.0),
    (62.0, 25.0),
    (62.0, 50.0),
    (62.0, 75.0),
    (82.0, 50.0),
];

/// Home-side positions for a formation, goalkeeper first.
#[must_use]
pub fn formation_positions(formation: FormationId) -> &'static [(f64, f64); SQUAD_SIZE] {
    match formation {
        FormationId::F442 => &F442,
        FormationId::F433 => &F433,
        FormationId::F352 => &F352,
        FormationId::F4231 => &F4231,
    }
}

/// Eleven fresh tokens for `team` laid out in `formation`.
///
/// Jersey numbers run 1..=11 in catalog order. Every call mints new ids.
#[must_use]
pub fn instantiate(team: Team, formation: FormationId) -> Vec<PlayerToken> {
    formation_positions(formation)
        .iter()
        .zip(1u32..)
        .map(|(&(x, y), number)| PlayerToken {
            id: Uuid::new_v4(),
            team,
            number,
            x_pct: match team {
                Team::A => x,
                Team::B => PCT_MAX - x,
            },
            y_pct: y,
        })
        .collect()
}
