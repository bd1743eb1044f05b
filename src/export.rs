//! Versioned JSON export of the board.
//!
//! ```text
//! { "version": 3,
//!   "players": [ {id, team, number, xPct, yPct}, ... ],
//!   "ball": {xPct, yPct, visible},
//!   "lines": [ {id, kind, from:{xPct,yPct}, to:{xPct,yPct}}, ... ] }
//! ```
//!
//! Selection, draw mode and history are not exported.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::Path;

use serde::Serialize;

use crate::consts::EXPORT_VERSION;
use crate::doc::{BallToken, PlayerToken, Snapshot, TacticLine};
use crate::error::BoardError;

/// Borrowed view of the exported fields of a scene.
#[derive(Debug, Serialize)]
pub struct ExportDoc<'a> {
    pub version: u32,
    pub players: &'a [PlayerToken],
    pub ball: &'a BallToken,
    pub lines: &'a [TacticLine],
}

impl<'a> ExportDoc<'a> {
    #[must_use]
    pub fn new(scene: &'a Snapshot) -> Self {
        Self {
            version: EXPORT_VERSION,
            players: &scene.players,
            ball: &scene.ball,
            lines: &scene.lines,
        }
    }
}

/// Serialize a scene as pretty-printed (2-space indented) export JSON.
pub fn export_json(scene: &Snapshot) -> Result<String, BoardError> {
    Ok(serde_json::to_string_pretty(&ExportDoc::new(scene))?)
}

/// Write export JSON to `path`, replacing any existing file.
pub fn write_export(path: &Path, json: &str) -> Result<(), BoardError> {
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), bytes = json.len(), "export written");
    Ok(())
}
