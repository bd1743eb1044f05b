//! Board configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::consts::{DEFAULT_EXPORT_PATH, MIN_LINE_LENGTH_PCT};
use crate::error::BoardError;

pub const HISTORY_LIMIT_VAR: &str = "SBOARD_HISTORY_LIMIT";
pub const MIN_LINE_LENGTH_VAR: &str = "SBOARD_MIN_LINE_LENGTH";
pub const EXPORT_PATH_VAR: &str = "SBOARD_EXPORT_PATH";
pub const LOG_VAR: &str = "SBOARD_LOG";

const VARS: [&str; 4] = [HISTORY_LIMIT_VAR, MIN_LINE_LENGTH_VAR, EXPORT_PATH_VAR, LOG_VAR];

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Cap on undo and redo depth. `None` keeps every snapshot.
    pub history_limit: Option<usize>,
    /// Shortest draft, in percent units, that becomes a line.
    pub min_line_length: f64,
    /// Where exports are written when no path is given.
    pub export_path: PathBuf,
    /// Maximum tracing level for the CLI subscriber.
    pub log_level: Level,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            min_line_length: MIN_LINE_LENGTH_PCT,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            log_level: Level::WARN,
        }
    }
}

impl BoardConfig {
    /// Build config from environment variables.
    ///
    /// All optional:
    /// - `SBOARD_HISTORY_LIMIT`: max undo/redo depth; `0` or absent means unbounded
    /// - `SBOARD_MIN_LINE_LENGTH`: default 1.5
    /// - `SBOARD_EXPORT_PATH`: default `sboard-tactic.json`
    /// - `SBOARD_LOG`: `error|warn|info|debug|trace`, default `warn`
    ///
    /// A set variable that is not valid Unicode is a config error.
    pub fn from_env() -> Result<Self, BoardError> {
        let mut values = HashMap::new();
        for var in VARS {
            if let Some(value) = env_value(var, std::env::var(var))? {
                values.insert(var, value);
            }
        }
        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Build config from an arbitrary key lookup. Blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoardError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let history_limit = match get(HISTORY_LIMIT_VAR) {
            Some(raw) => match parse_var::<usize>(HISTORY_LIMIT_VAR, &raw)? {
                0 => None,
                n => Some(n),
            },
            None => defaults.history_limit,
        };

        let min_line_length = match get(MIN_LINE_LENGTH_VAR) {
            Some(raw) => {
                let v = parse_var::<f64>(MIN_LINE_LENGTH_VAR, &raw)?;
                if !v.is_finite() || v < 0.0 {
                    return Err(BoardError::Config {
                        var: MIN_LINE_LENGTH_VAR,
                        message: format!("expected a finite non-negative number, got {raw}"),
                    });
                }
                v
            }
            None => defaults.min_line_length,
        };

        let export_path = get(EXPORT_PATH_VAR).map_or(defaults.export_path, PathBuf::from);

        let log_level = match get(LOG_VAR) {
            Some(raw) => parse_var::<Level>(LOG_VAR, &raw)?,
            None => defaults.log_level,
        };

        Ok(Self { history_limit, min_line_length, export_path, log_level })
    }
}

fn env_value(var: &'static str, result: Result<String, VarError>) -> Result<Option<String>, BoardError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            Err(BoardError::Config { var, message: format!("not valid unicode: {raw:?}") })
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: &str) -> Result<T, BoardError> {
    raw.parse::<T>().map_err(|_| BoardError::Config { var, message: format!("cannot parse {raw:?}") })
}
