//! Error type for the parsing, configuration and export edges of the crate.
//!
//! Document commands never fail: missing ids are ignored and coordinates are
//! clamped. Only text parsing, environment configuration and writing the
//! export produce a [`BoardError`].

/// Errors returned by parsing, configuration and export operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A team name other than `A` or `B`.
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    /// A formation identifier outside the catalog.
    #[error("unknown formation: {0}")]
    UnknownFormation(String),
    /// A draw mode other than `select`, `pass` or `run`.
    #[error("unknown draw mode: {0}")]
    UnknownDrawMode(String),
    /// A line kind other than `pass` or `run`.
    #[error("unknown line kind: {0}")]
    UnknownLineKind(String),
    /// A token that should have been a number.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    /// A script line that could not be parsed.
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
    /// An environment variable held an unusable value.
    #[error("invalid config {var}: {message}")]
    Config { var: &'static str, message: String },
    /// Serializing the export document failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Reading a script or writing an export failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
