//! Shared numeric constants for the board crate.

// ── Document space ──────────────────────────────────────────────

/// Lower bound of every percent coordinate.
pub const PCT_MIN: f64 = 0.0;

/// Upper bound of every percent coordinate.
pub const PCT_MAX: f64 = 100.0;

/// Centre of the pitch on either axis, in percent.
pub const PCT_CENTER: f64 = 50.0;

/// Drafts shorter than this (percent-space Euclidean distance) are discarded.
pub const MIN_LINE_LENGTH_PCT: f64 = 1.5;

/// `version` field written by the JSON export.
pub const EXPORT_VERSION: u32 = 3;

/// File name used when no export path is configured.
pub const DEFAULT_EXPORT_PATH: &str = "sboard-tactic.json";

/// Players per side in every catalog formation.
pub const SQUAD_SIZE: usize = 11;

// ── Layout ──────────────────────────────────────────────────────

/// Narrowest viewport the board will lay itself out in, in CSS pixels.
pub const MIN_VIEWPORT_WIDTH_PX: f64 = 320.0;

/// Viewport height as a fraction of its width (5:3 pitch).
pub const VIEWPORT_ASPECT: f64 = 3.0 / 5.0;

/// Pitch padding as a fraction of viewport width.
pub const PITCH_PADDING_RATIO: f64 = 0.02;

/// Smallest pitch padding, in pixels.
pub const MIN_PITCH_PADDING_PX: f64 = 12.0;

/// Player token radius as a fraction of the shorter pitch side.
pub const TOKEN_RADIUS_RATIO: f64 = 0.035;

/// Smallest player token radius, in pixels.
pub const MIN_TOKEN_RADIUS_PX: f64 = 14.0;

/// Ball radius as a fraction of the token radius.
pub const BALL_RADIUS_RATIO: f64 = 0.55;

/// Smallest ball radius, in pixels.
pub const MIN_BALL_RADIUS_PX: f64 = 8.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Stroke width of a pass line, in pixels.
pub const PASS_STROKE_PX: f64 = 3.0;

/// Stroke width of a run line, in pixels.
pub const RUN_STROKE_PX: f64 = 5.0;

/// Extra pixels beyond half the stroke width at which a line still counts as hit.
pub const LINE_HIT_SLOP_PX: f64 = 2.0;
