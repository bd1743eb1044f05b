//! Pitch geometry: clamping and conversion between percent and pixel space.
//!
//! The document stores every position as a percentage of pitch width/height.
//! A [`PitchGeometry`] describes where the pitch sits inside a viewport so the
//! host and the interaction controller can move between the two spaces:
//! `pixel = pct / 100 * pitch_dimension + pitch_origin`.

#[cfg(test)]
#[path = "pitch_test.rs"]
mod pitch_test;

use crate::consts::{
    BALL_RADIUS_RATIO, MIN_BALL_RADIUS_PX, MIN_PITCH_PADDING_PX, MIN_TOKEN_RADIUS_PX, MIN_VIEWPORT_WIDTH_PX,
    PCT_MAX, PCT_MIN, PITCH_PADDING_RATIO, TOKEN_RADIUS_RATIO, VIEWPORT_ASPECT,
};
use crate::doc::PctPoint;

/// A point in screen (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clamp a percent coordinate into `[0, 100]`. NaN maps to `0`.
#[must_use]
pub fn clamp_pct(v: f64) -> f64 {
    if v.is_nan() {
        return PCT_MIN;
    }
    v.clamp(PCT_MIN, PCT_MAX)
}

/// Euclidean distance between two percent-space points.
#[must_use]
pub fn pct_distance(a: PctPoint, b: PctPoint) -> f64 {
    (b.x_pct - a.x_pct).hypot(b.y_pct - a.y_pct)
}

/// Viewport size for a container of the given width: at least
/// [`MIN_VIEWPORT_WIDTH_PX`] wide, with a 5:3 aspect ratio.
#[must_use]
pub fn viewport_for_width(container_width: f64) -> (f64, f64) {
    let w = container_width.max(MIN_VIEWPORT_WIDTH_PX);
    let h = (w * VIEWPORT_ASPECT).round();
    (w, h)
}

/// Padding between the viewport edge and the pitch outline.
#[must_use]
pub fn padding_for_width(viewport_width: f64) -> f64 {
    (viewport_width * PITCH_PADDING_RATIO).round().max(MIN_PITCH_PADDING_PX)
}

/// Placement of the pitch rectangle inside the viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchGeometry {
    /// Left edge of the pitch.
    pub x0: f64,
    /// Top edge of the pitch.
    pub y0: f64,
    /// Pitch width.
    pub width: f64,
    /// Pitch height.
    pub height: f64,
}

impl Default for PitchGeometry {
    fn default() -> Self {
        Self::from_viewport(900.0, 540.0)
    }
}

impl PitchGeometry {
    /// Lay the pitch out inside a viewport, inset by the proportional padding.
    #[must_use]
    pub fn from_viewport(viewport_width: f64, viewport_height: f64) -> Self {
        let pad = padding_for_width(viewport_width);
        Self {
            x0: pad,
            y0: pad,
            width: (viewport_width - 2.0 * pad).max(0.0),
            height: (viewport_height - 2.0 * pad).max(0.0),
        }
    }

    /// Right edge of the pitch.
    #[must_use]
    pub fn x1(&self) -> f64 {
        self.x0 + self.width
    }

    /// Bottom edge of the pitch.
    #[must_use]
    pub fn y1(&self) -> f64 {
        self.y0 + self.height
    }

    /// Convert a document position to a pixel position.
    #[must_use]
    pub fn pct_to_px(&self, pct: PctPoint) -> Point {
        Point {
            x: pct.x_pct / 100.0 * self.width + self.x0,
            y: pct.y_pct / 100.0 * self.height + self.y0,
        }
    }

    /// Convert a pixel position to percent space without clamping.
    #[must_use]
    pub fn px_to_pct(&self, px: Point) -> PctPoint {
        PctPoint {
            x_pct: offset_to_pct(px.x - self.x0, self.width),
            y_pct: offset_to_pct(px.y - self.y0, self.height),
        }
    }

    /// Clamp a pixel position into the pitch rectangle.
    #[must_use]
    pub fn clamp_px(&self, px: Point) -> Point {
        Point {
            x: px.x.clamp(self.x0, self.x1()),
            y: px.y.clamp(self.y0, self.y1()),
        }
    }

    /// Clamp a pointer position to the pitch, then convert it to percent space.
    #[must_use]
    pub fn pointer_to_pct(&self, px: Point) -> PctPoint {
        self.px_to_pct(self.clamp_px(px))
    }

    /// Radius of a player token.
    #[must_use]
    pub fn token_radius(&self) -> f64 {
        (self.width.min(self.height) * TOKEN_RADIUS_RATIO)
            .round()
            .max(MIN_TOKEN_RADIUS_PX)
    }

    /// Radius of the ball.
    #[must_use]
    pub fn ball_radius(&self) -> f64 {
        (self.token_radius() * BALL_RADIUS_RATIO)
            .round()
            .max(MIN_BALL_RADIUS_PX)
    }
}

fn offset_to_pct(offset: f64, size: f64) -> f64 {
    if size > 0.0 { offset / size * 100.0 } else { PCT_MIN }
}
