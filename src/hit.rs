//! Hit-testing in pixel space.
//!
//! Objects are tested topmost first, in the order the board is drawn:
//! lines (newest on top), then the ball when visible, then players (last in
//! the list on top).

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::LINE_HIT_SLOP_PX;
use crate::doc::{LineId, Snapshot, TokenId};
use crate::pitch::{PitchGeometry, Point};

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Line(LineId),
    Ball,
    Player(TokenId),
}

/// Find the topmost object under `px`, if any.
#[must_use]
pub fn hit_test(px: Point, scene: &Snapshot, pitch: &PitchGeometry) -> Option<Hit> {
    for line in scene.lines.iter().rev() {
        let a = pitch.pct_to_px(line.from);
        let b = pitch.pct_to_px(line.to);
        let tolerance = line.kind.stroke_width() / 2.0 + LINE_HIT_SLOP_PX;
        if distance_to_segment(px, a, b) <= tolerance {
            return Some(Hit::Line(line.id));
        }
    }

    if scene.ball.visible {
        let centre = pitch.pct_to_px(scene.ball.pos());
        if distance(px, centre) <= pitch.ball_radius() {
            return Some(Hit::Ball);
        }
    }

    let radius = pitch.token_radius();
    scene
        .players
        .iter()
        .rev()
        .find(|p| distance(px, pitch.pct_to_px(p.pos())) <= radius)
        .map(|p| Hit::Player(p.id))
}

fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Shortest distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + t * dx, a.y + t * dy))
}
