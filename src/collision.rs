//! Collision and outcome resolution.
//!
//! Two families: geometric overlap (rect/rect, circle/rect) and tiered
//! proximity classification for timing-based judgements.

use crate::config::ProximityThresholds;
use crate::entities::{Rect, Vec2};

// ── Geometric overlap ─────────────────────────────────────────────────────────

/// Strict AABB overlap; touching edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Which face of the rectangle the circle touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    /// The circle's centre is inside the rectangle.
    Inside,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub side: Side,
}

/// Circle/rect test via the clamped closest point.
pub fn circle_rect_contact(center: Vec2, radius: f32, rect: &Rect) -> Option<Contact> {
    let closest = rect.clamp(center);
    let dx = center.x - closest.x;
    let dy = center.y - closest.y;
    if dx * dx + dy * dy >= radius * radius {
        return None;
    }

    let side = if dx == 0.0 && dy == 0.0 {
        Side::Inside
    } else if dx.abs() > dy.abs() {
        if dx < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    } else if dy < 0.0 {
        Side::Top
    } else {
        Side::Bottom
    };

    Some(Contact { side })
}

/// Circle/circle overlap (strict).
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

// ── Proximity classification ──────────────────────────────────────────────────

/// Absolute distances between a reference point and a target on up to
/// three axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl Proximity {
    pub fn between(reference: Vec2, reference_depth: f32, target: Vec2, target_depth: f32) -> Self {
        Self {
            dx: (reference.x - target.x).abs(),
            dy: (reference.y - target.y).abs(),
            dz: (reference_depth - target_depth).abs(),
        }
    }

    pub fn within(&self, t: &ProximityThresholds) -> bool {
        self.dz < t.depth && self.dx < t.x && self.dy < t.y
    }
}

/// Return the first tier whose thresholds are all satisfied. Tiers must be
/// ordered best (tightest) first, so a value that satisfies several tiers
/// resolves to the most precise one.
pub fn classify<T: Copy>(p: &Proximity, tiers: &[(T, ProximityThresholds)]) -> Option<T> {
    tiers.iter().find(|(_, t)| p.within(t)).map(|(tier, _)| *tier)
}
