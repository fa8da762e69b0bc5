//! Score/session tracking: score, combo, terminal resources and rank labels.

use serde::{Deserialize, Serialize};

// ── Score + combo ─────────────────────────────────────────────────────────────

/// Score, combo and max-combo for one session.
///
/// Score is unsigned; penalties saturate at zero. Combo is reset to zero on
/// any failure and only ever grows by one per qualifying success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    combo: u32,
    max_combo: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Add points without touching the combo.
    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Count a qualifying success; returns the new combo.
    pub fn extend_combo(&mut self) -> u32 {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.combo
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }

    /// Subtract a penalty, clamping the score at zero. Breaks the combo.
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
        self.combo = 0;
    }
}

// ── Terminal resources ────────────────────────────────────────────────────────

/// A countable quantity (lives, shots, outs) whose exhaustion ends a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    remaining: u32,
    initial: u32,
}

impl Resource {
    pub fn new(initial: u32) -> Self {
        Self {
            remaining: initial,
            initial,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// Consume one unit; returns `false` if nothing was left.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn set_remaining(&mut self, remaining: u32) {
        self.remaining = remaining.min(self.initial);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

// ── Rank ladder ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankTier {
    /// Inclusive lower bound.
    pub min: f32,
    pub label: String,
}

/// Ordered thresholds mapping a final value (score or score ratio) to a
/// label. Evaluated highest-first; anything below the lowest tier gets the
/// floor label, so every value maps to exactly one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankLadder {
    pub tiers: Vec<RankTier>,
    pub floor: String,
}

impl RankLadder {
    pub fn new(tiers: &[(f32, &str)], floor: &str) -> Self {
        let mut tiers: Vec<RankTier> = tiers
            .iter()
            .map(|&(min, label)| RankTier {
                min,
                label: label.to_string(),
            })
            .collect();
        tiers.sort_by(|a, b| b.min.total_cmp(&a.min));
        Self {
            tiers,
            floor: floor.to_string(),
        }
    }

    pub fn rank(&self, value: f32) -> &str {
        self.tiers
            .iter()
            .find(|t| value >= t.min)
            .map(|t| t.label.as_str())
            .unwrap_or(&self.floor)
    }

    /// Thresholds must be strictly decreasing and finite.
    pub fn is_well_formed(&self) -> bool {
        self.tiers.iter().all(|t| t.min.is_finite())
            && self.tiers.windows(2).all(|w| w[0].min > w[1].min)
    }
}
