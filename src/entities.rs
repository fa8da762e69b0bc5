//! Shared data types: pure data, no game logic.

use serde::{Deserialize, Serialize};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A point or vector in logical surface coordinates (origin top-left, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Edge-inclusive point test (used for button hit-regions).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Clamp a point into this rectangle.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(self.x).min(self.right()),
            p.y.max(self.y).min(self.bottom()),
        )
    }
}

/// A moving body: position plus velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }
}

// ── Colour ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Build a colour from hue (degrees), saturation and lightness (0..=1).
    pub fn hsl(hue: f32, s: f32, l: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const RED: Rgba = Rgba::rgb(255, 68, 68);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
    pub const MAGENTA: Rgba = Rgba::rgb(255, 0, 255);
    pub const ORANGE: Rgba = Rgba::rgb(255, 140, 0);
    pub const GREY: Rgba = Rgba::rgb(136, 136, 136);
}

// ── Session-level enums ───────────────────────────────────────────────────────

/// Priority carried by the "task completed" signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// The four mini-game variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Invader,
    Runner,
    Batting,
    FreeThrow,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Invader,
        GameKind::Runner,
        GameKind::Batting,
        GameKind::FreeThrow,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Invader => "Invader Shooter",
            GameKind::Runner => "Neon Gravity Runner",
            GameKind::Batting => "Batting Challenge",
            GameKind::FreeThrow => "Free Throw",
        }
    }
}

/// Top-level phase shared by every session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Tutorial,
    Running,
    GameOver,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Time ran out or the field was cleared.
    Survived,
    /// A terminal resource (lives, outs, shots) was exhausted.
    Failed,
}

/// Outbound completion signal exposed once a session reaches game-over.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub kind: GameKind,
    pub score: u32,
    pub rank: String,
    pub outcome: Outcome,
}

impl GameSummary {
    pub fn survived(&self) -> bool {
        self.outcome == Outcome::Survived
    }
}

// ── Timers and transient effects ──────────────────────────────────────────────

/// Frame countdown. Replaces deferred timer callbacks: decremented once per
/// tick inside `update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: u32,
}

impl Countdown {
    pub const fn new(frames: u32) -> Self {
        Self { remaining: frames }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Decrement; returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Presentational text popped up on scoring events.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultEvent {
    pub text: String,
    pub color: Rgba,
    /// Drawn larger, with an extra flourish.
    pub big: bool,
    pub timer: Countdown,
}

impl ResultEvent {
    pub fn new(text: impl Into<String>, color: Rgba, big: bool, frames: u32) -> Self {
        Self {
            text: text.into(),
            color,
            big,
            timer: Countdown::new(frames),
        }
    }

    /// Opacity derived solely from the countdown.
    pub fn alpha(&self, fade_frames: u32) -> f32 {
        if fade_frames == 0 {
            return 1.0;
        }
        (self.timer.remaining as f32 / fade_frames as f32).min(1.0)
    }
}

/// A short-lived burst particle (flip rings, collect sparks, hit debris,
/// free-throw confetti).
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub body: Body,
    /// Remaining life in 0..=1.
    pub life: f32,
    pub decay: f32,
    /// Extra downward acceleration per tick.
    pub gravity: f32,
    pub color: Rgba,
}

impl Spark {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
