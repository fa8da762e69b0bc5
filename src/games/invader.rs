//! Invader shooter: a marching formation, a sliding cannon, bullets both ways.
//!
//! The free functions are the game logic; `InvaderGame` wraps them with an
//! owned RNG so it can sit behind `Session`. All randomness comes through
//! the injected RNG so tests can replay with a seeded one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision::rects_overlap;
use crate::config::InvaderTuning;
use crate::display::{self, Surface};
use crate::entities::{GameKind, Outcome, Rect, SessionPhase, Vec2};
use crate::error::Result;
use crate::input::FrameInput;
use crate::score::{Resource, ScoreTracker};
use crate::session::Session;

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Formation row; decides sprite colour and points.
    pub row: usize,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub owner: BulletOwner,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvaderState {
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub player: Rect,
    pub lives: Resource,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// +1.0 marching right, -1.0 marching left.
    pub direction: f32,
    pub score: ScoreTracker,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl InvaderState {
    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn player_bullets(&self) -> usize {
        self.bullets
            .iter()
            .filter(|b| b.alive && b.owner == BulletOwner::Player)
            .count()
    }
}

// ── Scoring tables ────────────────────────────────────────────────────────────

pub fn points_for_row(t: &InvaderTuning, row: usize) -> u32 {
    t.row_points
        .get(row)
        .or_else(|| t.row_points.last())
        .copied()
        .unwrap_or(0)
}

/// Score for wiping out the whole formation.
pub fn formation_value(t: &InvaderTuning) -> u32 {
    (0..t.enemy_rows)
        .map(|row| points_for_row(t, row).saturating_mul(t.enemy_cols as u32))
        .fold(0u32, u32::saturating_add)
}

pub fn rank_for(t: &InvaderTuning, score: u32) -> String {
    let max = formation_value(t).max(1) as f32;
    t.rank.rank(score as f32 / max).to_string()
}

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn init_state(t: &InvaderTuning) -> InvaderState {
    let mut enemies = Vec::with_capacity(t.enemy_rows * t.enemy_cols);
    for row in 0..t.enemy_rows {
        for col in 0..t.enemy_cols {
            enemies.push(Enemy {
                rect: Rect::new(
                    t.formation_origin.x + col as f32 * (t.enemy_width + t.enemy_padding),
                    t.formation_origin.y + row as f32 * (t.enemy_height + t.enemy_padding),
                    t.enemy_width,
                    t.enemy_height,
                ),
                row,
                alive: true,
            });
        }
    }

    InvaderState {
        phase: SessionPhase::Running,
        outcome: None,
        player: Rect::new(
            t.width / 2.0 - t.player_width / 2.0,
            t.height - t.player_offset,
            t.player_width,
            t.player_height,
        ),
        lives: Resource::new(t.lives),
        enemies,
        bullets: Vec::new(),
        direction: 1.0,
        score: ScoreTracker::new(),
        frame: 0,
        width: t.width,
        height: t.height,
    }
}

// ── Input-driven transitions ──────────────────────────────────────────────────

/// Slide the cannon; `dir` is -1.0 (left) or +1.0 (right). Clamped to the
/// surface.
pub fn move_player(state: &mut InvaderState, t: &InvaderTuning, dir: f32) {
    let max_x = state.width - state.player.w;
    state.player.x = (state.player.x + dir * t.player_speed).clamp(0.0, max_x);
}

/// Fire from the cannon's nose, capped at `max_bullets` in flight.
/// Returns whether a bullet was fired.
pub fn player_shoot(state: &mut InvaderState, t: &InvaderTuning) -> bool {
    if state.player_bullets() >= t.max_bullets {
        return false;
    }
    state.bullets.push(Bullet {
        rect: Rect::new(
            state.player.x + state.player.w / 2.0 - t.bullet_size.x / 2.0,
            state.player.y,
            t.bullet_size.x,
            t.bullet_size.y,
        ),
        owner: BulletOwner::Player,
        alive: true,
    });
    true
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame. No-op unless running.
pub fn tick(state: &mut InvaderState, t: &InvaderTuning, input: &FrameInput, rng: &mut impl Rng) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    if input.left {
        move_player(state, t, -1.0);
    }
    if input.right {
        move_player(state, t, 1.0);
    }
    if input.activated() {
        player_shoot(state, t);
    }

    // ── 2. Bullets ───────────────────────────────────────────────────────────
    for b in state.bullets.iter_mut().filter(|b| b.alive) {
        match b.owner {
            BulletOwner::Player => {
                b.rect.y -= t.bullet_speed;
                if b.rect.y <= 0.0 {
                    b.alive = false;
                }
            }
            BulletOwner::Enemy => {
                b.rect.y += t.enemy_bullet_speed;
                if b.rect.y >= state.height {
                    b.alive = false;
                }
            }
        }
    }

    // ── 3. Formation march ───────────────────────────────────────────────────
    let (left_most, right_most) = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .fold((f32::MAX, f32::MIN), |(l, r), e| {
            (l.min(e.rect.x), r.max(e.rect.right()))
        });
    let drop = right_most >= state.width - t.edge_margin || left_most <= t.edge_margin;
    if drop {
        state.direction = -state.direction;
    }

    let mut reached_player = false;
    let mut fired = Vec::new();
    for e in state.enemies.iter_mut().filter(|e| e.alive) {
        e.rect.x += t.enemy_speed * state.direction;
        if drop {
            e.rect.y += t.enemy_drop;
        }
        if e.rect.bottom() >= state.player.y {
            reached_player = true;
        }
        if rng.gen_bool(t.enemy_fire_chance) {
            fired.push(Bullet {
                rect: Rect::new(
                    e.rect.x + e.rect.w / 2.0 - t.bullet_size.x / 2.0,
                    e.rect.bottom(),
                    t.bullet_size.x,
                    t.bullet_size.y,
                ),
                owner: BulletOwner::Enemy,
                alive: true,
            });
        }
    }
    state.bullets.extend(fired);

    // ── 4. Player bullets ↔ enemies ──────────────────────────────────────────
    let mut gained = 0;
    for b in state
        .bullets
        .iter_mut()
        .filter(|b| b.alive && b.owner == BulletOwner::Player)
    {
        if let Some(e) = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && rects_overlap(&b.rect, &e.rect))
        {
            e.alive = false;
            b.alive = false;
            gained += points_for_row(t, e.row);
        }
    }
    state.score.add(gained);

    // ── 5. Enemy bullets ↔ player ────────────────────────────────────────────
    for b in state
        .bullets
        .iter_mut()
        .filter(|b| b.alive && b.owner == BulletOwner::Enemy)
    {
        if rects_overlap(&b.rect, &state.player) {
            b.alive = false;
            state.lives.consume();
            debug!(lives = state.lives.remaining(), "cannon hit");
        }
    }

    state.bullets.retain(|b| b.alive);

    // ── 6. Terminal conditions ───────────────────────────────────────────────
    if reached_player || state.lives.is_exhausted() {
        finish(state, Outcome::Failed);
    } else if state.alive_enemies() == 0 {
        finish(state, Outcome::Survived);
    }
}

fn finish(state: &mut InvaderState, outcome: Outcome) {
    state.phase = SessionPhase::GameOver;
    state.outcome = Some(outcome);
    info!(score = state.score.score(), ?outcome, "invader session over");
}

// ── Session wrapper ───────────────────────────────────────────────────────────

pub struct InvaderGame {
    tuning: InvaderTuning,
    state: InvaderState,
    rng: StdRng,
}

impl InvaderGame {
    pub fn new(tuning: InvaderTuning, seed: u64) -> Self {
        let state = init_state(&tuning);
        Self {
            tuning,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &InvaderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InvaderState {
        &mut self.state
    }

    pub fn tuning(&self) -> &InvaderTuning {
        &self.tuning
    }
}

impl Session for InvaderGame {
    fn kind(&self) -> GameKind {
        GameKind::Invader
    }

    fn surface_size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    fn reset(&mut self, _with_tutorial: bool) {
        self.state = init_state(&self.tuning);
    }

    fn begin(&mut self) {}

    fn update(&mut self, input: &FrameInput) {
        tick(&mut self.state, &self.tuning, input, &mut self.rng);
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        display::invader::render(surface, &self.state, &rank_for(&self.tuning, self.score()))
    }

    fn score(&self) -> u32 {
        self.state.score.score()
    }

    fn rank(&self) -> String {
        rank_for(&self.tuning, self.score())
    }

    fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }
}
