//! Neon gravity-flip runner.
//!
//! A glowing orb holds a fixed column while obstacles and collectibles
//! scroll in from the right. Each activation reverses gravity. The session
//! runs against a countdown; surviving it ends the game with a bonus for the
//! best combo.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision::{circle_rect_contact, circles_overlap};
use crate::config::RunnerTuning;
use crate::display::{self, Surface};
use crate::entities::{Body, GameKind, Outcome, Rect, Rgba, SessionPhase, Spark, Vec2};
use crate::error::Result;
use crate::input::FrameInput;
use crate::physics::{ring_burst, scatter_burst, sine_offset, step_sparks};
use crate::score::ScoreTracker;
use crate::session::Session;

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    pub body: Body,
    pub radius: f32,
    /// +1.0 pulls down, -1.0 pulls up.
    pub gravity_direction: f32,
    pub hue: f32,
    /// Most recent position first.
    pub trail: VecDeque<(Vec2, f32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Top,
    Bottom,
    Middle,
    Moving,
}

/// Parameters of a vertically oscillating obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sway {
    pub rest_y: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
    pub sway: Option<Sway>,
    pub hue: f32,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
    /// Decorative spin.
    pub angle: f32,
    pub hue: f32,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunnerState {
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub orb: Orb,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub sparks: Vec<Spark>,
    pub stars: Vec<Star>,
    pub score: ScoreTracker,
    /// Whole seconds left on the clock.
    pub time_left: u32,
    pub frame: u64,
    pub speed: f32,
    pub difficulty: f32,
    pub obstacle_timer: u32,
    pub particle_timer: u32,
    pub shake: f32,
    pub pulse: f32,
    /// Max-combo bonus added when the clock ran out.
    pub end_bonus: u32,
    pub width: f32,
    pub height: f32,
}

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn init_state(t: &RunnerTuning, rng: &mut impl Rng) -> RunnerState {
    let stars = (0..t.star_count)
        .map(|_| Star {
            pos: Vec2::new(rng.gen::<f32>() * t.width, rng.gen::<f32>() * t.height),
            size: rng.gen::<f32>() * 2.0 + 0.5,
            speed: rng.gen::<f32>() * 0.5 + 0.2,
            brightness: rng.gen::<f32>(),
        })
        .collect();

    RunnerState {
        phase: SessionPhase::Running,
        outcome: None,
        orb: Orb {
            body: Body::at(t.player_x, t.height / 2.0),
            radius: t.player_radius,
            gravity_direction: 1.0,
            hue: t.hue_start,
            trail: VecDeque::with_capacity(t.trail_len + 1),
        },
        obstacles: Vec::new(),
        collectibles: Vec::new(),
        sparks: Vec::new(),
        stars,
        score: ScoreTracker::new(),
        time_left: t.duration_secs,
        frame: 0,
        speed: t.base_speed,
        difficulty: 1.0,
        obstacle_timer: 0,
        particle_timer: 0,
        shake: 0.0,
        pulse: 0.0,
        end_bonus: 0,
        width: t.width,
        height: t.height,
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// Reverse gravity and kill vertical speed, wherever the orb is.
pub fn flip_gravity(state: &mut RunnerState) {
    state.orb.gravity_direction = -state.orb.gravity_direction;
    state.orb.body.vel.y = 0.0;
    let color = Rgba::hsl(state.orb.hue, 1.0, 0.6);
    state
        .sparks
        .extend(ring_burst(state.orb.body.pos, 8, 3.0, 0.03, color));
    debug!(direction = state.orb.gravity_direction, "gravity flipped");
}

pub fn spawn_obstacle(state: &mut RunnerState, t: &RunnerTuning, rng: &mut impl Rng) {
    let kind = match rng.gen_range(0..4) {
        0 => ObstacleKind::Top,
        1 => ObstacleKind::Bottom,
        2 => ObstacleKind::Middle,
        _ => ObstacleKind::Moving,
    };
    let x = state.width + 50.0;
    let w = t.obstacle_width_min + rng.gen::<f32>() * t.obstacle_width_range;
    let hue = rng.gen::<f32>() * 360.0;

    let (y, h, sway) = match kind {
        ObstacleKind::Top => {
            let h = t.edge_height_min + rng.gen::<f32>() * t.edge_height_range;
            (0.0, h, None)
        }
        ObstacleKind::Bottom => {
            let h = t.edge_height_min + rng.gen::<f32>() * t.edge_height_range;
            (state.height - h, h, None)
        }
        ObstacleKind::Middle => {
            let h = t.middle_height_min
                + rng.gen::<f32>() * (t.middle_height_max - t.middle_height_min);
            let y = 100.0 + rng.gen::<f32>() * (state.height - 200.0 - h);
            (y, h, None)
        }
        ObstacleKind::Moving => {
            let rest_y = state.height / 2.0;
            let sway = Sway {
                rest_y,
                amplitude: t.moving_amplitude,
                speed: 0.03 + rng.gen::<f32>() * 0.02,
                phase: rng.gen::<f32>() * TAU,
            };
            (rest_y, t.moving_height, Some(sway))
        }
    };

    state.obstacles.push(Obstacle {
        rect: Rect::new(x, y, w, h),
        kind,
        sway,
        hue,
        alive: true,
    });
}

pub fn spawn_collectible(state: &mut RunnerState, t: &RunnerTuning, rng: &mut impl Rng) {
    state.collectibles.push(Collectible {
        pos: Vec2::new(
            state.width + 20.0,
            50.0 + rng.gen::<f32>() * (state.height - 100.0),
        ),
        radius: t.particle_radius,
        angle: 0.0,
        hue: rng.gen::<f32>() * 360.0,
        alive: true,
    });
}

/// Points for a collect at the given (already incremented) combo.
pub fn collect_points(t: &RunnerTuning, combo: u32) -> u32 {
    let tier = (combo / t.combo_step.max(1)) as f32;
    (t.collect_points * (1.0 + tier * t.combo_bonus)).floor() as u32
}

pub fn rank_for(t: &RunnerTuning, score: u32) -> String {
    t.rank.rank(score as f32).to_string()
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance one frame. An activation is applied after this frame's physics,
/// the way a between-frame input event would be.
pub fn tick(
    state: &mut RunnerState,
    t: &RunnerTuning,
    frame_rate: u32,
    input: &FrameInput,
    rng: &mut impl Rng,
) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.frame += 1;
    state.pulse += 0.05;

    // ── Clock ────────────────────────────────────────────────────────────────
    if state.frame % frame_rate.max(1) as u64 == 0 {
        state.time_left = state.time_left.saturating_sub(1);
        if state.time_left == 0 {
            finish(state, t);
            return;
        }
    }

    let elapsed = (t.duration_secs - state.time_left) as f32;
    state.difficulty = 1.0 + elapsed * t.difficulty_ramp;
    state.speed = t.base_speed + elapsed * t.speed_ramp;

    // ── Orb ──────────────────────────────────────────────────────────────────
    let orb = &mut state.orb;
    orb.body.vel.y = (orb.body.vel.y + t.gravity * orb.gravity_direction)
        .clamp(-t.max_vertical_speed, t.max_vertical_speed);
    orb.body.pos.y += orb.body.vel.y;
    orb.hue = (orb.hue + t.hue_speed) % 360.0;
    orb.trail.push_front((orb.body.pos, orb.hue));
    orb.trail.truncate(t.trail_len);

    if orb.body.pos.y - orb.radius < 0.0 {
        orb.body.pos.y = orb.radius;
        orb.body.vel.y = 0.0;
        state.shake = t.shake_on_wall;
    }
    if orb.body.pos.y + orb.radius > state.height {
        orb.body.pos.y = state.height - orb.radius;
        orb.body.vel.y = 0.0;
        state.shake = t.shake_on_wall;
    }

    // ── Spawning ─────────────────────────────────────────────────────────────
    state.obstacle_timer += 1;
    if state.obstacle_timer as f32 >= t.obstacle_interval / state.difficulty {
        spawn_obstacle(state, t, rng);
        state.obstacle_timer = 0;
    }
    state.particle_timer += 1;
    if state.particle_timer >= t.particle_interval {
        spawn_collectible(state, t, rng);
        state.particle_timer = 0;
    }

    // ── Obstacles ────────────────────────────────────────────────────────────
    let center = state.orb.body.pos;
    let radius = state.orb.radius;
    let mut hits = 0;
    for obs in state.obstacles.iter_mut().filter(|o| o.alive) {
        obs.rect.x -= state.speed;
        if let Some(s) = obs.sway {
            obs.rect.y = s.rest_y + sine_offset(state.frame, s.speed, s.phase, s.amplitude);
        }
        if circle_rect_contact(center, radius, &obs.rect).is_some() {
            obs.alive = false;
            hits += 1;
        } else if obs.rect.right() <= -50.0 {
            obs.alive = false;
        }
    }
    state.obstacles.retain(|o| o.alive);
    for _ in 0..hits {
        state.score.penalize(t.hit_penalty);
        state.shake = t.shake_on_hit;
        let debris = scatter_burst(center, 20, 8.0, 0.0, 0.03, 0.0, Rgba::hsl(0.0, 1.0, 0.6), rng);
        state.sparks.extend(debris);
        debug!(score = state.score.score(), "obstacle hit");
    }

    // ── Collectibles ─────────────────────────────────────────────────────────
    let mut collected = Vec::new();
    for c in state.collectibles.iter_mut().filter(|c| c.alive) {
        c.pos.x -= state.speed * t.particle_speed_factor;
        c.angle += 0.05;
        if circles_overlap(center, radius, c.pos, c.radius) {
            c.alive = false;
            collected.push((c.pos, c.hue));
        } else if c.pos.x <= -20.0 {
            c.alive = false;
        }
    }
    state.collectibles.retain(|c| c.alive);
    for (pos, hue) in collected {
        let combo = state.score.extend_combo();
        state.score.add(collect_points(t, combo));
        state
            .sparks
            .extend(ring_burst(pos, 12, 4.0, 0.05, Rgba::hsl(hue, 1.0, 0.6)));
    }

    // ── Cosmetics ────────────────────────────────────────────────────────────
    step_sparks(&mut state.sparks);
    for star in state.stars.iter_mut() {
        star.pos.x -= star.speed * state.speed;
        if star.pos.x < 0.0 {
            star.pos.x = state.width;
            star.pos.y = rng.gen::<f32>() * state.height;
        }
        star.brightness = 0.5 + (state.frame as f32 * 0.1 + star.pos.x).sin() * 0.5;
    }
    state.shake *= t.shake_decay;

    if input.activated() {
        flip_gravity(state);
    }
}

fn finish(state: &mut RunnerState, t: &RunnerTuning) {
    let bonus = state.score.max_combo() * t.max_combo_bonus;
    state.score.add(bonus);
    state.end_bonus = bonus;
    state.phase = SessionPhase::GameOver;
    state.outcome = Some(Outcome::Survived);
    info!(
        score = state.score.score(),
        max_combo = state.score.max_combo(),
        bonus,
        "runner session over"
    );
}

// ── Session wrapper ───────────────────────────────────────────────────────────

pub struct RunnerGame {
    tuning: RunnerTuning,
    frame_rate: u32,
    state: RunnerState,
    rng: StdRng,
}

impl RunnerGame {
    pub fn new(tuning: RunnerTuning, frame_rate: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = init_state(&tuning, &mut rng);
        Self {
            tuning,
            frame_rate,
            state,
            rng,
        }
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RunnerState {
        &mut self.state
    }
}

impl Session for RunnerGame {
    fn kind(&self) -> GameKind {
        GameKind::Runner
    }

    fn surface_size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    fn reset(&mut self, _with_tutorial: bool) {
        self.state = init_state(&self.tuning, &mut self.rng);
    }

    fn begin(&mut self) {}

    fn update(&mut self, input: &FrameInput) {
        tick(
            &mut self.state,
            &self.tuning,
            self.frame_rate,
            input,
            &mut self.rng,
        );
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        display::runner::render(surface, &self.state, &self.rank())
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
