//! Free-throw simulator.
//!
//! Each attempt runs angle-select → power-select → shooting → resolved and
//! then loops back until the shots are used up. Two oscillating gauges are
//! stopped by successive activations; the release velocity follows from
//! where they stopped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision::{circle_rect_contact, Side};
use crate::config::FreeThrowTuning;
use crate::display::{self, Surface};
use crate::entities::{
    Body, Countdown, GameKind, Outcome, Rect, ResultEvent, Rgba, SessionPhase, Spark, Vec2,
};
use crate::error::Result;
use crate::input::FrameInput;
use crate::physics::{accelerate_then_move, scatter_burst, step_sparks, Gauge};
use crate::score::{Resource, ScoreTracker};
use crate::session::Session;

const SPARK_GRAVITY: f32 = 0.1;
/// Half extents of each rim lip's hit box.
const LIP_HALF_W: f32 = 4.0;
const LIP_HALF_H: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotPhase {
    AngleSelect,
    PowerSelect,
    Shooting,
    /// Ball has landed; waiting out the reset delay.
    Resolved,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    pub scored: bool,
    pub hit_rim: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreeThrowState {
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub shot: ShotPhase,
    pub ball: Ball,
    /// Degrees above horizontal.
    pub angle: Gauge,
    pub power: Gauge,
    pub shots: Resource,
    pub score: ScoreTracker,
    pub reset_timer: Countdown,
    pub result: Option<ResultEvent>,
    pub sparks: Vec<Spark>,
    pub frame: u64,
}

impl FreeThrowState {
    pub fn hoop_left(&self, t: &FreeThrowTuning) -> f32 {
        t.hoop_x - t.hoop_width / 2.0
    }

    pub fn hoop_right(&self, t: &FreeThrowTuning) -> f32 {
        t.hoop_x + t.hoop_width / 2.0
    }

    /// Hit boxes for the two ends of the rim, left first.
    pub fn rim_lips(&self, t: &FreeThrowTuning) -> [Rect; 2] {
        let lip = |x: f32| {
            Rect::new(
                x - LIP_HALF_W,
                t.rim_y - LIP_HALF_H,
                LIP_HALF_W * 2.0,
                LIP_HALF_H * 2.0,
            )
        };
        [lip(self.hoop_left(t)), lip(self.hoop_right(t))]
    }
}

fn fresh_ball(t: &FreeThrowTuning) -> Ball {
    Ball {
        body: Body::at(t.ball_start.x, t.ball_start.y),
        radius: t.ball_radius,
        scored: false,
        hit_rim: false,
    }
}

fn angle_gauge(t: &FreeThrowTuning) -> Gauge {
    Gauge::new(t.angle_start, t.angle_speed, t.angle_min, t.angle_max)
}

fn power_gauge(t: &FreeThrowTuning) -> Gauge {
    Gauge::new(0.0, t.power_speed, 0.0, t.power_max)
}

pub fn init_state(t: &FreeThrowTuning, with_tutorial: bool) -> FreeThrowState {
    FreeThrowState {
        phase: if with_tutorial {
            SessionPhase::Tutorial
        } else {
            SessionPhase::Running
        },
        outcome: None,
        shot: ShotPhase::AngleSelect,
        ball: fresh_ball(t),
        angle: angle_gauge(t),
        power: power_gauge(t),
        shots: Resource::new(t.shots),
        score: ScoreTracker::new(),
        reset_timer: Countdown::default(),
        result: None,
        sparks: Vec::new(),
        frame: 0,
    }
}

fn show(state: &mut FreeThrowState, t: &FreeThrowTuning, text: &str, color: Rgba, big: bool) {
    state.result = Some(ResultEvent::new(text, color, big, t.result_frames));
}

// ── Shot sequence ─────────────────────────────────────────────────────────────

/// Release the ball from the locked gauges. Consumes one attempt.
pub fn shoot(state: &mut FreeThrowState, t: &FreeThrowTuning) {
    let radians = state.angle.value.to_radians();
    let speed = t.launch_base + state.power.value / t.power_max * t.launch_range;
    let side = if state.ball.body.pos.x < t.hoop_x { 1.0 } else { -1.0 };

    state.ball.body.vel = Vec2::new(
        radians.cos() * speed * side * t.horizontal_factor,
        -radians.sin() * speed,
    );
    state.shot = ShotPhase::Shooting;
    state.shots.consume();
    debug!(angle = state.angle.value, power = state.power.value, "shot released");
}

/// Discrete activation during play: lock the angle, then shoot.
pub fn activate(state: &mut FreeThrowState, t: &FreeThrowTuning) {
    if state.shots.is_exhausted() {
        return;
    }
    match state.shot {
        ShotPhase::AngleSelect => state.shot = ShotPhase::PowerSelect,
        ShotPhase::PowerSelect => shoot(state, t),
        ShotPhase::Shooting | ShotPhase::Resolved => {}
    }
}

fn burst(
    state: &mut FreeThrowState,
    t: &FreeThrowTuning,
    color: Rgba,
    count: usize,
    rng: &mut impl Rng,
) {
    let pos = state.ball.body.pos;
    state.sparks.extend(scatter_burst(
        pos,
        count,
        10.0,
        3.0,
        1.0 / t.particle_life.max(1) as f32,
        SPARK_GRAVITY,
        color,
        rng,
    ));
}

/// Deflect the ball off a rim lip according to the face it struck.
fn bounce_off_rim(ball: &mut Ball, t: &FreeThrowTuning, side: Side) {
    let vel = &mut ball.body.vel;
    match side {
        Side::Top | Side::Inside => {
            vel.y = -vel.y.abs() * t.rim_restitution;
            vel.x += if ball.body.pos.x < t.hoop_x { -t.rim_kick } else { t.rim_kick };
        }
        Side::Bottom => vel.y = vel.y.abs() * t.rim_restitution,
        Side::Left => vel.x = -vel.x.abs().max(t.rim_kick),
        Side::Right => vel.x = vel.x.abs().max(t.rim_kick),
    }
    ball.hit_rim = true;
}

/// Swish, rim bounce and post-rim make, evaluated every flight tick.
pub fn check_goal(state: &mut FreeThrowState, t: &FreeThrowTuning, rng: &mut impl Rng) {
    let left = state.hoop_left(t);
    let right = state.hoop_right(t);
    let pos = state.ball.body.pos;
    let r = state.ball.radius;

    if pos.y >= t.rim_y - 10.0 && pos.y <= t.rim_y + 30.0 {
        let clean = pos.x - r > left + 10.0 && pos.x + r < right - 10.0;
        if clean && state.ball.body.vel.y > 0.0 {
            if !state.ball.scored {
                state.ball.scored = true;
                state.score.add(3);
                state.score.extend_combo();
                show(state, t, "Swish! +3", Rgba::YELLOW, true);
                burst(state, t, Rgba::YELLOW, 30, rng);
            }
            return;
        }
    }

    let contact = state
        .rim_lips(t)
        .iter()
        .find_map(|lip| circle_rect_contact(pos, r, lip));
    if let Some(contact) = contact {
        bounce_off_rim(&mut state.ball, t, contact.side);
    }

    if state.ball.hit_rim
        && !state.ball.scored
        && pos.y > t.rim_y + 20.0
        && pos.y < t.rim_y + 60.0
        && pos.x > left + 5.0
        && pos.x < right - 5.0
    {
        state.ball.scored = true;
        state.score.extend_combo();
        if rng.gen_bool(t.rim_make_two_chance) {
            state.score.add(2);
            show(state, t, "Nice shot! +2", Rgba::GREEN, false);
            burst(state, t, Rgba::GREEN, 20, rng);
        } else {
            state.score.add(1);
            show(state, t, "Rim! +1", Rgba::CYAN, false);
            burst(state, t, Rgba::CYAN, 15, rng);
        }
    }
}

/// Put the ball back for the next attempt, or end the session when the
/// last attempt has resolved.
fn reset_ball(state: &mut FreeThrowState, t: &FreeThrowTuning) {
    state.ball = fresh_ball(t);
    state.angle = angle_gauge(t);
    state.power = power_gauge(t);
    state.shot = ShotPhase::AngleSelect;
    state.result = None;

    if state.shots.is_exhausted() {
        state.phase = SessionPhase::GameOver;
        state.outcome = Some(Outcome::Failed);
        info!(score = state.score.score(), "free-throw session over");
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

pub fn tick(
    state: &mut FreeThrowState,
    t: &FreeThrowTuning,
    input: &FrameInput,
    rng: &mut impl Rng,
) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.frame += 1;

    if input.activated() {
        activate(state, t);
    }

    match state.shot {
        ShotPhase::AngleSelect => state.angle.step(),
        ShotPhase::PowerSelect => state.power.step(),
        ShotPhase::Shooting => {
            accelerate_then_move(&mut state.ball.body, Vec2::new(0.0, t.gravity));
            check_goal(state, t, rng);

            if state.ball.body.pos.y > t.floor_y {
                if !state.ball.scored {
                    state.score.break_combo();
                    show(state, t, "Miss...", Rgba::RED, false);
                }
                state.shot = ShotPhase::Resolved;
                state.reset_timer = Countdown::new(t.reset_delay);
            } else {
                let ball = &mut state.ball;
                let (lo, hi) = (ball.radius, t.width - ball.radius);
                if ball.body.pos.x < lo || ball.body.pos.x > hi {
                    ball.body.vel.x *= -t.wall_restitution;
                    ball.body.pos.x = ball.body.pos.x.clamp(lo, hi);
                }
            }
        }
        ShotPhase::Resolved => {}
    }

    step_sparks(&mut state.sparks);
    if let Some(r) = state.result.as_mut() {
        if r.timer.tick() || !r.timer.is_active() {
            state.result = None;
        }
    }

    if state.shot == ShotPhase::Resolved
        && (state.reset_timer.tick() || !state.reset_timer.is_active())
    {
        reset_ball(state, t);
    }
}

pub fn rank_for(t: &FreeThrowTuning, score: u32) -> String {
    let max = t.shots.saturating_mul(3).max(1) as f32;
    t.rank.rank(score as f32 / max).to_string()
}

// ── Session wrapper ───────────────────────────────────────────────────────────

pub struct FreeThrowGame {
    tuning: FreeThrowTuning,
    state: FreeThrowState,
    rng: StdRng,
}

impl FreeThrowGame {
    pub fn new(tuning: FreeThrowTuning, seed: u64) -> Self {
        let state = init_state(&tuning, true);
        Self {
            tuning,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &FreeThrowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FreeThrowState {
        &mut self.state
    }

    pub fn tuning(&self) -> &FreeThrowTuning {
        &self.tuning
    }
}

impl Session for FreeThrowGame {
    fn kind(&self) -> GameKind {
        GameKind::FreeThrow
    }

    fn surface_size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    fn reset(&mut self, with_tutorial: bool) {
        self.state = init_state(&self.tuning, with_tutorial);
    }

    fn begin(&mut self) {
        if self.state.phase == SessionPhase::Tutorial {
            self.state.phase = SessionPhase::Running;
        }
    }

    fn start_region(&self) -> Option<Rect> {
        Some(self.tuning.start_button)
    }

    fn update(&mut self, input: &FrameInput) {
        tick(&mut self.state, &self.tuning, input, &mut self.rng);
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        display::free_throw::render(surface, &self.state, &self.tuning, &self.rank())
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
