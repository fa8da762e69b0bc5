//! Batting simulator.
//!
//! Pitches travel along a depth axis (0 at the release point, 100 at the
//! catcher). The batter positions a meet cursor and swings; the swing is
//! judged at activation time by how close the cursor and the ball are on
//! screen and how close the ball is to the optimal contact depth.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision::{classify, Proximity};
use crate::config::BattingTuning;
use crate::display::{self, Surface};
use crate::entities::{
    Body, Countdown, GameKind, Outcome, Rect, ResultEvent, Rgba, SessionPhase, Vec2,
};
use crate::error::Result;
use crate::input::FrameInput;
use crate::physics::{move_then_accelerate, project_depth};
use crate::score::ScoreTracker;
use crate::session::Session;

const BALL_COLOR: Rgba = Rgba::rgb(136, 136, 255);

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Batter {
    pub pos: Vec2,
    pub swinging: bool,
    pub swing_frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pitcher {
    pub pos: Vec2,
    pub throwing: bool,
    pub windup_frame: u32,
}

/// A pitched ball. A fresh value is created for every pitch.
#[derive(Clone, Debug, PartialEq)]
pub struct Pitch {
    /// Position in pitch space; see `ball_screen_position`.
    pub pos: Vec2,
    pub vel: Vec2,
    pub depth: f32,
    pub depth_speed: f32,
    pub curve: f32,
    pub drop: f32,
    /// Index into the tuning's pitch list.
    pub kind: usize,
    pub active: bool,
    pub hit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitResult {
    HomeRun,
    Triple,
    Double,
    Single,
    InfieldSingle,
    Foul,
    Out,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattedBall {
    pub body: Body,
    pub depth: f32,
    pub depth_speed: f32,
    pub result: HitResult,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwingTier {
    /// Tightest thresholds: power and timing decide the hit.
    Perfect,
    /// Made contact: foul or out.
    Near,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwingJudgement {
    pub tier: Option<SwingTier>,
    pub proximity: Proximity,
    pub result: Option<HitResult>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattingState {
    pub phase: SessionPhase,
    pub outcome: Option<Outcome>,
    pub batter: Batter,
    pub pitcher: Pitcher,
    pub ball: Option<Pitch>,
    pub batted: Option<BattedBall>,
    pub cursor: Vec2,
    last_pointer: Option<Vec2>,
    /// First, second, third.
    pub bases: [bool; 3],
    pub runs: ScoreTracker,
    pub inning: u32,
    pub outs: u32,
    pub strikes: u32,
    pub balls: u32,
    pub waiting_for_pitch: bool,
    pub pitch_delay: Countdown,
    pub pitch_banner: Option<ResultEvent>,
    pub result: Option<ResultEvent>,
    pub frame: u64,
}

impl BattingState {
    pub fn runners_on(&self) -> u32 {
        self.bases.iter().filter(|&&b| b).count() as u32
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn init_state(t: &BattingTuning, with_tutorial: bool) -> BattingState {
    BattingState {
        phase: if with_tutorial {
            SessionPhase::Tutorial
        } else {
            SessionPhase::Running
        },
        outcome: None,
        batter: Batter {
            pos: Vec2::new(350.0, 320.0),
            swinging: false,
            swing_frame: 0,
        },
        pitcher: Pitcher {
            pos: t.release_point.into(),
            throwing: false,
            windup_frame: 0,
        },
        ball: None,
        batted: None,
        cursor: t.cursor_start.into(),
        last_pointer: None,
        bases: [false; 3],
        runs: ScoreTracker::new(),
        inning: 1,
        outs: 0,
        strikes: 0,
        balls: 0,
        waiting_for_pitch: true,
        pitch_delay: Countdown::new(t.pitch_delay),
        pitch_banner: None,
        result: None,
        frame: 0,
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Where the pitch appears for judging, interpolated towards the plate as
/// depth grows.
pub fn ball_screen_position(ball: &Pitch, t: &BattingTuning) -> Vec2 {
    project_depth(ball.pos, t.vanishing_point.into(), ball.depth, Vec2::new(1.0, 1.0))
}

fn show(state: &mut BattingState, t: &BattingTuning, text: &str, color: Rgba, big: bool) {
    state.result = Some(ResultEvent::new(text, color, big, t.result_frames));
}

// ── Pitching ──────────────────────────────────────────────────────────────────

pub fn pitch(state: &mut BattingState, t: &BattingTuning, rng: &mut impl Rng) {
    let kind = rng.gen_range(0..t.pitches.len());
    let p = &t.pitches[kind];
    let release: Vec2 = t.release_point.into();
    let zone = t.strike_zone;
    let target = Vec2::new(
        zone.x + rng.gen::<f32>() * zone.w,
        zone.y + rng.gen::<f32>() * zone.h,
    );

    let speed = p.speed / 30.0;
    let frames_to_plate = 100.0 / speed;
    state.ball = Some(Pitch {
        pos: release,
        vel: Vec2::new(
            (target.x - release.x) / frames_to_plate + p.curve * 0.3,
            (target.y - release.y) / frames_to_plate,
        ),
        depth: 0.0,
        depth_speed: speed,
        curve: p.curve,
        drop: p.drop,
        kind,
        active: true,
        hit: false,
    });
    state.pitch_banner = Some(ResultEvent::new(
        format!("{} {}km/h", p.name, p.speed as u32),
        Rgba::YELLOW,
        false,
        t.pitch_display_frames,
    ));
    state.pitcher.throwing = true;
    state.pitcher.windup_frame = 0;
    debug!(pitch = %p.name, "pitch thrown");
}

fn next_pitch(state: &mut BattingState, t: &BattingTuning) {
    state.waiting_for_pitch = true;
    state.pitch_delay = Countdown::new(t.pitch_delay);
}

// ── Base running and the count ────────────────────────────────────────────────

/// Advance every runner `bases` bases, scoring those who pass third, then
/// put the batter on base.
pub fn advance_runners(state: &mut BattingState, bases: usize) {
    for i in (0..3).rev() {
        if state.bases[i] {
            state.bases[i] = false;
            let to = i + bases;
            if to >= 3 {
                state.runs.add(1);
            } else {
                state.bases[to] = true;
            }
        }
    }
    if (1..=3).contains(&bases) {
        state.bases[bases - 1] = true;
    }
}

/// Walk: batter takes first, runners move only when forced.
pub fn force_advance(state: &mut BattingState) {
    if state.bases[0] {
        if state.bases[1] {
            if state.bases[2] {
                state.runs.add(1);
            }
            state.bases[2] = true;
        }
        state.bases[1] = true;
    }
    state.bases[0] = true;
}

fn reset_count(state: &mut BattingState) {
    state.strikes = 0;
    state.balls = 0;
}

fn record_out(state: &mut BattingState) {
    state.outs += 1;
    reset_count(state);
}

fn record_strike(state: &mut BattingState, t: &BattingTuning) -> bool {
    if !t.count_rules {
        return false;
    }
    state.strikes += 1;
    if state.strikes >= t.strikes_per_out {
        record_out(state);
        show(state, t, "Strikeout!", Rgba::RED, false);
        return true;
    }
    false
}

fn record_ball(state: &mut BattingState, t: &BattingTuning) -> bool {
    if !t.count_rules {
        return false;
    }
    state.balls += 1;
    if state.balls >= t.balls_per_walk {
        force_advance(state);
        reset_count(state);
        show(state, t, "Walk", BALL_COLOR, false);
        return true;
    }
    false
}

// ── Swing resolution ──────────────────────────────────────────────────────────

/// Decide the hit from the perfect-tier power value.
pub fn hit_for_power(t: &BattingTuning, power: f32, rng: &mut impl Rng) -> HitResult {
    if power > t.home_run_power {
        HitResult::HomeRun
    } else if power > t.extra_base_power {
        if rng.gen_bool(t.triple_chance) {
            HitResult::Triple
        } else {
            HitResult::Double
        }
    } else if power > t.single_power {
        HitResult::Single
    } else if rng.gen_bool(t.grounder_out_chance) {
        HitResult::Out
    } else {
        HitResult::InfieldSingle
    }
}

/// Credit a resolved batted ball to the bases and the count.
pub fn apply_hit(state: &mut BattingState, t: &BattingTuning, result: HitResult) {
    match result {
        HitResult::HomeRun => {
            state.runs.add(1 + state.runners_on());
            state.bases = [false; 3];
            show(state, t, "HOME RUN!!", Rgba::YELLOW, true);
        }
        HitResult::Triple => {
            advance_runners(state, 3);
            show(state, t, "Triple!", Rgba::CYAN, false);
        }
        HitResult::Double => {
            advance_runners(state, 2);
            show(state, t, "Double!", Rgba::GREEN, false);
        }
        HitResult::Single => {
            advance_runners(state, 1);
            show(state, t, "Hit!", Rgba::GREEN, false);
        }
        HitResult::InfieldSingle => {
            advance_runners(state, 1);
            show(state, t, "Infield hit!", Rgba::GREEN, false);
        }
        HitResult::Out => {
            record_out(state);
            show(state, t, "Out!", Rgba::RED, false);
        }
        HitResult::Foul => {
            // Free: the pitch is spent but no out is charged.
            if t.count_rules && state.strikes + 1 < t.strikes_per_out {
                state.strikes += 1;
            }
            show(state, t, "Foul!", Rgba::YELLOW, false);
        }
    }
    if !matches!(result, HitResult::Foul | HitResult::Out) {
        reset_count(state);
    }
}

/// Start a swing and judge it. Ignored while a swing is already in flight
/// or when there is no live, unhit pitch.
pub fn swing(
    state: &mut BattingState,
    t: &BattingTuning,
    rng: &mut impl Rng,
) -> Option<SwingJudgement> {
    if state.batter.swinging {
        return None;
    }
    let ball = state.ball.as_mut().filter(|b| b.active && !b.hit)?;
    state.batter.swinging = true;
    state.batter.swing_frame = 0;

    let screen = ball_screen_position(ball, t);
    let proximity = Proximity::between(state.cursor, t.optimal_depth, screen, ball.depth);
    let tier = classify(
        &proximity,
        &[(SwingTier::Perfect, t.perfect), (SwingTier::Near, t.near)],
    );

    let (result, vel, depth_speed) = match tier {
        Some(SwingTier::Perfect) => {
            let reach = t.perfect.x + t.perfect.y;
            let power = (1.0 - (proximity.dx + proximity.dy) / reach).max(0.0);
            let timing = 1.0 - proximity.dz / t.perfect.depth;
            let total = power * timing;
            let pull = (state.cursor.x - t.vanishing_point.x) / 60.0;
            let result = hit_for_power(t, total, rng);
            let vel = Vec2::new(pull * 8.0 * total, -12.0 * total - 3.0);
            debug!(power = total, ?result, "perfect contact");
            (result, vel, 15.0 * total + 5.0)
        }
        Some(SwingTier::Near) => {
            if rng.gen_bool(t.foul_chance) {
                let vel = Vec2::new((rng.gen::<f32>() - 0.5) * 15.0, -5.0);
                (HitResult::Foul, vel, 3.0)
            } else {
                let vel = Vec2::new((rng.gen::<f32>() - 0.5) * 5.0, -3.0);
                (HitResult::Out, vel, 8.0)
            }
        }
        None => {
            // Whiff: a swinging strike only if the swing is still live when the pitch arrives.
            return Some(SwingJudgement {
                tier: None,
                proximity,
                result: None,
            });
        }
    };

    ball.hit = true;
    ball.active = false;
    state.batted = Some(BattedBall {
        body: Body { pos: screen, vel },
        depth: 0.0,
        depth_speed,
        result,
        active: true,
    });
    apply_hit(state, t, result);

    Some(SwingJudgement {
        tier,
        proximity,
        result: Some(result),
    })
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

pub fn tick(state: &mut BattingState, t: &BattingTuning, input: &FrameInput, rng: &mut impl Rng) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.frame += 1;

    // ── Cursor ───────────────────────────────────────────────────────────────
    let bounds = t.cursor_bounds;
    if let Some(prev) = state.last_pointer {
        if prev != input.pointer {
            state.cursor = bounds.clamp(input.pointer);
        }
    }
    state.last_pointer = Some(input.pointer);
    let mut step = Vec2::ZERO;
    if input.left {
        step.x -= t.cursor_step;
    }
    if input.right {
        step.x += t.cursor_step;
    }
    if input.up {
        step.y -= t.cursor_step;
    }
    if input.down {
        step.y += t.cursor_step;
    }
    state.cursor = bounds.clamp(Vec2::new(state.cursor.x + step.x, state.cursor.y + step.y));

    if input.activated() {
        swing(state, t, rng);
    }

    // ── Pitch timing ─────────────────────────────────────────────────────────
    if state.waiting_for_pitch && (state.pitch_delay.tick() || !state.pitch_delay.is_active()) {
        pitch(state, t, rng);
        state.waiting_for_pitch = false;
    }

    // ── Pitched ball ─────────────────────────────────────────────────────────
    let mut arrived = None;
    if let Some(ball) = state.ball.as_mut().filter(|b| b.active && !b.hit) {
        ball.depth += ball.depth_speed;
        let progress = ball.depth / 100.0;
        ball.pos.x += ball.vel.x + ball.curve * progress * 0.5;
        ball.pos.y += ball.vel.y + ball.drop * progress * 0.3;
        if ball.depth >= 100.0 {
            ball.active = false;
            arrived = Some(t.strike_zone.contains(ball.pos));
        }
    }
    if let Some(in_zone) = arrived {
        if state.batter.swinging {
            show(state, t, "Swing and miss!", Rgba::RED, false);
            record_strike(state, t);
        } else if in_zone {
            show(state, t, "Called strike!", Rgba::rgb(255, 136, 0), false);
            record_strike(state, t);
        } else {
            show(state, t, "Ball", BALL_COLOR, false);
            record_ball(state, t);
        }
        next_pitch(state, t);
    }

    // ── Batted ball ──────────────────────────────────────────────────────────
    let mut landed = false;
    if let Some(b) = state.batted.as_mut().filter(|b| b.active) {
        move_then_accelerate(&mut b.body, Vec2::new(0.0, t.hit_gravity));
        b.depth += b.depth_speed;
        if b.depth > 200.0 || b.body.pos.y > 400.0 {
            b.active = false;
            landed = true;
        }
    }
    if landed {
        next_pitch(state, t);
    }

    // ── Animations and banners ───────────────────────────────────────────────
    if state.batter.swinging {
        state.batter.swing_frame += 1;
        if state.batter.swing_frame > t.swing_frames {
            state.batter.swinging = false;
        }
    }
    if state.pitcher.throwing {
        state.pitcher.windup_frame += 1;
        if state.pitcher.windup_frame > t.windup_frames {
            state.pitcher.throwing = false;
        }
    }
    tick_event(&mut state.result);
    tick_event(&mut state.pitch_banner);

    // ── Innings ──────────────────────────────────────────────────────────────
    if state.outs >= t.outs_per_inning {
        state.outs = 0;
        state.bases = [false; 3];
        reset_count(state);
        state.inning += 1;
        if state.inning > t.innings {
            state.inning = t.innings;
            state.phase = SessionPhase::GameOver;
            state.outcome = Some(Outcome::Failed);
            info!(runs = state.runs.score(), "batting session over");
            return;
        }
        debug!(inning = state.inning, "side retired");
        show(state, t, &format!("Inning {}", state.inning), Rgba::WHITE, false);
    }
}

fn tick_event(event: &mut Option<ResultEvent>) {
    if let Some(e) = event {
        if e.timer.tick() || !e.timer.is_active() {
            *event = None;
        }
    }
}

pub fn rank_for(t: &BattingTuning, runs: u32) -> String {
    t.rank.rank(runs as f32).to_string()
}

// ── Session wrapper ───────────────────────────────────────────────────────────

pub struct BattingGame {
    tuning: BattingTuning,
    state: BattingState,
    rng: StdRng,
}

impl BattingGame {
    pub fn new(tuning: BattingTuning, seed: u64) -> Self {
        let state = init_state(&tuning, true);
        Self {
            tuning,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &BattingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BattingState {
        &mut self.state
    }

    pub fn tuning(&self) -> &BattingTuning {
        &self.tuning
    }

    /// Swing right now, outside the frame loop.
    pub fn swing(&mut self) -> Option<SwingJudgement> {
        swing(&mut self.state, &self.tuning, &mut self.rng)
    }
}

impl Session for BattingGame {
    fn kind(&self) -> GameKind {
        GameKind::Batting
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

    fn pointer_bounds(&self) -> Option<Rect> {
        Some(self.tuning.cursor_bounds)
    }

    fn update(&mut self, input: &FrameInput) {
        tick(&mut self.state, &self.tuning, input, &mut self.rng);
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        display::batting::render(surface, &self.state, &self.tuning, &self.rank())
    }

    fn score(&self) -> u32 {
        self.state.runs.score()
    }

    fn rank(&self) -> String {
        rank_for(&self.tuning, self.score())
    }

    fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }
}
