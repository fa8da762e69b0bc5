//! Tuning configuration.
//!
//! Every numeric constant of the four games lives here. A JSON file may
//! override any subset of fields; the rest keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{Rect, Vec2};
use crate::error::{GameError, Result};
use crate::score::RankLadder;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Conceptual update rate; converts second-based durations into frames.
    pub frame_rate: u32,
    pub invader: InvaderTuning,
    pub runner: RunnerTuning,
    pub batting: BattingTuning,
    pub free_throw: FreeThrowTuning,
    pub celebration: CelebrationTuning,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            invader: InvaderTuning::default(),
            runner: RunnerTuning::default(),
            batting: BattingTuning::default(),
            free_throw: FreeThrowTuning::default(),
            celebration: CelebrationTuning::default(),
        }
    }
}

impl ArcadeConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ArcadeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, what: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(GameError::InvalidConfig(what.to_string()))
            }
        }

        check(self.frame_rate > 0, "frame_rate must be positive")?;

        let inv = &self.invader;
        check(inv.lives > 0, "invader.lives must be positive")?;
        check(inv.max_bullets > 0, "invader.max_bullets must be positive")?;
        check(
            inv.enemy_rows > 0 && inv.enemy_cols > 0,
            "invader formation must not be empty",
        )?;
        check(!inv.row_points.is_empty(), "invader.row_points must not be empty")?;
        check(
            is_probability(inv.enemy_fire_chance),
            "invader.enemy_fire_chance must be a probability",
        )?;
        check(inv.rank.is_well_formed(), "invader.rank thresholds must descend")?;

        let run = &self.runner;
        check(run.duration_secs > 0, "runner.duration_secs must be positive")?;
        check(run.obstacle_interval > 0.0, "runner.obstacle_interval must be positive")?;
        check(run.particle_interval > 0, "runner.particle_interval must be positive")?;
        check(
            run.height > 200.0 + run.middle_height_max,
            "runner.height too small for middle obstacles",
        )?;
        check(run.rank.is_well_formed(), "runner.rank thresholds must descend")?;

        let bat = &self.batting;
        check(bat.innings > 0, "batting.innings must be positive")?;
        check(bat.outs_per_inning > 0, "batting.outs_per_inning must be positive")?;
        check(!bat.pitches.is_empty(), "batting.pitches must not be empty")?;
        check(
            bat.pitches.iter().all(|p| p.speed > 0.0),
            "batting pitch speeds must be positive",
        )?;
        check(
            bat.perfect.depth <= bat.near.depth
                && bat.perfect.x <= bat.near.x
                && bat.perfect.y <= bat.near.y,
            "batting.perfect tier must be inside batting.near",
        )?;
        check(
            [bat.triple_chance, bat.grounder_out_chance, bat.foul_chance]
                .into_iter()
                .all(is_probability),
            "batting chances must be probabilities",
        )?;
        check(bat.rank.is_well_formed(), "batting.rank thresholds must descend")?;

        let ft = &self.free_throw;
        check(ft.shots > 0, "free_throw.shots must be positive")?;
        check(ft.angle_min < ft.angle_max, "free_throw angle range is empty")?;
        check(ft.power_max > 0.0, "free_throw.power_max must be positive")?;
        check(
            is_probability(ft.rim_make_two_chance),
            "free_throw.rim_make_two_chance must be a probability",
        )?;
        check(ft.rank.is_well_formed(), "free_throw.rank thresholds must descend")?;

        Ok(())
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

// ── Invader shooter ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvaderTuning {
    pub width: f32,
    pub height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's top.
    pub player_offset: f32,
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub bullet_size: Vec2Def,
    pub max_bullets: usize,
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_padding: f32,
    pub formation_origin: Vec2Def,
    pub enemy_speed: f32,
    pub enemy_drop: f32,
    pub edge_margin: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_fire_chance: f64,
    pub lives: u32,
    /// Points per row, top row first. Rows past the end use the last value.
    pub row_points: Vec<u32>,
    /// Ranked on score divided by the formation's total value.
    pub rank: RankLadder,
}

impl Default for InvaderTuning {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            player_width: 40.0,
            player_height: 20.0,
            player_offset: 50.0,
            player_speed: 8.0,
            bullet_speed: 10.0,
            bullet_size: Vec2Def { x: 4.0, y: 10.0 },
            max_bullets: 5,
            enemy_rows: 3,
            enemy_cols: 5,
            enemy_width: 30.0,
            enemy_height: 20.0,
            enemy_padding: 15.0,
            formation_origin: Vec2Def { x: 30.0, y: 50.0 },
            enemy_speed: 0.6,
            enemy_drop: 15.0,
            edge_margin: 10.0,
            enemy_bullet_speed: 2.5,
            enemy_fire_chance: 0.002,
            lives: 5,
            row_points: vec![40, 30, 20],
            rank: RankLadder::new(
                &[
                    (1.0, "Flawless defense!"),
                    (0.7, "Ace pilot!"),
                    (0.4, "Good shooting!"),
                    (0.15, "Keep practicing!"),
                ],
                "Invaded...",
            ),
        }
    }
}

// ── Gravity-flip runner ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub width: f32,
    pub height: f32,
    pub player_x: f32,
    pub player_radius: f32,
    pub gravity: f32,
    pub max_vertical_speed: f32,
    pub trail_len: usize,
    pub hue_start: f32,
    pub hue_speed: f32,
    pub duration_secs: u32,
    pub base_speed: f32,
    pub speed_ramp: f32,
    pub difficulty_ramp: f32,
    /// Frames between obstacles at difficulty 1.
    pub obstacle_interval: f32,
    pub particle_interval: u32,
    pub particle_radius: f32,
    pub particle_speed_factor: f32,
    pub obstacle_width_min: f32,
    pub obstacle_width_range: f32,
    pub edge_height_min: f32,
    pub edge_height_range: f32,
    pub middle_height_min: f32,
    pub middle_height_max: f32,
    pub moving_height: f32,
    pub moving_amplitude: f32,
    pub hit_penalty: u32,
    pub collect_points: f32,
    pub combo_step: u32,
    pub combo_bonus: f32,
    /// Added per max-combo point when the session ends.
    pub max_combo_bonus: u32,
    pub star_count: usize,
    pub shake_on_wall: f32,
    pub shake_on_hit: f32,
    pub shake_decay: f32,
    pub rank: RankLadder,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            player_x: 80.0,
            player_radius: 12.0,
            gravity: 0.4,
            max_vertical_speed: 10.0,
            trail_len: 15,
            hue_start: 180.0,
            hue_speed: 0.5,
            duration_secs: 120,
            base_speed: 3.0,
            speed_ramp: 0.02,
            difficulty_ramp: 0.01,
            obstacle_interval: 100.0,
            particle_interval: 40,
            particle_radius: 8.0,
            particle_speed_factor: 0.8,
            obstacle_width_min: 30.0,
            obstacle_width_range: 20.0,
            edge_height_min: 60.0,
            edge_height_range: 80.0,
            middle_height_min: 40.0,
            middle_height_max: 80.0,
            moving_height: 50.0,
            moving_amplitude: 80.0,
            hit_penalty: 50,
            collect_points: 10.0,
            combo_step: 5,
            combo_bonus: 0.5,
            max_combo_bonus: 20,
            star_count: 50,
            shake_on_wall: 5.0,
            shake_on_hit: 15.0,
            shake_decay: 0.9,
            rank: RankLadder::new(
                &[
                    (2000.0, "Neon legend!"),
                    (1200.0, "Gravity master!"),
                    (600.0, "Smooth flier!"),
                    (200.0, "Warming up!"),
                ],
                "Keep flipping!",
            ),
        }
    }
}

// ── Batting ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitchType {
    pub name: String,
    /// Displayed km/h; also drives depth speed.
    pub speed: f32,
    /// Horizontal break.
    pub curve: f32,
    /// Vertical break.
    pub drop: f32,
}

impl PitchType {
    fn new(name: &str, speed: f32, curve: f32, drop: f32) -> Self {
        Self {
            name: name.to_string(),
            speed,
            curve,
            drop,
        }
    }
}

/// Proximity thresholds for one judgement tier (strict `<` comparisons).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityThresholds {
    pub depth: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattingTuning {
    pub width: f32,
    pub height: f32,
    pub innings: u32,
    pub outs_per_inning: u32,
    /// Enables strikeouts and walks; off unless configured.
    pub count_rules: bool,
    pub strikes_per_out: u32,
    pub balls_per_walk: u32,
    pub cursor_bounds: Rect,
    pub cursor_start: Vec2Def,
    pub cursor_step: f32,
    pub strike_zone: Rect,
    pub release_point: Vec2Def,
    /// Screen point the ball converges on as depth approaches 100.
    pub vanishing_point: Vec2Def,
    pub pitch_delay: u32,
    pub swing_frames: u32,
    pub windup_frames: u32,
    pub optimal_depth: f32,
    pub perfect: ProximityThresholds,
    pub near: ProximityThresholds,
    pub home_run_power: f32,
    pub extra_base_power: f32,
    pub single_power: f32,
    pub triple_chance: f64,
    pub grounder_out_chance: f64,
    pub foul_chance: f64,
    pub hit_gravity: f32,
    pub result_frames: u32,
    pub pitch_display_frames: u32,
    pub start_button: Rect,
    pub pitches: Vec<PitchType>,
    /// Ranked on total runs.
    pub rank: RankLadder,
}

impl Default for BattingTuning {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 440.0,
            innings: 3,
            outs_per_inning: 3,
            count_rules: false,
            strikes_per_out: 3,
            balls_per_walk: 4,
            cursor_bounds: Rect::new(300.0, 240.0, 120.0, 120.0),
            cursor_start: Vec2Def { x: 360.0, y: 320.0 },
            cursor_step: 5.0,
            strike_zone: Rect::new(330.0, 280.0, 60.0, 80.0),
            release_point: Vec2Def { x: 200.0, y: 150.0 },
            vanishing_point: Vec2Def { x: 360.0, y: 300.0 },
            pitch_delay: 60,
            swing_frames: 20,
            windup_frames: 30,
            optimal_depth: 85.0,
            perfect: ProximityThresholds { depth: 12.0, x: 25.0, y: 30.0 },
            near: ProximityThresholds { depth: 25.0, x: 40.0, y: 50.0 },
            home_run_power: 0.85,
            extra_base_power: 0.65,
            single_power: 0.4,
            triple_chance: 0.4,
            grounder_out_chance: 0.7,
            foul_chance: 0.5,
            hit_gravity: 0.3,
            result_frames: 90,
            pitch_display_frames: 120,
            start_button: Rect::new(175.0, 385.0, 150.0, 40.0),
            pitches: vec![
                PitchType::new("Fastball", 145.0, 0.0, 0.3),
                PitchType::new("Curve", 115.0, 2.5, 1.2),
                PitchType::new("Slider", 130.0, -1.8, 0.5),
                PitchType::new("Forkball", 135.0, 0.0, 2.0),
                PitchType::new("Shuuto", 138.0, 1.5, 0.4),
            ],
            rank: RankLadder::new(
                &[
                    (10.0, "MVP! Best game ever!"),
                    (7.0, "Outstanding!"),
                    (4.0, "Nice hitting!"),
                    (1.0, "Almost there!"),
                ],
                "Better luck next time!",
            ),
        }
    }
}

// ── Free throw ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeThrowTuning {
    pub width: f32,
    pub height: f32,
    pub shots: u32,
    pub ball_start: Vec2Def,
    pub ball_radius: f32,
    pub hoop_x: f32,
    pub hoop_width: f32,
    pub rim_y: f32,
    pub net_height: f32,
    pub angle_start: f32,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_speed: f32,
    pub power_max: f32,
    pub power_speed: f32,
    pub launch_base: f32,
    pub launch_range: f32,
    pub horizontal_factor: f32,
    pub gravity: f32,
    pub floor_y: f32,
    pub wall_restitution: f32,
    pub rim_restitution: f32,
    pub rim_kick: f32,
    /// Tunable, not semantically load-bearing.
    pub rim_make_two_chance: f64,
    /// Frames between landing and the next attempt.
    pub reset_delay: u32,
    pub result_frames: u32,
    pub particle_life: u32,
    pub start_button: Rect,
    /// Ranked on score divided by `shots * 3`.
    pub rank: RankLadder,
}

impl Default for FreeThrowTuning {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 470.0,
            shots: 10,
            ball_start: Vec2Def { x: 250.0, y: 350.0 },
            ball_radius: 20.0,
            hoop_x: 250.0,
            hoop_width: 80.0,
            rim_y: 110.0,
            net_height: 40.0,
            angle_start: 80.0,
            angle_min: 60.0,
            angle_max: 100.0,
            angle_speed: 1.5,
            power_max: 100.0,
            power_speed: 2.0,
            launch_base: 12.0,
            launch_range: 8.0,
            horizontal_factor: 0.3,
            gravity: 0.4,
            floor_y: 400.0,
            wall_restitution: 0.5,
            rim_restitution: 0.6,
            rim_kick: 2.0,
            rim_make_two_chance: 0.5,
            reset_delay: 60,
            result_frames: 60,
            particle_life: 60,
            start_button: Rect::new(175.0, 420.0, 150.0, 40.0),
            rank: RankLadder::new(
                &[
                    (0.9, "MVP! Unreal touch!"),
                    (0.7, "All-Star!"),
                    (0.5, "Nice play!"),
                    (0.3, "Not bad!"),
                ],
                "Shake it off!",
            ),
        }
    }
}

// ── Celebration ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelebrationPreset {
    pub confetti: usize,
    pub duration_ms: u32,
    pub messages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationTuning {
    pub low: CelebrationPreset,
    pub medium: CelebrationPreset,
    pub high: CelebrationPreset,
}

impl Default for CelebrationTuning {
    fn default() -> Self {
        let preset = |confetti, duration_ms, messages: &[&str]| CelebrationPreset {
            confetti,
            duration_ms,
            messages: messages.iter().map(|m| m.to_string()).collect(),
        };
        Self {
            low: preset(15, 1500, &["Meow.", "Not bad, meow.", "Hmm, meow.", "Nice, meow."]),
            medium: preset(
                50,
                2500,
                &[
                    "You did it, meow!",
                    "Great, meow!",
                    "Well done, meow!",
                    "The best, meow!",
                    "Congrats, meow!",
                ],
            ),
            high: preset(
                150,
                3500,
                &[
                    "AMAZING, MEOW!!",
                    "Way too good, meow!!!",
                    "Genius, meow!!!",
                    "Legendary, meow!!!!",
                    "Best of the best, meow!!!",
                    "Unbelievable, meow!!!",
                ],
            ),
        }
    }
}

/// Serializable point; converts into `Vec2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}
