//! Inbound hook for "a task was completed".
//!
//! Picks a celebration preset by priority, runs it as a frame countdown,
//! and for high priority offers the mini-games once the animation is over.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::{ArcadeConfig, CelebrationPreset, CelebrationTuning};
use crate::display::Surface;
use crate::driver::LoopDriver;
use crate::entities::{Body, Countdown, GameKind, Priority, Rgba, Spark, Vec2};
use crate::physics::step_sparks;
use crate::session::new_session;

/// Logical size of the celebration overlay.
pub const STAGE: Vec2 = Vec2::new(500.0, 400.0);

const CONFETTI_GRAVITY: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelebrationState {
    Playing,
    /// Animation over; games are on offer until one is launched.
    OfferingGames,
    Done,
}

#[derive(Clone, Debug)]
pub struct Celebration {
    pub priority: Priority,
    pub message: String,
    pub confetti: Vec<Spark>,
    pub timer: Countdown,
    pub state: CelebrationState,
}

fn preset(tuning: &CelebrationTuning, priority: Priority) -> &CelebrationPreset {
    match priority {
        Priority::Low => &tuning.low,
        Priority::Medium => &tuning.medium,
        Priority::High => &tuning.high,
    }
}

/// Start the celebration for a completed task.
pub fn on_task_completed(
    priority: Priority,
    tuning: &CelebrationTuning,
    frame_rate: u32,
    rng: &mut impl Rng,
) -> Celebration {
    let p = preset(tuning, priority);
    let frames = (p.duration_ms as u64 * frame_rate as u64 / 1000) as u32;
    let message = p.messages.choose(rng).cloned().unwrap_or_default();

    let confetti = (0..p.confetti)
        .map(|_| Spark {
            body: Body {
                pos: Vec2::new(rng.gen::<f32>() * STAGE.x, -rng.gen::<f32>() * 50.0),
                vel: Vec2::new((rng.gen::<f32>() - 0.5) * 4.0, rng.gen::<f32>() * 2.0 + 1.0),
            },
            life: 1.0,
            decay: 1.0 / frames.max(1) as f32,
            gravity: CONFETTI_GRAVITY,
            color: Rgba::hsl(rng.gen::<f32>() * 360.0, 1.0, 0.6),
        })
        .collect();

    info!(?priority, frames, %message, "celebration started");
    Celebration {
        priority,
        message,
        confetti,
        timer: Countdown::new(frames),
        state: CelebrationState::Playing,
    }
}

impl Celebration {
    /// Advance the animation one frame.
    pub fn tick(&mut self) -> CelebrationState {
        if self.state != CelebrationState::Playing {
            return self.state;
        }
        step_sparks(&mut self.confetti);
        if self.timer.tick() || !self.timer.is_active() {
            self.state = if self.priority == Priority::High {
                CelebrationState::OfferingGames
            } else {
                CelebrationState::Done
            };
        }
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != CelebrationState::Done
    }

    pub fn offered_games(&self) -> &'static [GameKind] {
        match self.state {
            CelebrationState::OfferingGames => &GameKind::ALL,
            _ => &[],
        }
    }

    /// Hide without launching anything.
    pub fn dismiss(&mut self) {
        self.state = CelebrationState::Done;
    }

    /// Build a driver for one of the offered games and hide the
    /// celebration. `None` if that game is not on offer.
    pub fn launch<S: Surface>(
        &mut self,
        kind: GameKind,
        surface: S,
        config: &ArcadeConfig,
        seed: u64,
    ) -> Option<LoopDriver<S>> {
        if !self.offered_games().contains(&kind) {
            return None;
        }
        self.state = CelebrationState::Done;
        info!(game = ?kind, seed, "game launched from celebration");
        Some(LoopDriver::new(new_session(kind, config, seed), surface))
    }
}
