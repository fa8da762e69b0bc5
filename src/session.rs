//! The capability set every mini-game implements, and the factory that
//! builds one from a `GameKind`.

use crate::config::ArcadeConfig;
use crate::display::Surface;
use crate::entities::{GameKind, GameSummary, Outcome, Rect, SessionPhase, Vec2};
use crate::error::Result;
use crate::games::{BattingGame, FreeThrowGame, InvaderGame, RunnerGame};
use crate::input::FrameInput;

/// One game instance: owns its entities, counters and RNG exclusively.
pub trait Session {
    fn kind(&self) -> GameKind;

    /// Fixed logical resolution of the drawing surface this game needs.
    fn surface_size(&self) -> Vec2;

    fn phase(&self) -> SessionPhase;

    /// Reinitialise every entity and counter. With `with_tutorial`, games
    /// that have a tutorial start there; everything else starts running.
    fn reset(&mut self, with_tutorial: bool);

    /// Tutorial → running. No-op in any other phase.
    fn begin(&mut self);

    /// Hit-region of the tutorial's start button, if the game has one.
    fn start_region(&self) -> Option<Rect> {
        None
    }

    /// Playfield sub-rectangle the pointer is clamped to.
    fn pointer_bounds(&self) -> Option<Rect> {
        None
    }

    /// Advance one tick: physics, outcome resolution, scoring, transitions.
    /// Ignored unless running.
    fn update(&mut self, input: &FrameInput);

    /// Draw the current state. Must not mutate anything.
    fn render(&self, surface: &mut dyn Surface) -> Result<()>;

    fn score(&self) -> u32;

    /// Rank label for the current score.
    fn rank(&self) -> String;

    /// Set once the session reaches game-over.
    fn outcome(&self) -> Option<Outcome>;

    fn is_terminal(&self) -> bool {
        self.phase() == SessionPhase::GameOver
    }

    fn summary(&self) -> Option<GameSummary> {
        let outcome = self.outcome()?;
        Some(GameSummary {
            kind: self.kind(),
            score: self.score(),
            rank: self.rank(),
            outcome,
        })
    }
}

/// Build a fresh session of the given kind. The session starts in its
/// initial phase (tutorial if it has one).
pub fn new_session(kind: GameKind, config: &ArcadeConfig, seed: u64) -> Box<dyn Session> {
    match kind {
        GameKind::Invader => Box::new(InvaderGame::new(config.invader.clone(), seed)),
        GameKind::Runner => Box::new(RunnerGame::new(
            config.runner.clone(),
            config.frame_rate,
            seed,
        )),
        GameKind::Batting => Box::new(BattingGame::new(config.batting.clone(), seed)),
        GameKind::FreeThrow => Box::new(FreeThrowGame::new(config.free_throw.clone(), seed)),
    }
}
