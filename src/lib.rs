pub mod celebration;
pub mod collision;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod games;
pub mod input;
pub mod physics;
pub mod score;
pub mod session;

pub use config::ArcadeConfig;
pub use driver::{LoopDriver, TickStatus};
pub use entities::{GameKind, GameSummary, Outcome, Priority};
pub use error::{GameError, Result};
pub use session::{new_session, Session};
