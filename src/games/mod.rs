pub mod batting;
pub mod free_throw;
pub mod invader;
pub mod runner;

pub use batting::BattingGame;
pub use free_throw::FreeThrowGame;
pub use invader::InvaderGame;
pub use runner::RunnerGame;
