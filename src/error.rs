use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("surface i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config value out of range: {0}")]
    InvalidConfig(String),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
