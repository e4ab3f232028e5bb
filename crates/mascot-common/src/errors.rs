use std::path::PathBuf;

use crate::types::AnimationId;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("unknown animation: {0}")]
    UnknownAnimation(AnimationId),

    #[error("agent unavailable: {0}")]
    AgentUnavailable(String),

    #[error("playback failed: {0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MascotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("{0}")]
    Other(String),
}
