use thiserror::Error;

use arena_core::error::ConfigError;

use crate::input::InputError;

/// Errors surfaced by the headless driver.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop has stopped")]
    LoopStopped,

    #[error("game loop thread panicked")]
    LoopPanicked,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}
