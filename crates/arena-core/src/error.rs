//! Error taxonomy for the arena simulation.

use crate::enums::GamePhase;

/// Errors raised at the simulation boundary.
///
/// None of these are fatal. Gameplay-reachable conditions (empty magazine,
/// blocked move, no enemies left) are ordinary state transitions and never
/// produce an `ArenaError`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ArenaError {
    /// Weapon name or slot not in the catalog.
    #[error("invalid weapon: {0}")]
    InvalidWeapon(String),

    /// Command not accepted in the current phase.
    #[error("command {command} not accepted while {phase}")]
    InvalidCommand {
        command: &'static str,
        phase: GamePhase,
    },

    /// Command payload is structurally invalid (non-finite numbers, zero aim).
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// A clamped quantity left its bounds. Indicates a programming error.
    #[error("invariant violation on {what}: {detail}")]
    InvariantViolation { what: &'static str, detail: String },
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is outside what the simulation accepts
    #[error("Invalid value for {field}: {detail}")]
    Invalid { field: &'static str, detail: String },
}
