//! Player commands sent from the input layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::error::ArenaError;
use crate::types::Vector3;
use crate::weapons::WeaponId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement and combat ---
    /// Step along the floor. Components are clamped to [-1, 1].
    MoveDirection { dx: f64, dz: f64 },
    /// Point the player's facing (the direction bullets travel).
    Aim { direction: Vector3 },
    /// Equip a weapon. Ammo is untouched.
    SwitchWeapon { weapon: WeaponId },
    /// Fire the equipped weapon along the current facing.
    Fire,
    /// Pick up a powerup (pointer interaction mapped to its id).
    CollectPowerup { powerup_id: EntityId },

    // --- Game flow ---
    /// Leave the menu and begin level 1.
    Start,
    /// Replay the current level after a game over.
    Restart,
    /// Advance to the next level after completing one.
    Continue,
    /// Return to the menu from a finished level or a game over.
    ReturnToMenu,
}

impl PlayerCommand {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::MoveDirection { .. } => "MoveDirection",
            PlayerCommand::Aim { .. } => "Aim",
            PlayerCommand::SwitchWeapon { .. } => "SwitchWeapon",
            PlayerCommand::Fire => "Fire",
            PlayerCommand::CollectPowerup { .. } => "CollectPowerup",
            PlayerCommand::Start => "Start",
            PlayerCommand::Restart => "Restart",
            PlayerCommand::Continue => "Continue",
            PlayerCommand::ReturnToMenu => "ReturnToMenu",
        }
    }

    /// Structural validation, applied before a command is queued.
    pub fn validate(&self) -> Result<(), ArenaError> {
        match self {
            PlayerCommand::MoveDirection { dx, dz } => {
                if !dx.is_finite() || !dz.is_finite() {
                    return Err(ArenaError::MalformedCommand(format!(
                        "non-finite move ({dx}, {dz})"
                    )));
                }
            }
            PlayerCommand::Aim { direction } => {
                if !direction.is_finite() || direction.try_normalize().is_none() {
                    return Err(ArenaError::MalformedCommand(format!(
                        "cannot aim along {direction:?}"
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
