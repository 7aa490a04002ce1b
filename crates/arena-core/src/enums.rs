//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    LevelComplete,
    GameOver,
}

/// What a powerup does when collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Restores player health.
    Health,
    /// Adds rounds to the equipped weapon.
    Ammo,
}

/// How enemies decide to damage the player each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum AttackModel {
    /// Independent per-tick roll, regardless of distance.
    Probabilistic { chance: f64, damage: i32 },
    /// Hit only within `range`, at most once per `cooldown_secs` per enemy.
    Melee {
        range: f64,
        cooldown_secs: f64,
        damage: i32,
    },
}

impl Default for AttackModel {
    fn default() -> Self {
        AttackModel::Probabilistic {
            chance: crate::constants::ENEMY_ATTACK_CHANCE,
            damage: crate::constants::ENEMY_ATTACK_DAMAGE,
        }
    }
}

impl AttackModel {
    /// Health removed from the player by one successful attack.
    pub fn damage(&self) -> i32 {
        match *self {
            AttackModel::Probabilistic { damage, .. } | AttackModel::Melee { damage, .. } => {
                damage
            }
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Menu => "Menu",
            GamePhase::Playing => "Playing",
            GamePhase::LevelComplete => "LevelComplete",
            GamePhase::GameOver => "GameOver",
        };
        f.write_str(name)
    }
}
