//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//! `Vector3` doubles as the position component.

use serde::{Deserialize, Serialize};

use crate::enums::PowerupKind;
use crate::types::Vector3;
use crate::weapons::WeaponId;

/// Stable identity assigned at spawn. Never reused, even across levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A hostile that pursues the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Remaining health. The enemy is removed once this reaches 0.
    pub health: i32,
    /// Tick of this enemy's last successful attack.
    pub last_attack_tick: Option<u64>,
}

/// A projectile fired by the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Unit direction of travel.
    pub direction: Vector3,
    /// Weapon that fired it.
    pub weapon: WeaponId,
    /// Health removed from the enemy it hits.
    pub damage: i32,
}

/// A collectible pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    /// Tick at which the powerup was spawned (TTL reference).
    pub spawned_tick: u64,
}
