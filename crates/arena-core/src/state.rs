//! Game state snapshot: the complete visible state handed to presentation each tick.
//!
//! Obstacles are static and are not repeated here; presentation fetches
//! them once from the engine.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::{GamePhase, PowerupKind};
use crate::events::{GameEvent, SoundCue};
use crate::types::{SimTime, Vector3};
use crate::weapons::WeaponId;

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub powerups: Vec<PowerupView>,
    pub sound_cues: Vec<SoundCue>,
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

/// Player status for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vector3,
    pub facing: Vector3,
    pub health: i32,
    pub weapon: WeaponId,
    /// Ammo for every weapon, in catalog order.
    pub ammo: Vec<AmmoView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoView {
    pub weapon: WeaponId,
    pub rounds: u32,
    pub max_rounds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub position: Vector3,
    pub health: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub position: Vector3,
    pub weapon: WeaponId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: EntityId,
    pub position: Vector3,
    pub kind: PowerupKind,
    /// Seconds left before the powerup despawns.
    pub ttl_remaining_secs: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub shots_fired: u32,
    pub powerups_collected: u32,
}
