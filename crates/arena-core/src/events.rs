//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::{GamePhase, PowerupKind};

/// Named sound cues for the audio collaborator. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    #[serde(rename = "shoot")]
    Shoot,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "hit")]
    Hit,
    #[serde(rename = "gameover")]
    GameOver,
    #[serde(rename = "enemyDie")]
    EnemyDie,
    #[serde(rename = "powerup")]
    Powerup,
}

impl SoundCue {
    /// The cue name the audio layer keys its samples on.
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Empty => "empty",
            SoundCue::Hit => "hit",
            SoundCue::GameOver => "gameover",
            SoundCue::EnemyDie => "enemyDie",
            SoundCue::Powerup => "powerup",
        }
    }
}

/// State changes for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Top-level phase transition.
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
        level: u32,
    },
    /// A level was populated.
    LevelStarted {
        level: u32,
        enemies: u32,
        powerups: u32,
    },
    /// A bullet struck an enemy that survived.
    EnemyHit {
        enemy_id: EntityId,
        damage: i32,
        remaining_health: i32,
    },
    /// An enemy's health reached 0. Emitted exactly once per enemy.
    EnemyKilled { enemy_id: EntityId },
    /// An enemy attack landed on the player.
    PlayerDamaged {
        enemy_id: EntityId,
        damage: i32,
        health: i32,
    },
    PowerupCollected {
        powerup_id: EntityId,
        kind: PowerupKind,
    },
    /// A powerup's TTL ran out before collection.
    PowerupExpired { powerup_id: EntityId },
}
