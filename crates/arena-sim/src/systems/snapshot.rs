//! Snapshot system: reads the registry and player and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use arena_core::enums::GamePhase;
use arena_core::events::{GameEvent, SoundCue};
use arena_core::state::*;
use arena_core::types::SimTime;
use arena_core::weapons::WeaponId;

use crate::player::Player;
use crate::registry::Registry;
use crate::systems::powerups;

/// Build a complete GameStateSnapshot from the current simulation state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    registry: &Registry,
    player: &Player,
    time: &SimTime,
    phase: GamePhase,
    level: u32,
    sound_cues: Vec<SoundCue>,
    events: Vec<GameEvent>,
    score: &ScoreView,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level,
        player: build_player(player),
        enemies: build_enemies(registry),
        bullets: build_bullets(registry),
        powerups: build_powerups(registry, time.tick),
        sound_cues,
        events,
        score: score.clone(),
    }
}

/// Build PlayerView, with ammo for every weapon in catalog order.
fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        position: player.position,
        facing: player.facing,
        health: player.health(),
        weapon: player.arsenal.current(),
        ammo: WeaponId::ALL
            .into_iter()
            .map(|weapon| AmmoView {
                weapon,
                rounds: player.arsenal.ammo(weapon),
                max_rounds: weapon.weapon().max_ammo,
            })
            .collect(),
    }
}

fn build_enemies(registry: &Registry) -> Vec<EnemyView> {
    registry
        .enemies()
        .into_iter()
        .map(|entry| EnemyView {
            id: entry.id,
            position: entry.position,
            health: entry.enemy.health,
        })
        .collect()
}

fn build_bullets(registry: &Registry) -> Vec<BulletView> {
    registry
        .bullets()
        .into_iter()
        .map(|entry| BulletView {
            id: entry.id,
            position: entry.position,
            weapon: entry.bullet.weapon,
        })
        .collect()
}

fn build_powerups(registry: &Registry, current_tick: u64) -> Vec<PowerupView> {
    registry
        .powerups()
        .into_iter()
        .map(|entry| PowerupView {
            id: entry.id,
            position: entry.position,
            kind: entry.powerup.kind,
            ttl_remaining_secs: powerups::ttl_remaining_secs(&entry.powerup, current_tick),
        })
        .collect()
}
