//! Bullet ballistics: advance bullets, resolve hits, expire strays.

use hecs::Entity;

use arena_core::constants::{BULLET_HIT_RADIUS, BULLET_MAX_DISTANCE, BULLET_SPEED};
use arena_core::events::{GameEvent, SoundCue};
use arena_core::types::Vector3;

use crate::collision;
use crate::registry::Registry;

/// What happened to bullets this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallisticsOutcome {
    pub hits: u32,
    pub kills: u32,
    pub expired: u32,
}

/// Distance a bullet has travelled, measured as its distance from the world origin.
pub fn distance_travelled(position: &Vector3) -> f64 {
    position.length()
}

/// True once a bullet is strictly beyond `BULLET_MAX_DISTANCE`.
pub fn is_expired(position: &Vector3) -> bool {
    distance_travelled(position) > BULLET_MAX_DISTANCE
}

/// Run ballistics for one tick.
///
/// Bullets advance in spawn order. Each advanced bullet is tested against
/// live enemies in spawn order; the first enemy within `BULLET_HIT_RADIUS`
/// takes the bullet's damage and the bullet is spent. An enemy whose health
/// reaches 0 is dead for the rest of the tick: later bullets pass through
/// it, and its death is reported once. Bullets that hit nothing and are past
/// `BULLET_MAX_DISTANCE` are removed.
pub fn run(
    registry: &mut Registry,
    events: &mut Vec<GameEvent>,
    sound_cues: &mut Vec<SoundCue>,
) -> BallisticsOutcome {
    let mut outcome = BallisticsOutcome::default();

    // Enemy snapshot; health is tracked here and written back at the end.
    let mut enemies = registry.enemies();
    let mut damaged = vec![false; enemies.len()];
    let mut moved: Vec<(Entity, Vector3)> = Vec::new();
    let mut spent: Vec<Entity> = Vec::new();

    for entry in registry.bullets() {
        let position = entry.position + entry.bullet.direction * BULLET_SPEED;

        let target = enemies.iter_mut().enumerate().find(|(_, enemy)| {
            enemy.enemy.health > 0
                && collision::within_radius(&position, &enemy.position, BULLET_HIT_RADIUS)
        });

        if let Some((index, enemy)) = target {
            let damage = entry.bullet.damage.max(0);
            enemy.enemy.health = (enemy.enemy.health - damage).max(0);
            damaged[index] = true;
            outcome.hits += 1;
            sound_cues.push(SoundCue::Hit);

            if enemy.enemy.health == 0 {
                outcome.kills += 1;
                sound_cues.push(SoundCue::EnemyDie);
                events.push(GameEvent::EnemyKilled { enemy_id: enemy.id });
                log::debug!("enemy {} killed by bullet {}", enemy.id.0, entry.id.0);
            } else {
                events.push(GameEvent::EnemyHit {
                    enemy_id: enemy.id,
                    damage,
                    remaining_health: enemy.enemy.health,
                });
            }
            spent.push(entry.entity);
        } else if is_expired(&position) {
            outcome.expired += 1;
            spent.push(entry.entity);
        } else {
            moved.push((entry.entity, position));
        }
    }

    for (entity, position) in moved {
        registry.set_position(entity, position);
    }

    for (enemy, _) in enemies
        .iter()
        .zip(damaged.iter())
        .filter(|(_, hit)| **hit)
    {
        if enemy.enemy.health == 0 {
            registry.mark_for_removal(enemy.entity);
        } else if let Some(mut component) = registry.enemy_mut(enemy.entity) {
            component.health = enemy.enemy.health;
        }
    }

    for entity in spent {
        registry.mark_for_removal(entity);
    }
    registry.compact();

    outcome
}
