//! Enemy AI system: pursuit and attacks each tick.
//!
//! Calls the decision functions from arena-ai, then applies the results
//! to the registry and the player.

use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use arena_core::constants::{ENEMY_OBSTACLE_RADIUS, ENEMY_STEP};
use arena_core::enums::AttackModel;
use arena_core::events::GameEvent;
use arena_core::types::Vector3;

use arena_ai::attack::{self, AttackContext};
use arena_ai::pursuit::{self, PursuitContext};

use crate::collision::{self, ObstacleTest};
use crate::player::Player;
use crate::registry::Registry;

/// Run the enemy AI for every enemy in spawn order.
///
/// Each enemy steps toward the player unless the step would bring it within
/// `ENEMY_OBSTACLE_RADIUS` of an obstacle, in which case it stalls this
/// tick. It then rolls its attack. Processing stops as soon as the player
/// dies, so no enemy acts on a dead player.
pub fn run(
    registry: &mut Registry,
    player: &mut Player,
    rng: &mut ChaCha8Rng,
    attack_model: AttackModel,
    current_tick: u64,
    events: &mut Vec<GameEvent>,
) {
    // Collect updates in a buffer, then apply them once iteration is done.
    let mut moves: Vec<(Entity, Vector3)> = Vec::new();
    let mut attacks: Vec<Entity> = Vec::new();

    for entry in registry.enemies() {
        let update = pursuit::evaluate(&PursuitContext {
            position: entry.position,
            target: player.position,
            step: ENEMY_STEP,
        });

        let mut position = entry.position;
        if update.wants_move
            && collision::is_clear(
                &update.candidate,
                registry.obstacles(),
                ObstacleTest::Proximity(ENEMY_OBSTACLE_RADIUS),
            )
        {
            position = update.candidate;
            moves.push((entry.entity, position));
        }

        let ctx = AttackContext {
            model: attack_model,
            distance_to_player: position.distance(&player.position),
            current_tick,
            last_attack_tick: entry.enemy.last_attack_tick,
        };
        if attack::evaluate(&ctx, rng) {
            let damage = attack_model.damage();
            let health = player.take_damage(damage);
            attacks.push(entry.entity);
            events.push(GameEvent::PlayerDamaged {
                enemy_id: entry.id,
                damage,
                health,
            });

            if player.is_dead() {
                log::debug!("player killed by enemy {}", entry.id.0);
                break;
            }
        }
    }

    for (entity, position) in moves {
        registry.set_position(entity, position);
    }
    for entity in attacks {
        if let Some(mut enemy) = registry.enemy_mut(entity) {
            enemy.last_attack_tick = Some(current_tick);
        }
    }
}
