//! Tests for the simulation engine, registry, collision, arsenal, and systems.

use std::collections::HashMap;

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use arena_core::commands::PlayerCommand;
use arena_core::components::{Bullet, EntityId, Powerup};
use arena_core::config::SimConfig;
use arena_core::constants::*;
use arena_core::enums::*;
use arena_core::error::ArenaError;
use arena_core::events::{GameEvent, SoundCue};
use arena_core::state::GameStateSnapshot;
use arena_core::types::{Obstacle, Vector3};
use arena_core::weapons::WeaponId;

use crate::arsenal::Arsenal;
use crate::collision::{self, ObstacleTest};
use crate::engine::SimulationEngine;
use crate::level::{next_phase, FlowTrigger, LevelPlan};
use crate::player::Player;
use crate::registry::Registry;
use crate::systems::{ballistics, enemy_ai, player_movement, powerups};
use crate::world_setup;

// ---- Helpers ----

/// Config in which enemies never land an attack.
fn quiet_config() -> SimConfig {
    SimConfig {
        attack: AttackModel::Probabilistic {
            chance: 0.0,
            damage: ENEMY_ATTACK_DAMAGE,
        },
        ..Default::default()
    }
}

/// Config in which every enemy lands an attack every tick.
fn lethal_config() -> SimConfig {
    SimConfig {
        attack: AttackModel::Probabilistic {
            chance: 1.0,
            damage: ENEMY_ATTACK_DAMAGE,
        },
        ..Default::default()
    }
}

/// Engine that has processed Start and run its first tick.
fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::Start).unwrap();
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Playing);
    engine
}

fn pistol_bullet(direction: Vector3) -> Bullet {
    Bullet {
        direction,
        weapon: WeaponId::Pistol,
        damage: WeaponId::Pistol.weapon().damage,
    }
}

/// Spawn a bullet that will sit exactly on `target` after one advance.
fn bullet_onto(registry: &mut Registry, target: Vector3) -> EntityId {
    let direction = Vector3::new(0.0, 0.0, -1.0);
    registry.spawn_bullet(target - direction * BULLET_SPEED, pistol_bullet(direction))
}

fn count_cue(snapshot: &GameStateSnapshot, cue: SoundCue) -> usize {
    snapshot.sound_cues.iter().filter(|c| **c == cue).count()
}

fn kills(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::Start).unwrap();
    engine_b.queue_command(PlayerCommand::Start).unwrap();

    for i in 0..600 {
        if i % 20 == 0 {
            for engine in [&mut engine_a, &mut engine_b] {
                engine
                    .queue_commands([PlayerCommand::Fire, PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 }])
                    .unwrap();
            }
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::Start).unwrap();
    engine_b.queue_command(PlayerCommand::Start).unwrap();

    // Spawn positions come from the RNG, so the first snapshot already differs.
    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce divergent output");
}

// ---- Menu and commands ----

#[test]
fn test_new_engine_starts_at_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert_eq!(snapshot.level, FIRST_LEVEL);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.powerups.is_empty());
    assert_eq!(engine.obstacles().len(), OBSTACLE_LAYOUT.len());
}

#[test]
fn test_gameplay_commands_ignored_in_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine
        .queue_commands([
            PlayerCommand::Fire,
            PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 },
            PlayerCommand::Continue,
            PlayerCommand::Restart,
        ])
        .unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert!(snapshot.sound_cues.is_empty());
    assert!(snapshot.bullets.is_empty());
    assert_eq!(snapshot.player.position, PLAYER_START);
    assert_eq!(snapshot.player.ammo[0].rounds, WeaponId::Pistol.weapon().max_ammo);
    assert_eq!(engine.time().tick, 0, "Time should not advance outside Playing");
}

#[test]
fn test_malformed_commands_rejected_at_queue() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert!(matches!(
        engine.queue_command(PlayerCommand::Aim {
            direction: Vector3::ZERO
        }),
        Err(ArenaError::MalformedCommand(_))
    ));
    assert!(matches!(
        engine.queue_command(PlayerCommand::MoveDirection {
            dx: f64::INFINITY,
            dz: 0.0
        }),
        Err(ArenaError::MalformedCommand(_))
    ));
}

#[test]
fn test_start_populates_level_one() {
    let mut engine = SimulationEngine::new(quiet_config());
    engine.queue_command(PlayerCommand::Start).unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.enemies.len(), 2);
    assert_eq!(snapshot.powerups.len(), 1);
    assert!(snapshot.enemies.iter().all(|e| e.health == ENEMY_START_HEALTH));
    assert!(snapshot.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Menu,
        to: GamePhase::Playing,
        level: 1,
    }));
    assert!(snapshot.events.contains(&GameEvent::LevelStarted {
        level: 1,
        enemies: 2,
        powerups: 1,
    }));
}

#[test]
fn test_tick_timing_sixty_ticks_one_second() {
    let mut engine = started(quiet_config());
    for _ in 1..TICK_RATE {
        engine.tick();
    }
    assert_eq!(engine.time().tick, TICK_RATE as u64);
    assert_relative_eq!(engine.time().elapsed_secs, 1.0, epsilon = 1e-9);
}

// ---- Movement ----

#[test]
fn test_player_moves_half_unit_per_command() {
    let mut engine = started(quiet_config());
    engine
        .queue_command(PlayerCommand::MoveDirection { dx: 0.0, dz: -1.0 })
        .unwrap();
    let snapshot = engine.tick();
    assert_eq!(
        snapshot.player.position,
        PLAYER_START + Vector3::new(0.0, 0.0, -PLAYER_MOVE_STEP)
    );
}

#[test]
fn test_player_move_into_obstacle_rejected() {
    let obstacles = world_setup::arena_obstacles();
    let mut player = Player::new();
    // Obstacle at (5, 1, 0) spans z in (-1, 1).
    player.position = Vector3::new(5.0, 0.0, 1.2);

    assert!(!player_movement::try_move(&mut player, 0.0, -1.0, &obstacles));
    assert_eq!(player.position, Vector3::new(5.0, 0.0, 1.2));

    // Sideways is free.
    assert!(player_movement::try_move(&mut player, 1.0, 0.0, &obstacles));
    assert_eq!(player.position, Vector3::new(5.5, 0.0, 1.2));
}

#[test]
fn test_player_move_touching_obstacle_face_allowed() {
    let obstacles = world_setup::arena_obstacles();
    let mut player = Player::new();
    player.position = Vector3::new(5.0, 0.0, 1.5);

    // Lands exactly on the z = 1 face: touching, not intruding.
    assert!(player_movement::try_move(&mut player, 0.0, -1.0, &obstacles));
    assert_eq!(player.position, Vector3::new(5.0, 0.0, 1.0));
}

#[test]
fn test_player_cannot_leave_arena() {
    let mut player = Player::new();
    player.position = Vector3::new(0.0, 0.0, ARENA_HALF_EXTENT - 0.2);
    assert!(!player_movement::try_move(&mut player, 0.0, 1.0, &[]));
    assert_eq!(player.position.z, ARENA_HALF_EXTENT - 0.2);
}

#[test]
fn test_move_components_clamped() {
    let mut player = Player::new();
    assert!(player_movement::try_move(&mut player, 10.0, 0.0, &[]));
    assert_eq!(player.position, PLAYER_START + Vector3::new(PLAYER_MOVE_STEP, 0.0, 0.0));
    assert!(!player_movement::try_move(&mut player, 0.0, 0.0, &[]));
}

// ---- Firing ----

#[test]
fn test_scenario_a_single_round_fired_twice() {
    let mut engine = started(quiet_config());
    engine.player_mut().arsenal = Arsenal::empty();
    engine.player_mut().arsenal.add_ammo(WeaponId::Pistol, 1);

    engine
        .queue_commands([PlayerCommand::Fire, PlayerCommand::Fire])
        .unwrap();
    let snapshot = engine.tick();

    assert_eq!(count_cue(&snapshot, SoundCue::Shoot), 1);
    assert_eq!(count_cue(&snapshot, SoundCue::Empty), 1);
    assert_eq!(snapshot.player.ammo[WeaponId::Pistol.index()].rounds, 0);
    assert_eq!(snapshot.score.shots_fired, 1);
}

#[test]
fn test_fire_rate_gates_second_shot() {
    let mut engine = started(quiet_config());
    engine
        .queue_commands([PlayerCommand::Fire, PlayerCommand::Fire])
        .unwrap();
    let snapshot = engine.tick();

    let max = WeaponId::Pistol.weapon().max_ammo;
    assert_eq!(snapshot.player.ammo[0].rounds, max - 1);
    assert_eq!(count_cue(&snapshot, SoundCue::Shoot), 1);
    // Too fast is silent: the magazine is not empty.
    assert_eq!(count_cue(&snapshot, SoundCue::Empty), 0);

    // Pistol interval is 500 ms = 30 ticks.
    for _ in 0..29 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::Fire).unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.ammo[0].rounds, max - 2);
}

#[test]
fn test_fire_spawns_bullet_along_facing() {
    let mut engine = started(quiet_config());
    engine.registry_mut().clear();
    engine.registry_mut().spawn_enemy(Vector3::new(-20.0, 0.0, -20.0));

    engine
        .queue_commands([
            PlayerCommand::Aim {
                direction: Vector3::new(2.0, 0.0, 0.0),
            },
            PlayerCommand::Fire,
        ])
        .unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.bullets.len(), 1);
    assert_eq!(snapshot.bullets[0].weapon, WeaponId::Pistol);

    let bullets = engine.registry().bullets();
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].bullet.direction, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(
        bullets[0].position,
        PLAYER_START + Vector3::new(BULLET_SPEED, 0.0, 0.0)
    );
}

#[test]
fn test_switch_weapon_keeps_ammo() {
    let mut engine = started(quiet_config());
    engine
        .queue_commands([
            PlayerCommand::SwitchWeapon {
                weapon: WeaponId::Shotgun,
            },
            PlayerCommand::Fire,
        ])
        .unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.player.weapon, WeaponId::Shotgun);
    assert_eq!(
        snapshot.player.ammo[WeaponId::Pistol.index()].rounds,
        WeaponId::Pistol.weapon().max_ammo
    );
    assert_eq!(
        snapshot.player.ammo[WeaponId::Shotgun.index()].rounds,
        WeaponId::Shotgun.weapon().max_ammo - 1
    );
}

// ---- Arsenal ----

#[test]
fn test_arsenal_fire_needs_ammo() {
    let mut arsenal = Arsenal::empty();
    assert!(!arsenal.fire(WeaponId::Pistol, 0));
    assert_eq!(arsenal.ammo(WeaponId::Pistol), 0);
}

#[test]
fn test_arsenal_fire_interval_boundary() {
    let mut arsenal = Arsenal::full();
    assert!(arsenal.fire(WeaponId::Pistol, 1000));
    assert!(!arsenal.fire(WeaponId::Pistol, 1499));
    assert!(arsenal.fire(WeaponId::Pistol, 1500));
    assert_eq!(arsenal.ammo(WeaponId::Pistol), WeaponId::Pistol.weapon().max_ammo - 2);
}

#[test]
fn test_arsenal_gating_is_per_weapon() {
    let mut arsenal = Arsenal::full();
    assert!(arsenal.fire(WeaponId::Pistol, 0));
    assert!(arsenal.fire(WeaponId::Shotgun, 0));
}

#[test]
fn test_arsenal_add_then_fire_round_trip() {
    for added in [1, 7, 50, 500] {
        let mut arsenal = Arsenal::empty();
        arsenal.add_ammo(WeaponId::Pistol, added);
        assert!(arsenal.fire(WeaponId::Pistol, 0));
        let max = WeaponId::Pistol.weapon().max_ammo;
        assert_eq!(arsenal.ammo(WeaponId::Pistol), added.min(max) - 1);
    }
}

#[test]
fn test_arsenal_add_ammo_clamped() {
    let mut arsenal = Arsenal::full();
    assert_eq!(arsenal.add_ammo(WeaponId::Shotgun, 20), 0);
    assert_eq!(arsenal.ammo(WeaponId::Shotgun), WeaponId::Shotgun.weapon().max_ammo);
    assert_eq!(arsenal.add_ammo(WeaponId::Shotgun, u32::MAX), 0);
}

#[test]
fn test_arsenal_switch_has_no_side_effects() {
    let mut arsenal = Arsenal::full();
    arsenal.fire(WeaponId::Pistol, 0);
    let before = arsenal.clone();
    arsenal.switch_weapon(WeaponId::Shotgun);
    assert_eq!(arsenal.current(), WeaponId::Shotgun);
    assert_eq!(arsenal.ammo(WeaponId::Pistol), before.ammo(WeaponId::Pistol));
    assert_eq!(arsenal.ammo(WeaponId::Shotgun), before.ammo(WeaponId::Shotgun));
    // Pistol's fire timing survived the switch.
    assert!(!arsenal.fire(WeaponId::Pistol, 100));
}

// ---- Player ----

#[test]
fn test_player_health_clamped() {
    let mut player = Player::new();
    assert_eq!(player.heal(50), PLAYER_MAX_HEALTH);
    assert_eq!(player.take_damage(30), 70);
    assert_eq!(player.take_damage(500), 0);
    assert!(player.is_dead());
    assert_eq!(player.take_damage(5), 0);
    assert_eq!(player.heal(-10), 0, "Negative heal is ignored");
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "invariant violation on ammo")]
fn test_invariant_violation_panics_in_debug() {
    crate::invariants::enforce_range("ammo", 60u32, 0, 50);
}

// ---- Collision ----

#[test]
fn test_point_in_box_is_strict() {
    let center = Vector3::new(0.0, 0.0, 0.0);
    let half = Vector3::new(1.0, 2.0, 1.0);
    assert!(collision::point_in_box(&Vector3::new(0.5, 1.9, -0.9), &center, &half));
    assert!(!collision::point_in_box(&Vector3::new(1.0, 0.0, 0.0), &center, &half));
    assert!(!collision::point_in_box(&Vector3::new(0.0, -2.0, 0.0), &center, &half));
    assert!(!collision::point_in_box(&Vector3::new(0.0, 0.0, 1.5), &center, &half));
}

#[test]
fn test_within_radius_is_strict() {
    let a = Vector3::new(0.0, 0.0, 0.0);
    assert!(collision::within_radius(&a, &Vector3::new(0.99, 0.0, 0.0), 1.0));
    assert!(!collision::within_radius(&a, &Vector3::new(1.0, 0.0, 0.0), 1.0));
}

#[test]
fn test_is_clear_checks_every_obstacle() {
    let obstacles = world_setup::arena_obstacles();
    let inside_last = Vector3::new(0.0, 0.0, -10.0);
    assert!(!collision::is_clear(&inside_last, &obstacles, ObstacleTest::Box));
    assert!(!collision::is_clear(
        &inside_last,
        &obstacles,
        ObstacleTest::Proximity(ENEMY_OBSTACLE_RADIUS)
    ));
    assert!(collision::is_clear(&PLAYER_START, &obstacles, ObstacleTest::Box));
    assert!(collision::is_clear(&inside_last, &[], ObstacleTest::Box));
}

// ---- Registry ----

#[test]
fn test_registry_ids_unique_and_never_reused() {
    let mut registry = Registry::new(Vec::new());
    let a = registry.spawn_enemy(Vector3::ZERO);
    let b = registry.spawn_bullet(Vector3::ZERO, pistol_bullet(Vector3::new(1.0, 0.0, 0.0)));
    assert_ne!(a, b);

    assert!(registry.remove(a));
    assert!(!registry.remove(a), "Removing twice should fail");
    registry.clear();

    let c = registry.spawn_enemy(Vector3::ZERO);
    assert!(c > b, "Ids keep increasing across removal and clear");
}

#[test]
fn test_registry_listing_keeps_spawn_order_after_removal() {
    let mut registry = Registry::new(Vec::new());
    let ids: Vec<EntityId> = (0..5)
        .map(|i| registry.spawn_enemy(Vector3::new(i as f64, 0.0, 0.0)))
        .collect();
    registry.remove(ids[1]);

    let listed: Vec<EntityId> = registry.enemies().iter().map(|e| e.id).collect();
    assert_eq!(listed, vec![ids[0], ids[2], ids[3], ids[4]]);
}

#[test]
fn test_registry_deferred_removal() {
    let mut registry = Registry::new(Vec::new());
    registry.spawn_enemy(Vector3::ZERO);
    registry.spawn_enemy(Vector3::ZERO);

    for entry in registry.enemies() {
        registry.mark_for_removal(entry.entity);
        assert_eq!(registry.enemy_count(), 2, "Nothing removed before compact");
    }
    assert_eq!(registry.compact(), 2);
    assert_eq!(registry.enemy_count(), 0);
}

#[test]
fn test_registry_clear_keeps_obstacles() {
    let mut registry = Registry::new(world_setup::arena_obstacles());
    registry.spawn_enemy(Vector3::ZERO);
    registry.spawn_powerup(
        Vector3::ZERO,
        Powerup {
            kind: PowerupKind::Ammo,
            spawned_tick: 0,
        },
    );
    registry.clear();
    assert_eq!(registry.enemy_count(), 0);
    assert_eq!(registry.powerup_count(), 0);
    assert_eq!(registry.obstacles().len(), 3);
}

// ---- Enemy AI ----

#[test]
fn test_enemy_pursues_player() {
    let mut registry = Registry::new(Vec::new());
    registry.spawn_enemy(Vector3::new(10.0, 0.0, 0.0));
    let mut player = Player::new();
    player.position = Vector3::ZERO;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    enemy_ai::run(
        &mut registry,
        &mut player,
        &mut rng,
        quiet_config().attack,
        0,
        &mut events,
    );

    let enemy = &registry.enemies()[0];
    assert_relative_eq!(enemy.position.x, 10.0 - ENEMY_STEP, epsilon = 1e-12);
    assert!(events.is_empty());
}

#[test]
fn test_enemy_stalls_near_obstacle() {
    let obstacle = Obstacle::new(Vector3::new(5.0, 1.0, 0.0), Vector3::new(2.0, 4.0, 2.0));
    let mut registry = Registry::new(vec![obstacle]);
    let start = Vector3::new(5.0, 1.0, 2.01);
    registry.spawn_enemy(start);
    let mut player = Player::new();
    player.position = Vector3::new(5.0, 1.0, -10.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    for tick in 0..10 {
        enemy_ai::run(
            &mut registry,
            &mut player,
            &mut rng,
            quiet_config().attack,
            tick,
            &mut events,
        );
    }

    assert_eq!(registry.enemies()[0].position, start, "Blocked enemy should not move");
}

#[test]
fn test_enemy_attacks_stop_when_player_dies() {
    let mut registry = Registry::new(Vec::new());
    for i in 0..3 {
        registry.spawn_enemy(Vector3::new(i as f64 * 5.0, 0.0, 0.0));
    }
    let mut player = Player::new();
    player.set_health(ENEMY_ATTACK_DAMAGE);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    enemy_ai::run(
        &mut registry,
        &mut player,
        &mut rng,
        lethal_config().attack,
        0,
        &mut events,
    );

    assert!(player.is_dead());
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        GameEvent::PlayerDamaged { health: 0, .. }
    ));
}

#[test]
fn test_melee_attack_respects_cooldown() {
    let mut registry = Registry::new(Vec::new());
    registry.spawn_enemy(Vector3::new(0.0, 0.0, 1.0));
    let mut player = Player::new();
    player.position = Vector3::ZERO;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let melee = AttackModel::Melee {
        range: ENEMY_MELEE_RANGE,
        cooldown_secs: ENEMY_MELEE_COOLDOWN_SECS,
        damage: ENEMY_ATTACK_DAMAGE,
    };

    // Two seconds of contact: one hit per cooldown.
    for tick in 0..(2 * TICK_RATE as u64) {
        enemy_ai::run(&mut registry, &mut player, &mut rng, melee, tick, &mut events);
    }

    assert_eq!(events.len(), 2);
    assert_eq!(player.health(), PLAYER_MAX_HEALTH - 2 * ENEMY_ATTACK_DAMAGE);
}

// ---- Ballistics ----

#[test]
fn test_scenario_b_pistol_shots_until_death() {
    let mut registry = Registry::new(Vec::new());
    let target = Vector3::new(0.0, 0.0, -5.0);
    let enemy_id = registry.spawn_enemy(target);
    let mut events = Vec::new();
    let mut cues = Vec::new();

    for _ in 0..3 {
        bullet_onto(&mut registry, target);
        ballistics::run(&mut registry, &mut events, &mut cues);
    }
    let enemy = registry.enemies()[0].clone();
    assert_eq!(enemy.id, enemy_id);
    assert_eq!(enemy.enemy.health, 70);
    assert_eq!(kills(&events), 0);

    for shot in 4..=10 {
        bullet_onto(&mut registry, target);
        let outcome = ballistics::run(&mut registry, &mut events, &mut cues);
        if shot < 10 {
            assert_eq!(outcome.kills, 0);
            assert_eq!(registry.enemy_count(), 1);
        } else {
            assert_eq!(outcome.kills, 1, "Death reported on the tick health reaches 0");
        }
    }

    assert_eq!(kills(&events), 1);
    assert_eq!(registry.enemy_count(), 0);
    assert_eq!(registry.bullet_count(), 0);
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::EnemyDie).count(), 1);
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::Hit).count(), 10);
}

#[test]
fn test_overkill_in_one_tick_reports_one_death() {
    let mut registry = Registry::new(Vec::new());
    let target = Vector3::new(3.0, 0.0, 3.0);
    registry.spawn_enemy(target);
    for _ in 0..12 {
        bullet_onto(&mut registry, target);
    }
    let mut events = Vec::new();
    let mut cues = Vec::new();

    let outcome = ballistics::run(&mut registry, &mut events, &mut cues);

    assert_eq!(outcome.hits, 10);
    assert_eq!(outcome.kills, 1);
    assert_eq!(kills(&events), 1);
    assert_eq!(registry.enemy_count(), 0);
    // The last two bullets found nothing alive and fly on.
    assert_eq!(registry.bullet_count(), 2);
}

#[test]
fn test_bullet_hits_first_enemy_only() {
    let mut registry = Registry::new(Vec::new());
    let first = registry.spawn_enemy(Vector3::new(0.0, 0.0, -5.0));
    let second = registry.spawn_enemy(Vector3::new(0.3, 0.0, -5.0));
    bullet_onto(&mut registry, Vector3::new(0.15, 0.0, -5.0));
    let mut events = Vec::new();
    let mut cues = Vec::new();

    let outcome = ballistics::run(&mut registry, &mut events, &mut cues);

    assert_eq!(outcome.hits, 1);
    let enemies = registry.enemies();
    assert_eq!(enemies[0].id, first);
    assert_eq!(enemies[0].enemy.health, ENEMY_START_HEALTH - 10);
    assert_eq!(enemies[1].id, second);
    assert_eq!(enemies[1].enemy.health, ENEMY_START_HEALTH);
}

#[test]
fn test_bullet_expiry_boundary() {
    let mut registry = Registry::new(Vec::new());
    let direction = Vector3::new(1.0, 0.0, 0.0);
    registry.spawn_bullet(Vector3::new(49.5, 0.0, 0.0), pistol_bullet(direction));
    let mut events = Vec::new();
    let mut cues = Vec::new();

    // Lands exactly on 50: still live.
    let outcome = ballistics::run(&mut registry, &mut events, &mut cues);
    assert_eq!(outcome.expired, 0);
    assert_eq!(registry.bullets()[0].position, Vector3::new(50.0, 0.0, 0.0));

    // Next tick it is past 50 and pruned.
    let outcome = ballistics::run(&mut registry, &mut events, &mut cues);
    assert_eq!(outcome.expired, 1);
    assert_eq!(registry.bullet_count(), 0);

    // Just past the boundary is pruned on the tick it gets there.
    registry.spawn_bullet(Vector3::new(49.5001, 0.0, 0.0), pistol_bullet(direction));
    let outcome = ballistics::run(&mut registry, &mut events, &mut cues);
    assert_eq!(outcome.expired, 1);
    assert_eq!(registry.bullet_count(), 0);
}

#[test]
fn test_distance_travelled_is_origin_distance() {
    assert!(!ballistics::is_expired(&Vector3::new(30.0, 0.0, 40.0)));
    assert!(ballistics::is_expired(&Vector3::new(30.0, 0.0, 40.0001)));
    assert_relative_eq!(
        ballistics::distance_travelled(&Vector3::new(30.0, 0.0, 40.0)),
        50.0
    );
}

// ---- Level flow ----

#[test]
fn test_state_machine_table() {
    use FlowTrigger::*;
    use GamePhase::*;

    assert_eq!(next_phase(Menu, Start), Some(Playing));
    assert_eq!(next_phase(Playing, PlayerDied), Some(GameOver));
    assert_eq!(next_phase(Playing, EnemiesCleared), Some(LevelComplete));
    assert_eq!(next_phase(GameOver, Restart), Some(Playing));
    assert_eq!(next_phase(LevelComplete, Continue), Some(Playing));
    assert_eq!(next_phase(GameOver, ReturnToMenu), Some(Menu));
    assert_eq!(next_phase(LevelComplete, ReturnToMenu), Some(Menu));

    assert_eq!(next_phase(Menu, Restart), None);
    assert_eq!(next_phase(Menu, Continue), None);
    assert_eq!(next_phase(Playing, Start), None);
    assert_eq!(next_phase(Playing, ReturnToMenu), None);
    assert_eq!(next_phase(GameOver, Continue), None);
    assert_eq!(next_phase(LevelComplete, Restart), None);
    assert_eq!(next_phase(GameOver, EnemiesCleared), None);
}

#[test]
fn test_level_plan_counts() {
    assert_eq!(
        LevelPlan::for_level(1),
        LevelPlan {
            level: 1,
            enemy_count: 2,
            powerup_count: 1
        }
    );
    assert_eq!(LevelPlan::for_level(3).enemy_count, 6);
    assert_eq!(LevelPlan::for_level(3).powerup_count, 3);
}

/// Put a lethal bullet on every live enemy.
fn arm_kill_shots(engine: &mut SimulationEngine) {
    let registry = engine.registry_mut();
    for entry in registry.enemies() {
        if let Some(mut enemy) = registry.enemy_mut(entry.entity) {
            enemy.health = WeaponId::Pistol.weapon().damage;
        }
        bullet_onto(registry, entry.position);
    }
}

#[test]
fn test_scenario_c_level_complete_on_kill_tick() {
    let mut engine = started(quiet_config());
    arm_kill_shots(&mut engine);

    let snapshot = engine.tick();

    assert_eq!(kills(&snapshot.events), 2);
    assert_eq!(snapshot.phase, GamePhase::LevelComplete);
    assert!(snapshot.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Playing,
        to: GamePhase::LevelComplete,
        level: 1,
    }));
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.bullets.is_empty());
    assert!(snapshot.powerups.is_empty());
    assert_eq!(snapshot.score.enemies_killed, 2);
}

#[test]
fn test_continue_advances_level_and_keeps_health() {
    let mut engine = started(quiet_config());
    engine.player_mut().set_health(60);
    engine.player_mut().position = Vector3::new(3.0, 0.0, 3.0);
    arm_kill_shots(&mut engine);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::LevelComplete);

    engine.queue_command(PlayerCommand::Continue).unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.level, 2);
    assert_eq!(snapshot.enemies.len(), 4);
    assert_eq!(snapshot.powerups.len(), 2);
    assert_eq!(snapshot.player.health, 60);
    assert_eq!(snapshot.player.position, PLAYER_START);
}

#[test]
fn test_scenario_d_game_over_on_damage_tick() {
    let mut engine = started(lethal_config());
    engine.player_mut().set_health(ENEMY_ATTACK_DAMAGE);

    engine
        .queue_command(PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 })
        .unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::GameOver);
    assert_eq!(snapshot.player.health, 0);
    assert_eq!(count_cue(&snapshot, SoundCue::GameOver), 1);
    let damage_events = snapshot
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
        .count();
    assert_eq!(damage_events, 1, "No enemy acts after the killing blow");
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot.powerups.is_empty());

    // Movement is no longer accepted.
    let position = snapshot.player.position;
    engine
        .queue_command(PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 })
        .unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.position, position);
    assert_eq!(snapshot.phase, GamePhase::GameOver);
}

#[test]
fn test_restart_keeps_level_and_resets_player() {
    let mut engine = started(lethal_config());
    engine.player_mut().set_health(1);
    engine
        .queue_commands([
            PlayerCommand::Fire,
            PlayerCommand::MoveDirection { dx: 1.0, dz: 0.0 },
        ])
        .unwrap();
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::GameOver);

    engine.queue_command(PlayerCommand::Restart).unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.enemies.len(), 2);
    assert_eq!(snapshot.player.position, PLAYER_START);
    // Restart resets health, then this tick's attacks land.
    assert_eq!(snapshot.player.health, PLAYER_MAX_HEALTH - 2 * ENEMY_ATTACK_DAMAGE);
    assert_eq!(
        snapshot.player.ammo[0].rounds,
        WeaponId::Pistol.weapon().max_ammo
    );
}

#[test]
fn test_return_to_menu_then_start_resets_level() {
    let mut engine = started(quiet_config());
    arm_kill_shots(&mut engine);
    engine.tick();
    engine.queue_command(PlayerCommand::Continue).unwrap();
    engine.tick();
    assert_eq!(engine.level(), 2);

    engine.player_mut().set_health(0);
    engine.tick();
    // Health 0 is noticed after the enemy pass.
    assert_eq!(engine.phase(), GamePhase::GameOver);

    engine.queue_command(PlayerCommand::ReturnToMenu).unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Menu);

    engine.queue_command(PlayerCommand::Start).unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.score.enemies_killed, 0);
}

// ---- Powerups ----

#[test]
fn test_scenario_e_powerup_expires_after_ttl() {
    let mut engine = started(quiet_config());
    let powerup_id = engine.registry().powerups()[0].id;

    // Spawned on tick 0; the 1800th tick after it removes it.
    for _ in 1..POWERUP_TTL_TICKS {
        engine.tick();
    }
    assert_eq!(engine.time().tick, POWERUP_TTL_TICKS);
    assert_eq!(engine.registry().powerup_count(), 1);

    let snapshot = engine.tick();
    assert_eq!(engine.registry().powerup_count(), 0);
    assert!(snapshot
        .events
        .contains(&GameEvent::PowerupExpired { powerup_id }));

    // Collecting it afterwards does nothing.
    engine.player_mut().set_health(40);
    engine
        .queue_command(PlayerCommand::CollectPowerup { powerup_id })
        .unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.health, 40);
    assert_eq!(count_cue(&snapshot, SoundCue::Powerup), 0);
    assert_eq!(snapshot.score.powerups_collected, 0);
}

#[test]
fn test_health_powerup_heals_and_clamps() {
    let mut engine = started(quiet_config());
    let tick = engine.time().tick;
    let powerup_id = engine.registry_mut().spawn_powerup(
        Vector3::new(1.0, 0.0, 1.0),
        Powerup {
            kind: PowerupKind::Health,
            spawned_tick: tick,
        },
    );
    engine.player_mut().set_health(80);

    engine
        .queue_command(PlayerCommand::CollectPowerup { powerup_id })
        .unwrap();
    let snapshot = engine.tick();

    assert_eq!(snapshot.player.health, PLAYER_MAX_HEALTH);
    assert_eq!(count_cue(&snapshot, SoundCue::Powerup), 1);
    assert!(snapshot.events.contains(&GameEvent::PowerupCollected {
        powerup_id,
        kind: PowerupKind::Health
    }));
    assert!(snapshot.powerups.iter().all(|p| p.id != powerup_id));

    // Second collection of the same id is a no-op.
    engine
        .queue_command(PlayerCommand::CollectPowerup { powerup_id })
        .unwrap();
    let snapshot = engine.tick();
    assert_eq!(count_cue(&snapshot, SoundCue::Powerup), 0);
    assert_eq!(snapshot.score.powerups_collected, 1);
}

#[test]
fn test_ammo_powerup_fills_equipped_weapon() {
    let mut registry = Registry::new(Vec::new());
    let powerup_id = registry.spawn_powerup(
        Vector3::ZERO,
        Powerup {
            kind: PowerupKind::Ammo,
            spawned_tick: 0,
        },
    );
    let mut player = Player::new();
    player.arsenal = Arsenal::empty();
    player.arsenal.add_ammo(WeaponId::Shotgun, 5);
    player.arsenal.switch_weapon(WeaponId::Shotgun);
    let mut events = Vec::new();
    let mut cues = Vec::new();

    let kind = powerups::collect(&mut registry, &mut player, powerup_id, &mut events, &mut cues);

    assert_eq!(kind, Some(PowerupKind::Ammo));
    assert_eq!(player.arsenal.ammo(WeaponId::Shotgun), 5 + POWERUP_AMMO_AMOUNT);
    assert_eq!(player.arsenal.ammo(WeaponId::Pistol), 0);
    assert_eq!(registry.powerup_count(), 0);
}

#[test]
fn test_powerup_ttl_remaining() {
    let powerup = Powerup {
        kind: PowerupKind::Health,
        spawned_tick: 100,
    };
    assert_relative_eq!(powerups::ttl_remaining_secs(&powerup, 100), POWERUP_TTL_SECS);
    assert_relative_eq!(
        powerups::ttl_remaining_secs(&powerup, 100 + TICK_RATE as u64),
        POWERUP_TTL_SECS - 1.0,
        epsilon = 1e-9
    );
    assert!(!powerups::is_expired(&powerup, 100 + POWERUP_TTL_TICKS - 1));
    assert!(powerups::is_expired(&powerup, 100 + POWERUP_TTL_TICKS));
    assert_eq!(powerups::ttl_remaining_secs(&powerup, 100_000), 0.0);
}

// ---- Spawning ----

#[test]
fn test_spawn_rejection_avoids_obstacles() {
    let obstacles = world_setup::arena_obstacles();
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..50 {
            let point = world_setup::spawn_point(&mut rng, &obstacles, true);
            assert!(collision::is_clear(
                &point,
                &obstacles,
                ObstacleTest::Proximity(ENEMY_OBSTACLE_RADIUS)
            ));
            assert!(point.x.abs() <= SPAWN_EXTENT && point.z.abs() <= SPAWN_EXTENT);
            assert_eq!(point.y, 0.0);
        }
    }
}

// ---- Long-run invariants ----

#[test]
fn test_invariants_hold_under_random_play() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        attack: AttackModel::Probabilistic {
            chance: 0.02,
            damage: ENEMY_ATTACK_DAMAGE,
        },
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Start).unwrap();
    let mut input = ChaCha8Rng::seed_from_u64(99);
    let mut enemy_health: HashMap<EntityId, i32> = HashMap::new();

    for _ in 0..5000 {
        let command = match input.gen_range(0..6) {
            0 => PlayerCommand::MoveDirection {
                dx: input.gen_range(-1.0..1.0),
                dz: input.gen_range(-1.0..1.0),
            },
            1 => PlayerCommand::Aim {
                direction: Vector3::new(input.gen_range(-1.0..1.0), 0.0, input.gen_range(0.1..1.0)),
            },
            2 => PlayerCommand::SwitchWeapon {
                weapon: WeaponId::ALL[input.gen_range(0..WeaponId::COUNT)],
            },
            3 => PlayerCommand::CollectPowerup {
                powerup_id: EntityId(input.gen_range(0..40)),
            },
            _ => PlayerCommand::Fire,
        };
        engine.queue_command(command).unwrap();
        match engine.phase() {
            GamePhase::GameOver => engine.queue_command(PlayerCommand::Restart).unwrap(),
            GamePhase::LevelComplete => engine.queue_command(PlayerCommand::Continue).unwrap(),
            _ => {}
        }

        let snapshot = engine.tick();

        assert!((0..=PLAYER_MAX_HEALTH).contains(&snapshot.player.health));
        for ammo in &snapshot.player.ammo {
            assert!(ammo.rounds <= ammo.max_rounds);
        }
        if snapshot.phase != GamePhase::Playing {
            assert!(snapshot.enemies.is_empty());
            assert!(snapshot.powerups.is_empty());
        }
        for enemy in &snapshot.enemies {
            assert!(enemy.health > 0);
            if let Some(previous) = enemy_health.insert(enemy.id, enemy.health) {
                assert!(enemy.health <= previous, "Enemy health must never increase");
            }
        }
        for bullet in &snapshot.bullets {
            assert!(!ballistics::is_expired(&bullet.position));
        }
    }
}
