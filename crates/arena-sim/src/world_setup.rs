//! Level generation: the static obstacle layout and random placement of
//! enemies and powerups.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::Powerup;
use arena_core::constants::*;
use arena_core::enums::PowerupKind;
use arena_core::types::{Obstacle, Vector3};

use crate::collision::{self, ObstacleTest};
use crate::level::LevelPlan;
use crate::registry::Registry;

/// The fixed obstacle layout shared by every level.
pub fn arena_obstacles() -> Vec<Obstacle> {
    OBSTACLE_LAYOUT
        .iter()
        .map(|&(position, size)| Obstacle::new(position, size))
        .collect()
}

/// Spawn a level's enemies, then its powerups.
pub fn populate_level(
    registry: &mut Registry,
    rng: &mut ChaCha8Rng,
    plan: &LevelPlan,
    current_tick: u64,
    reject_obstacle_spawns: bool,
) {
    for _ in 0..plan.enemy_count {
        let position = spawn_point(rng, registry.obstacles(), reject_obstacle_spawns);
        registry.spawn_enemy(position);
    }

    for _ in 0..plan.powerup_count {
        let position = spawn_point(rng, registry.obstacles(), reject_obstacle_spawns);
        let kind = if rng.gen_bool(0.5) {
            PowerupKind::Health
        } else {
            PowerupKind::Ammo
        };
        registry.spawn_powerup(
            position,
            Powerup {
                kind,
                spawned_tick: current_tick,
            },
        );
    }
}

/// Random floor position within the spawn area.
///
/// With `reject_obstacle_spawns`, points an enemy could not stand on are
/// resampled up to `MAX_SPAWN_ATTEMPTS` times; the last sample is used
/// regardless.
pub fn spawn_point(rng: &mut ChaCha8Rng, obstacles: &[Obstacle], reject_obstacle_spawns: bool) -> Vector3 {
    let mut point = random_floor_point(rng);
    if !reject_obstacle_spawns {
        return point;
    }

    let mut attempts = 1;
    while attempts < MAX_SPAWN_ATTEMPTS
        && !collision::is_clear(&point, obstacles, ObstacleTest::Proximity(ENEMY_OBSTACLE_RADIUS))
    {
        point = random_floor_point(rng);
        attempts += 1;
    }
    point
}

fn random_floor_point(rng: &mut ChaCha8Rng) -> Vector3 {
    let x: f64 = rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT);
    let z: f64 = rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT);
    Vector3::new(x, 0.0, z)
}
