//! Simulation constants and tuning parameters.

use crate::types::Vector3;

/// Simulation tick rate (Hz). Per-tick speeds below are tuned for it.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Half the floor's edge length; the floor spans [-50, 50] on x and z.
pub const ARENA_HALF_EXTENT: f64 = 50.0;

/// Enemies and powerups spawn within [-SPAWN_EXTENT, SPAWN_EXTENT] on x and z.
pub const SPAWN_EXTENT: f64 = 20.0;

/// Attempts made to find an obstacle-free spawn point before accepting an overlap.
pub const MAX_SPAWN_ATTEMPTS: u32 = 16;

/// Obstacle layout: (center, size). Boxes are 2 wide, 4 tall, 2 deep.
pub const OBSTACLE_LAYOUT: [(Vector3, Vector3); 3] = [
    (Vector3::new(5.0, 1.0, 0.0), Vector3::new(2.0, 4.0, 2.0)),
    (Vector3::new(-5.0, 1.0, -5.0), Vector3::new(2.0, 4.0, 2.0)),
    (Vector3::new(0.0, 1.0, -10.0), Vector3::new(2.0, 4.0, 2.0)),
];

// --- Player ---

pub const PLAYER_START: Vector3 = Vector3::new(0.0, 0.0, 10.0);

/// Initial facing: looking down -z, toward the obstacles.
pub const PLAYER_START_FACING: Vector3 = Vector3::new(0.0, 0.0, -1.0);

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Distance covered by one movement command.
pub const PLAYER_MOVE_STEP: f64 = 0.5;

// --- Enemies ---

pub const ENEMY_START_HEALTH: i32 = 100;

/// Pursuit speed (units per tick).
pub const ENEMY_STEP: f64 = 0.03;

/// Enemies may not move within this distance of an obstacle's center.
pub const ENEMY_OBSTACLE_RADIUS: f64 = 2.0;

/// Per-tick chance that an enemy lands a ranged hit on the player.
pub const ENEMY_ATTACK_CHANCE: f64 = 0.005;

/// Health removed from the player per enemy hit.
pub const ENEMY_ATTACK_DAMAGE: i32 = 5;

/// Reach of a melee attack when the melee attack model is configured.
pub const ENEMY_MELEE_RANGE: f64 = 1.5;

/// Minimum time between two melee hits from the same enemy.
pub const ENEMY_MELEE_COOLDOWN_SECS: f64 = 1.0;

// --- Bullets ---

/// Bullet speed (units per tick).
pub const BULLET_SPEED: f64 = 0.5;

/// A bullet hits an enemy closer than this.
pub const BULLET_HIT_RADIUS: f64 = 1.0;

/// Bullets further than this from the world origin are removed.
pub const BULLET_MAX_DISTANCE: f64 = 50.0;

// --- Powerups ---

/// Uncollected powerups despawn after this long.
pub const POWERUP_TTL_SECS: f64 = 30.0;

/// POWERUP_TTL_SECS expressed in ticks.
pub const POWERUP_TTL_TICKS: u64 = (POWERUP_TTL_SECS as u64) * TICK_RATE as u64;

/// Health restored by a health powerup (clamped to PLAYER_MAX_HEALTH).
pub const POWERUP_HEAL_AMOUNT: i32 = 50;

/// Rounds granted to the equipped weapon by an ammo powerup.
pub const POWERUP_AMMO_AMOUNT: u32 = 20;

// --- Levels ---

pub const FIRST_LEVEL: u32 = 1;

/// Enemies spawned when entering a level.
pub fn enemies_for_level(level: u32) -> usize {
    (2 * level as usize).max(1)
}

/// Powerups spawned when entering a level.
pub fn powerups_for_level(level: u32) -> usize {
    (level as usize).max(1)
}
