//! Player movement on the floor plane.

use arena_core::constants::PLAYER_MOVE_STEP;
use arena_core::types::{Obstacle, Vector3};

use crate::collision::{self, ObstacleTest};
use crate::player::Player;

/// Move the player one step along (dx, dz), each clamped to [-1, 1].
///
/// The move is all-or-nothing: if the destination leaves the arena or
/// intrudes into any obstacle, the player stays put and this returns false.
pub fn try_move(player: &mut Player, dx: f64, dz: f64, obstacles: &[Obstacle]) -> bool {
    let step = Vector3::new(dx.clamp(-1.0, 1.0), 0.0, dz.clamp(-1.0, 1.0));
    if step == Vector3::ZERO {
        return false;
    }

    let candidate = player.position + step * PLAYER_MOVE_STEP;
    if !collision::in_arena(&candidate)
        || !collision::is_clear(&candidate, obstacles, ObstacleTest::Box)
    {
        log::debug!("player move to {candidate:?} blocked");
        return false;
    }

    player.position = candidate;
    true
}
