//! Pursuit steering: straight-line chase toward the player.
//!
//! Produces a candidate position only. Whether the move is committed
//! (obstacle checks) is decided by the simulation.

use arena_core::types::Vector3;

/// Input to the pursuit step for a single enemy.
pub struct PursuitContext {
    pub position: Vector3,
    pub target: Vector3,
    /// Distance covered per tick.
    pub step: f64,
}

/// Output from the pursuit step.
pub struct PursuitUpdate {
    /// Position the enemy would occupy after this tick.
    pub candidate: Vector3,
    /// False when the enemy has no direction to move in.
    pub wants_move: bool,
}

/// Advance one fixed step along the unit direction toward the target.
pub fn evaluate(ctx: &PursuitContext) -> PursuitUpdate {
    match (ctx.target - ctx.position).try_normalize() {
        Some(direction) => PursuitUpdate {
            candidate: ctx.position + direction * ctx.step,
            wants_move: true,
        },
        None => PursuitUpdate {
            candidate: ctx.position,
            wants_move: false,
        },
    }
}
