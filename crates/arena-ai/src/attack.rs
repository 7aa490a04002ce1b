//! Enemy attack decisions.
//!
//! `Probabilistic` rolls once per enemy per tick regardless of distance.
//! `Melee` requires the player strictly within reach and the enemy's
//! cooldown spent; it never touches the RNG.

use rand::Rng;

use arena_core::constants::TICK_RATE;
use arena_core::enums::AttackModel;

/// Input to the attack decision for a single enemy.
pub struct AttackContext {
    pub model: AttackModel,
    pub distance_to_player: f64,
    pub current_tick: u64,
    /// Tick of this enemy's previous successful attack.
    pub last_attack_tick: Option<u64>,
}

/// Decide whether this enemy damages the player this tick.
pub fn evaluate<R: Rng + ?Sized>(ctx: &AttackContext, rng: &mut R) -> bool {
    match ctx.model {
        // NaN would make `gen_bool` panic; it never hits.
        AttackModel::Probabilistic { chance, .. } if chance.is_nan() => false,
        AttackModel::Probabilistic { chance, .. } => rng.gen_bool(chance.clamp(0.0, 1.0)),
        AttackModel::Melee {
            range,
            cooldown_secs,
            ..
        } => ctx.distance_to_player < range && cooldown_elapsed(ctx, cooldown_secs),
    }
}

fn cooldown_elapsed(ctx: &AttackContext, cooldown_secs: f64) -> bool {
    let cooldown_ticks = (cooldown_secs.max(0.0) * TICK_RATE as f64).ceil() as u64;
    match ctx.last_attack_tick {
        Some(last) => ctx.current_tick.saturating_sub(last) >= cooldown_ticks,
        None => true,
    }
}
