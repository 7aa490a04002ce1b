//! Powerup lifecycle: timed despawn and collection.
//!
//! The despawn timer is a TTL compared against the simulation clock once
//! per tick; there are no scheduled callbacks to cancel.

use arena_core::components::{EntityId, Powerup};
use arena_core::constants::*;
use arena_core::enums::PowerupKind;
use arena_core::events::{GameEvent, SoundCue};

use crate::player::Player;
use crate::registry::Registry;

/// Seconds before `powerup` despawns, as of `current_tick`.
pub fn ttl_remaining_secs(powerup: &Powerup, current_tick: u64) -> f64 {
    let age = current_tick.saturating_sub(powerup.spawned_tick);
    POWERUP_TTL_TICKS.saturating_sub(age) as f64 * DT
}

pub fn is_expired(powerup: &Powerup, current_tick: u64) -> bool {
    current_tick.saturating_sub(powerup.spawned_tick) >= POWERUP_TTL_TICKS
}

/// Remove every powerup whose TTL has run out. Returns the number removed.
pub fn expire(registry: &mut Registry, current_tick: u64, events: &mut Vec<GameEvent>) -> usize {
    for entry in registry.powerups() {
        if is_expired(&entry.powerup, current_tick) {
            log::debug!("powerup {} expired", entry.id.0);
            events.push(GameEvent::PowerupExpired { powerup_id: entry.id });
            registry.mark_for_removal(entry.entity);
        }
    }
    registry.compact()
}

/// Collect a powerup: apply its effect to the player and remove it.
///
/// Health heals by `POWERUP_HEAL_AMOUNT`; Ammo adds `POWERUP_AMMO_AMOUNT` to
/// the equipped weapon. Returns `None` (and changes nothing) if the powerup
/// is no longer live.
pub fn collect(
    registry: &mut Registry,
    player: &mut Player,
    powerup_id: EntityId,
    events: &mut Vec<GameEvent>,
    sound_cues: &mut Vec<SoundCue>,
) -> Option<PowerupKind> {
    let entry = registry
        .powerups()
        .into_iter()
        .find(|entry| entry.id == powerup_id)?;

    let kind = entry.powerup.kind;
    match kind {
        PowerupKind::Health => {
            player.heal(POWERUP_HEAL_AMOUNT);
        }
        PowerupKind::Ammo => {
            let weapon = player.arsenal.current();
            player.arsenal.add_ammo(weapon, POWERUP_AMMO_AMOUNT);
        }
    }

    registry.mark_for_removal(entry.entity);
    registry.compact();
    events.push(GameEvent::PowerupCollected { powerup_id, kind });
    sound_cues.push(SoundCue::Powerup);
    Some(kind)
}
