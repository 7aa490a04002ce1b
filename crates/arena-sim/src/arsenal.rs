//! Weapon/ammo state: per-weapon ammo pools and fire-rate gating.
//!
//! Owned by the player, NOT stored as ECS components. Indexed by
//! `WeaponId::index`, initialised from the static catalog.

use arena_core::weapons::WeaponId;

use crate::invariants::enforce_range;

/// Ammo and fire timing for one weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AmmoSlot {
    rounds: u32,
    /// Simulation time of the last successful shot (ms).
    last_fire_millis: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arsenal {
    slots: [AmmoSlot; WeaponId::COUNT],
    current: WeaponId,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::full()
    }
}

impl Arsenal {
    /// Every weapon at max ammo, Pistol equipped.
    pub fn full() -> Self {
        let mut arsenal = Self::empty();
        for weapon in WeaponId::ALL {
            arsenal.slots[weapon.index()].rounds = weapon.weapon().max_ammo;
        }
        arsenal
    }

    /// Every weapon at zero ammo, Pistol equipped.
    pub fn empty() -> Self {
        Self {
            slots: [AmmoSlot::default(); WeaponId::COUNT],
            current: WeaponId::default(),
        }
    }

    /// The equipped weapon.
    pub fn current(&self) -> WeaponId {
        self.current
    }

    pub fn ammo(&self, weapon: WeaponId) -> u32 {
        self.slots[weapon.index()].rounds
    }

    /// Attempt a shot. Returns true and spends one round iff the weapon's
    /// fire interval has elapsed since its last shot and it has ammo.
    /// On false nothing changes.
    pub fn fire(&mut self, weapon: WeaponId, now_millis: u64) -> bool {
        let slot = &mut self.slots[weapon.index()];

        if let Some(last) = slot.last_fire_millis {
            let elapsed = now_millis.saturating_sub(last) as f64;
            if elapsed < weapon.fire_interval_millis() {
                return false;
            }
        }
        if slot.rounds == 0 {
            return false;
        }

        slot.rounds -= 1;
        slot.last_fire_millis = Some(now_millis);
        true
    }

    /// Add rounds, clamped to the weapon's max. Returns the rounds actually added.
    pub fn add_ammo(&mut self, weapon: WeaponId, amount: u32) -> u32 {
        let max = weapon.weapon().max_ammo;
        let slot = &mut self.slots[weapon.index()];
        let before = slot.rounds;
        let after = before.saturating_add(amount).min(max);
        slot.rounds = enforce_range("ammo", after, 0, max);
        slot.rounds - before
    }

    /// Equip a weapon. Ammo and fire timing are untouched.
    pub fn switch_weapon(&mut self, weapon: WeaponId) {
        self.current = weapon;
    }
}
