//! Static weapon catalog.
//!
//! Weapons are immutable definitions. Per-weapon ammo and fire timing
//! belong to the player's arsenal, never to the catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Identifies a weapon in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponId {
    #[default]
    Pistol,
    Shotgun,
}

/// A weapon definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub id: WeaponId,
    pub display_name: &'static str,
    /// Health removed from an enemy per bullet.
    pub damage: i32,
    pub max_ammo: u32,
    /// Shots per second.
    pub fire_rate: f64,
}

/// Every weapon, indexed by `WeaponId::index`.
pub const CATALOG: [Weapon; 2] = [
    Weapon {
        id: WeaponId::Pistol,
        display_name: "Pistol",
        damage: 10,
        max_ammo: 50,
        fire_rate: 2.0,
    },
    Weapon {
        id: WeaponId::Shotgun,
        display_name: "Shotgun",
        damage: 25,
        max_ammo: 20,
        fire_rate: 1.0,
    },
];

impl WeaponId {
    pub const ALL: [WeaponId; 2] = [WeaponId::Pistol, WeaponId::Shotgun];
    pub const COUNT: usize = Self::ALL.len();

    /// Position in `CATALOG` and in per-weapon arrays.
    pub fn index(self) -> usize {
        match self {
            WeaponId::Pistol => 0,
            WeaponId::Shotgun => 1,
        }
    }

    /// The catalog entry for this weapon.
    pub fn weapon(self) -> &'static Weapon {
        &CATALOG[self.index()]
    }

    /// Minimum interval between two shots, in milliseconds.
    pub fn fire_interval_millis(self) -> f64 {
        1000.0 / self.weapon().fire_rate
    }

    /// Weapon bound to a number key (1-based).
    pub fn from_slot(slot: u8) -> Result<WeaponId, ArenaError> {
        match slot {
            1 => Ok(WeaponId::Pistol),
            2 => Ok(WeaponId::Shotgun),
            _ => Err(ArenaError::InvalidWeapon(slot.to_string())),
        }
    }
}

impl FromStr for WeaponId {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponId::ALL
            .into_iter()
            .find(|w| w.weapon().display_name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ArenaError::InvalidWeapon(s.to_string()))
    }
}

impl std::fmt::Display for WeaponId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.weapon().display_name)
    }
}
