//! Player state. Owned exclusively by the simulation engine.

use arena_core::constants::{PLAYER_MAX_HEALTH, PLAYER_START, PLAYER_START_FACING};
use arena_core::types::Vector3;

use crate::arsenal::Arsenal;
use crate::invariants::enforce_range;

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vector3,
    /// Unit vector bullets travel along.
    pub facing: Vector3,
    health: i32,
    pub arsenal: Arsenal,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: PLAYER_START,
            facing: PLAYER_START_FACING,
            health: PLAYER_MAX_HEALTH,
            arsenal: Arsenal::full(),
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Remove health, never below 0. Returns the remaining health.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let after = self.health.saturating_sub(amount.max(0)).max(0);
        self.health = enforce_range("player health", after, 0, PLAYER_MAX_HEALTH);
        self.health
    }

    /// Restore health, never above the max. Returns the new health.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let after = self
            .health
            .saturating_add(amount.max(0))
            .min(PLAYER_MAX_HEALTH);
        self.health = enforce_range("player health", after, 0, PLAYER_MAX_HEALTH);
        self.health
    }

    /// Back to the spawn point, facing forward. Health and ammo carry over.
    pub fn respawn(&mut self) {
        self.position = PLAYER_START;
        self.facing = PLAYER_START_FACING;
    }

    /// Full reset: position, facing, health, and ammo.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, PLAYER_MAX_HEALTH);
    }
}
