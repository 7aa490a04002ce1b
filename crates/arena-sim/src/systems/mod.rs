//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over the registry and player. They do not
//! own state: all state lives in components or the engine.

pub mod ballistics;
pub mod enemy_ai;
pub mod player_movement;
pub mod powerups;
pub mod snapshot;
