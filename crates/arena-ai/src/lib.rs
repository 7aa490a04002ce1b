//! Enemy AI for the arena.
//!
//! Pure decision functions for enemy pursuit and attacks.
//! No ECS dependency: operates on plain data; the simulation applies
//! the results to its world.

pub mod attack;
pub mod pursuit;

pub use arena_core as core;
