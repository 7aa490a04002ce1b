//! Simulation engine for the arena.
//!
//! Owns the entity registry (a hecs world plus static obstacles) and the
//! player, runs systems once per tick, and produces GameStateSnapshots for
//! presentation.

pub mod arsenal;
pub mod collision;
pub mod engine;
pub mod invariants;
pub mod level;
pub mod player;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
