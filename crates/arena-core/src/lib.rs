//! Core types and definitions for the arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector math, components, commands, state snapshots, events, the weapon
//! catalog, configuration, and constants. It has no dependency on any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod weapons;
