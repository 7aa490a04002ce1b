//! Headless arena driver.
//!
//! Runs the simulation on its own thread, maps stdin lines to player
//! commands, and presents snapshots through logging or JSON lines.

pub mod error;
pub mod game_loop;
pub mod input;
pub mod presenter;
pub mod state;

pub use arena_core as core;
