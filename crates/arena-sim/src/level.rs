//! Level/game state machine.
//!
//! `Menu -> Playing -> {LevelComplete, GameOver} -> Playing`, plus a way
//! back to the menu. `next_phase` is the whole transition table; the
//! engine performs the side effects (player reset, level population).

use arena_core::constants::{enemies_for_level, powerups_for_level};
use arena_core::enums::GamePhase;

/// Something that may move the game to another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTrigger {
    /// Explicit start command from the menu.
    Start,
    /// Explicit restart after a game over (same level).
    Restart,
    /// Explicit continue after completing a level (next level).
    Continue,
    /// Explicit return to the menu.
    ReturnToMenu,
    /// Player health reached 0.
    PlayerDied,
    /// Enemy collection became empty.
    EnemiesCleared,
}

impl FlowTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            FlowTrigger::Start => "Start",
            FlowTrigger::Restart => "Restart",
            FlowTrigger::Continue => "Continue",
            FlowTrigger::ReturnToMenu => "ReturnToMenu",
            FlowTrigger::PlayerDied => "PlayerDied",
            FlowTrigger::EnemiesCleared => "EnemiesCleared",
        }
    }
}

/// Phase reached from `phase` on `trigger`, or `None` if the trigger is not
/// accepted there.
pub fn next_phase(phase: GamePhase, trigger: FlowTrigger) -> Option<GamePhase> {
    use FlowTrigger::*;
    use GamePhase::*;

    match (phase, trigger) {
        (Menu, Start) => Some(Playing),
        (Playing, PlayerDied) => Some(GameOver),
        (Playing, EnemiesCleared) => Some(LevelComplete),
        (GameOver, Restart) => Some(Playing),
        (LevelComplete, Continue) => Some(Playing),
        (GameOver | LevelComplete, ReturnToMenu) => Some(Menu),
        _ => None,
    }
}

/// Population of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPlan {
    pub level: u32,
    pub enemy_count: usize,
    pub powerup_count: usize,
}

impl LevelPlan {
    pub fn for_level(level: u32) -> Self {
        Self {
            level,
            enemy_count: enemies_for_level(level),
            powerup_count: powerups_for_level(level),
        }
    }
}
