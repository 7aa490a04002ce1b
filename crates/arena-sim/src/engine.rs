//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity registry and the player, processes
//! player commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::commands::PlayerCommand;
use arena_core::components::Bullet;
use arena_core::config::SimConfig;
use arena_core::constants::FIRST_LEVEL;
use arena_core::enums::GamePhase;
use arena_core::error::ArenaError;
use arena_core::events::{GameEvent, SoundCue};
use arena_core::state::{GameStateSnapshot, ScoreView};
use arena_core::types::{Obstacle, SimTime};

use crate::level::{self, FlowTrigger, LevelPlan};
use crate::player::Player;
use crate::registry::Registry;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the registry, the player, and all sim state.
pub struct SimulationEngine {
    registry: Registry,
    player: Player,
    time: SimTime,
    phase: GamePhase,
    level: u32,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    sound_cues: Vec<SoundCue>,
    events: Vec<GameEvent>,
    score: ScoreView,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. Starts at the menu.
    pub fn new(config: SimConfig) -> Self {
        Self {
            registry: Registry::new(world_setup::arena_obstacles()),
            player: Player::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            level: FIRST_LEVEL,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            command_queue: VecDeque::new(),
            sound_cues: Vec::new(),
            events: Vec::new(),
            score: ScoreView::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    /// Structurally invalid commands are rejected here and never queued.
    pub fn queue_command(&mut self, command: PlayerCommand) -> Result<(), ArenaError> {
        command.validate()?;
        self.command_queue.push_back(command);
        Ok(())
    }

    /// Queue multiple commands, stopping at the first malformed one.
    pub fn queue_commands(
        &mut self,
        commands: impl IntoIterator<Item = PlayerCommand>,
    ) -> Result<(), ArenaError> {
        for command in commands {
            self.queue_command(command)?;
        }
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Order: queued commands, enemy AI, ballistics, powerup expiry, level
    /// completion. Outside `Playing` only commands are processed and time
    /// stands still.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        let sound_cues = std::mem::take(&mut self.sound_cues);
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.player,
            &self.time,
            self.phase,
            self.level,
            sound_cues,
            events,
            &self.score,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current level number.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Get a read-only reference to the entity registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Static obstacles; fetched once by presentation.
    pub fn obstacles(&self) -> &[Obstacle] {
        self.registry.obstacles()
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Process all queued commands. Commands the current phase does not
    /// accept are dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                log::debug!("ignored command: {err}");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), ArenaError> {
        match command {
            PlayerCommand::Start => self.transition(FlowTrigger::Start),
            PlayerCommand::Restart => self.transition(FlowTrigger::Restart),
            PlayerCommand::Continue => self.transition(FlowTrigger::Continue),
            PlayerCommand::ReturnToMenu => self.transition(FlowTrigger::ReturnToMenu),
            PlayerCommand::MoveDirection { dx, dz } => {
                self.require_playing("MoveDirection")?;
                systems::player_movement::try_move(
                    &mut self.player,
                    dx,
                    dz,
                    self.registry.obstacles(),
                );
                Ok(())
            }
            PlayerCommand::Aim { direction } => {
                self.require_playing("Aim")?;
                if let Some(facing) = direction.try_normalize() {
                    self.player.facing = facing;
                }
                Ok(())
            }
            PlayerCommand::SwitchWeapon { weapon } => {
                self.require_playing("SwitchWeapon")?;
                self.player.arsenal.switch_weapon(weapon);
                Ok(())
            }
            PlayerCommand::Fire => {
                self.require_playing("Fire")?;
                self.fire();
                Ok(())
            }
            PlayerCommand::CollectPowerup { powerup_id } => {
                self.require_playing("CollectPowerup")?;
                let collected = systems::powerups::collect(
                    &mut self.registry,
                    &mut self.player,
                    powerup_id,
                    &mut self.events,
                    &mut self.sound_cues,
                );
                match collected {
                    Some(_) => self.score.powerups_collected += 1,
                    None => log::debug!("powerup {} is gone", powerup_id.0),
                }
                Ok(())
            }
        }
    }

    fn require_playing(&self, command: &'static str) -> Result<(), ArenaError> {
        if self.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(ArenaError::InvalidCommand {
                command,
                phase: self.phase,
            })
        }
    }

    /// Fire the equipped weapon along the player's facing.
    fn fire(&mut self) {
        let weapon = self.player.arsenal.current();
        if self.player.arsenal.fire(weapon, self.time.now_millis()) {
            self.registry.spawn_bullet(
                self.player.position,
                Bullet {
                    direction: self.player.facing,
                    weapon,
                    damage: weapon.weapon().damage,
                },
            );
            self.score.shots_fired += 1;
            self.sound_cues.push(SoundCue::Shoot);
        } else if self.player.arsenal.ammo(weapon) == 0 {
            self.sound_cues.push(SoundCue::Empty);
        }
    }

    /// Apply a state-machine trigger and its side effects.
    fn transition(&mut self, trigger: FlowTrigger) -> Result<(), ArenaError> {
        let from = self.phase;
        let to = level::next_phase(from, trigger).ok_or(ArenaError::InvalidCommand {
            command: trigger.name(),
            phase: from,
        })?;

        match trigger {
            FlowTrigger::Start => {
                self.level = FIRST_LEVEL;
                self.player.reset();
                self.score = ScoreView::default();
            }
            FlowTrigger::Restart => self.player.reset(),
            FlowTrigger::Continue => {
                self.level += 1;
                self.player.respawn();
            }
            FlowTrigger::PlayerDied => self.sound_cues.push(SoundCue::GameOver),
            FlowTrigger::EnemiesCleared | FlowTrigger::ReturnToMenu => {}
        }

        // Enemies, bullets, and powerups exist only while Playing.
        self.registry.clear();
        self.phase = to;
        log::info!("{from} -> {to} (level {})", self.level);
        self.events.push(GameEvent::PhaseChanged {
            from,
            to,
            level: self.level,
        });

        if to == GamePhase::Playing {
            self.populate_level();
        }
        Ok(())
    }

    fn populate_level(&mut self) {
        let plan = LevelPlan::for_level(self.level);
        world_setup::populate_level(
            &mut self.registry,
            &mut self.rng,
            &plan,
            self.time.tick,
            self.config.reject_obstacle_spawns,
        );
        log::info!(
            "level {} started: {} enemies, {} powerups",
            plan.level,
            plan.enemy_count,
            plan.powerup_count
        );
        self.events.push(GameEvent::LevelStarted {
            level: plan.level,
            enemies: plan.enemy_count as u32,
            powerups: plan.powerup_count as u32,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Enemy AI (pursuit, attacks)
        systems::enemy_ai::run(
            &mut self.registry,
            &mut self.player,
            &mut self.rng,
            self.config.attack,
            self.time.tick,
            &mut self.events,
        );
        // A dead player ends the tick here.
        if self.player.is_dead() {
            self.internal_transition(FlowTrigger::PlayerDied);
            return;
        }
        // 2. Ballistics (advance, hit, expire)
        let outcome =
            systems::ballistics::run(&mut self.registry, &mut self.events, &mut self.sound_cues);
        self.score.enemies_killed += outcome.kills;
        // 3. Powerup despawn
        systems::powerups::expire(&mut self.registry, self.time.tick, &mut self.events);
        // 4. Level completion
        if self.registry.enemy_count() == 0 {
            self.internal_transition(FlowTrigger::EnemiesCleared);
        }
    }

    fn internal_transition(&mut self, trigger: FlowTrigger) {
        if let Err(err) = self.transition(trigger) {
            log::error!("{err}");
        }
    }
}
