//! Application state shared between the input loop and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use arena_core::commands::PlayerCommand;
use arena_core::config::SimConfig;
use arena_core::state::GameStateSnapshot;

use crate::error::AppError;
use crate::game_loop;
use crate::presenter::Presenter;

/// Commands sent from the input layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// The sender sits behind a `Mutex` so the state stays `Sync`; the latest
/// snapshot is shared with the game loop thread, which overwrites it after
/// every tick.
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Start the simulation thread. Fails if it is already running.
    pub fn start(
        &self,
        config: SimConfig,
        presenter: Box<dyn Presenter + Send>,
    ) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, presenter, self.latest_snapshot.clone())?;

        *tx_lock = Some(cmd_tx);
        *self.loop_handle.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| AppError::LoopStopped),
            None => Err(AppError::NotStarted),
        }
    }

    /// The most recent snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the loop thread and wait for it to finish. A no-op when not running.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take();
        if let Some(tx) = tx {
            // The loop may already be gone; joining below still reaps it.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }

        let handle = self.loop_handle.lock().map_err(|_| AppError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| AppError::LoopPanicked)?;
        }
        Ok(())
    }
}
