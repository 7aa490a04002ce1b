//! Game loop thread. Runs the simulation engine at `TICK_RATE` and hands
//! every snapshot to a presenter.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel; the latest snapshot is also stored in
//! shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use arena_core::config::SimConfig;
use arena_core::constants::TICK_RATE;
use arena_core::state::GameStateSnapshot;
use arena_sim::SimulationEngine;

use crate::presenter::Presenter;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input layer and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    presenter: Box<dyn Presenter + Send>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || {
            run_game_loop(config, presenter, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Drain pending commands into the engine. Returns false once the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                if let Err(err) = engine.queue_command(cmd) {
                    log::warn!("rejected command: {err}");
                }
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut presenter: Box<dyn Presenter + Send>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    log::info!("game loop started (seed {})", config.seed);
    let mut engine = SimulationEngine::new(config);
    presenter.obstacles(engine.obstacles());
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Present
        presenter.present(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
    log::info!("game loop stopped at tick {}", engine.time().tick);
}
