use std::io::{self, BufRead};
use std::process::ExitCode;

use arena_app::error::AppError;
use arena_app::input::{self, InputAction};
use arena_app::presenter::{JsonLinesPresenter, LogPresenter, Presenter};
use arena_app::state::AppState;
use arena_core::config::SimConfig;

const USAGE: &str = "usage: arena [--json] [config.toml]";

fn run() -> Result<(), AppError> {
    let mut json = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => {
            log::info!("loading config from {path}");
            SimConfig::load_from_file(&path)?
        }
        None => SimConfig::default(),
    };

    let presenter: Box<dyn Presenter + Send> = if json {
        Box::new(JsonLinesPresenter::new(io::stdout()))
    } else {
        Box::new(LogPresenter::default())
    };

    let state = AppState::new();
    state.start(config, presenter)?;
    log::info!("type 'start' to begin, 'quit' to exit");

    for line in io::stdin().lock().lines() {
        let line = line?;
        match input::parse_line(&line) {
            Ok(Some(InputAction::Command(command))) => state.send_command(command)?,
            Ok(Some(InputAction::Status)) => {
                if let Some(snapshot) = state.snapshot()? {
                    println!("{}", LogPresenter::status_line(&snapshot));
                }
            }
            Ok(Some(InputAction::Quit)) => break,
            Ok(None) => {}
            Err(err) => log::warn!("{err}"),
        }
    }

    state.shutdown()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
