//! Jumpy entry point
//!
//! Loads settings, routes logs to a file (the terminal belongs to the game)
//! and runs the game loop on the terminal backend.

use std::fs::File;
use std::time::Duration;

use anyhow::Context;

use jumpy::platform::FrameLimiter;
use jumpy::platform::terminal::{TerminalDisplay, TerminalGuard, TerminalInput};
use jumpy::{Game, Settings};

fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let file = File::create(&settings.log_file)
        .with_context(|| format!("creating log file {}", settings.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);
    init_logging(&settings)?;
    log::info!("Jumpy starting (settings: {})", settings_path.display());

    let guard = TerminalGuard::enter().context("initializing terminal")?;
    let display = TerminalDisplay::new().context("initializing display")?;
    let input = TerminalInput::new(&guard, Duration::from_millis(settings.key_hold_ms));

    let mut game = Game::new(display, input, FrameLimiter::new(), settings);
    let result = game.run();
    drop(guard);

    result.context("game loop failed")?;
    log::info!("Best score this run: {}", game.high_score());
    Ok(())
}
