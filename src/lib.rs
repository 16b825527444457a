//! Jumpy - a vertically scrolling platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, platforms, scrolling, score)
//! - `game`: Session loop and start/game-over state machine
//! - `renderer`: Draws a session and menu screens onto a display
//! - `platform`: Display/input/clock abstraction plus the terminal backend
//! - `highscores`: Persisted best score
//! - `settings`: JSON configuration

pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{JumpyError, Result};
pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    pub const TITLE: &str = "Jumpy!";

    /// Logical viewport dimensions
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 600.0;

    /// Target tick rate of the host loop
    pub const FPS: u32 = 60;
    /// One simulation tick, measured in frames. Physics constants are tuned per frame.
    pub const SIM_DT: f32 = 1.0;

    /// Player properties
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_ACC: f32 = 0.5;
    pub const PLAYER_FRICTION: f32 = -0.12;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    pub const PLAYER_JUMP: f32 = 18.0;
    /// Horizontal speeds below this snap to zero
    pub const PLAYER_MIN_SPEED: f32 = 0.1;
    /// Spawn point (mid-bottom of the player rect)
    pub const PLAYER_START: (f32, f32) = (40.0, HEIGHT - 100.0);

    /// Draw layers
    pub const PLATFORM_LAYER: i32 = 1;
    pub const PLAYER_LAYER: i32 = 2;

    /// Platform population kept alive by the spawner
    pub const MIN_PLATFORMS: usize = 6;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Spawned width range (half-open)
    pub const SPAWN_WIDTH: (i32, i32) = (50, 100);
    /// Spawned y range (half-open), just above the visible top
    pub const SPAWN_Y: (i32, i32) = (-70, -30);

    /// Score per platform recycled off the bottom while climbing
    pub const SCROLL_SCORE: u64 = 10;
    /// Minimum per-tick world shift while the player falls out of view
    pub const DEATH_SCROLL_MIN: f32 = 10.0;

    /// Starting layout as (x, y, w, h)
    pub const START_PLATFORMS: [(f32, f32, f32, f32); 5] = [
        (0.0, HEIGHT - 40.0, WIDTH, 40.0),
        (WIDTH / 2.0 - 50.0, HEIGHT * 3.0 / 4.0, 100.0, 20.0),
        (125.0, HEIGHT - 350.0, 100.0, 20.0),
        (350.0, 200.0, 100.0, 20.0),
        (175.0, 100.0, 50.0, 20.0),
    ];
}
