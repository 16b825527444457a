//! Game settings and preferences
//!
//! Persisted as JSON next to the game. Unknown or missing fields fall back to
//! their defaults so older files keep loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::Result;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "JUMPY_SETTINGS";
/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "jumpy.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame limiter target
    pub fps: u32,
    /// Where the high score lives
    pub highscore_file: PathBuf,
    /// Fixed run seed (random per run when unset)
    pub seed: Option<u64>,
    /// How long a key counts as held after its last press/repeat when the
    /// terminal cannot report releases
    pub key_hold_ms: u64,
    /// Log output (the terminal itself is taken by the game)
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            highscore_file: PathBuf::from("highscore.txt"),
            seed: None,
            key_hold_ms: 150,
            log_file: PathBuf::from("jumpy.log"),
        }
    }
}

impl Settings {
    /// Settings file location: `$JUMPY_SETTINGS` or `jumpy.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values the loop cannot run with
    fn sanitized(mut self) -> Self {
        if self.fps == 0 {
            log::warn!("fps must be positive, using {}", FPS);
            self.fps = FPS;
        }
        self
    }
}
