//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictac_engine::{Difficulty, Mark};
use tracing::{debug, info, instrument};

/// Longest simulated thinking time accepted from a config file.
const MAX_THINK_DELAY_MS: u64 = 10_000;

/// Settings for a session against the computer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How often the computer plays the optimal move.
    difficulty: Difficulty,

    /// The mark the computer plays.
    computer_mark: Mark,

    /// Pause before the computer moves, in milliseconds.
    think_delay_ms: u64,

    /// Seed for the computer's random choices; fresh entropy when unset.
    seed: Option<u64>,

    /// Two humans share the terminal; no computer player.
    two_player: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            computer_mark: Mark::O,
            think_delay_ms: 500,
            seed: None,
            two_player: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.think_delay_ms > MAX_THINK_DELAY_MS {
            return Err(ConfigError::new(format!(
                "think_delay_ms must be <= {}, got {}",
                MAX_THINK_DELAY_MS, self.think_delay_ms
            )));
        }
        Ok(())
    }

    /// Pause before the computer moves.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Replaces the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Replaces the computer's mark.
    pub fn with_computer_mark(mut self, mark: Mark) -> Self {
        self.computer_mark = mark;
        self
    }

    /// Replaces the thinking delay.
    pub fn with_think_delay_ms(mut self, think_delay_ms: u64) -> Self {
        self.think_delay_ms = think_delay_ms;
        self
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Switches between one- and two-player mode.
    pub fn with_two_player(mut self, two_player: bool) -> Self {
        self.two_player = two_player;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
