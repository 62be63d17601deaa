//! Process configuration, loaded from an optional TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tiktaktoe_core::{
    COMPUTER_MOVE_DELAY, GAME_OVER_DELAY, HeuristicPolicy, PlayerKind, Players,
    SMART_MOVE_PROBABILITY, SessionTiming,
};
use tracing::{debug, info, instrument};

/// Default window for a pointer press/release pair to count as a tap.
pub const TAP_THRESHOLD: Duration = Duration::from_millis(200);

/// Application configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", strip_option)]
pub struct AppConfig {
    /// Controller of X.
    #[serde(default)]
    player_x: PlayerKind,

    /// Controller of O.
    #[serde(default = "default_player_o")]
    player_o: PlayerKind,

    /// Pause before the computer replies, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// How long the outcome popup stays up, in milliseconds.
    #[serde(default = "default_popup_ms")]
    popup_ms: u64,

    /// Longest press that still counts as a tap, in milliseconds.
    #[serde(default = "default_tap_threshold_ms")]
    tap_threshold_ms: u64,

    /// Chance the computer uses its heuristic instead of a random cell.
    #[serde(default = "default_smart_probability")]
    smart_probability: f64,

    /// Seed for the computer's random choices. Unseeded when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where the terminal UI writes its logs.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_player_o() -> PlayerKind {
    PlayerKind::Computer
}

fn default_computer_delay_ms() -> u64 {
    COMPUTER_MOVE_DELAY.as_millis() as u64
}

fn default_popup_ms() -> u64 {
    GAME_OVER_DELAY.as_millis() as u64
}

fn default_tap_threshold_ms() -> u64 {
    TAP_THRESHOLD.as_millis() as u64
}

fn default_smart_probability() -> f64 {
    SMART_MOVE_PROBABILITY
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tiktaktoe.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_x: PlayerKind::Human,
            player_o: default_player_o(),
            computer_delay_ms: default_computer_delay_ms(),
            popup_ms: default_popup_ms(),
            tap_threshold_ms: default_tap_threshold_ms(),
            smart_probability: default_smart_probability(),
            seed: None,
            log_file: default_log_file(),
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
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(x = %config.player_x, o = %config.player_o, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.smart_probability) {
            return Err(ConfigError::new(format!(
                "smart_probability must be between 0 and 1, got {}",
                self.smart_probability
            )));
        }
        if self.tap_threshold_ms == 0 {
            return Err(ConfigError::new("tap_threshold_ms must be positive"));
        }
        Ok(())
    }

    /// Controller assignment for a new session.
    pub fn players(&self) -> Players {
        Players::new(self.player_x, self.player_o)
    }

    /// Task delays for a new session.
    pub fn timing(&self) -> SessionTiming {
        SessionTiming {
            computer_delay: Duration::from_millis(self.computer_delay_ms),
            game_over_delay: Duration::from_millis(self.popup_ms),
        }
    }

    /// Tap window as a duration.
    pub fn tap_threshold(&self) -> Duration {
        Duration::from_millis(self.tap_threshold_ms)
    }

    /// Builds the computer's move policy, seeded if a seed is configured.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn policy(&self) -> HeuristicPolicy {
        let policy = match self.seed {
            Some(seed) => HeuristicPolicy::seeded(seed),
            None => HeuristicPolicy::new(),
        };
        policy.with_smart_probability(self.smart_probability)
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
