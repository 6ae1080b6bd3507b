//! Tunables for rounds and the store.
//!
//! Both configs deserialize from JSON with every field optional; missing
//! fields take the defaults below. `GameConfig::validate` reports every
//! violation at once using Stillwater's `Validation`.

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Length of a round, and the cap on time remaining after a win (ms).
pub const GAME_DURATION: i64 = 20_000;

/// Time added to the clock for each win before capping (ms).
pub const TIME_BONUS: i64 = 5_000;

pub const POINTS_PER_WIN: u32 = 1;

/// Dispatched actions kept by the store's log.
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// A single rejected setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("game duration must be positive (got {value} ms)")]
    NonPositiveDuration { value: i64 },

    #[error("time bonus must not be negative (got {value} ms)")]
    NegativeBonus { value: i64 },

    #[error("points per win must be at least 1")]
    ZeroPoints,
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration rejected: {} violation(s)", .0.len())]
    Invalid(Vec<ConfigViolation>),
}

/// Round timing and scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_duration_ms: i64,
    pub time_bonus_ms: i64,
    pub points_per_win: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_duration_ms: GAME_DURATION,
            time_bonus_ms: TIME_BONUS,
            points_per_win: POINTS_PER_WIN,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourletters::config::GameConfig;
    ///
    /// let config = GameConfig::from_json(r#"{ "time_bonus_ms": 3000 }"#).unwrap();
    /// assert_eq!(config.time_bonus_ms, 3000);
    /// assert_eq!(config.game_duration_ms, 20_000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = vec![
            if self.game_duration_ms > 0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::NonPositiveDuration {
                    value: self.game_duration_ms,
                })
            },
            if self.time_bonus_ms >= 0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::NegativeBonus {
                    value: self.time_bonus_ms,
                })
            },
            if self.points_per_win > 0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::ZeroPoints)
            },
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

/// Store settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Dispatched actions retained for inspection; 0 disables the log.
    pub log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}
