//! TOML configuration.
//!
//! ```
//! use court_schedule::config::TournamentConfig;
//!
//! let config = TournamentConfig::from_toml_str(r#"
//!     [settings]
//!     match_time = 60
//!     break_time = 30
//!     courts = 2
//!
//!     [[settings.tournament_days]]
//!     date = "2024-05-04"
//!     start_hour = 9
//!     end_hour = 20
//!
//!     [solver]
//!     max_solutions = 3
//!     time_limit_secs = 10
//! "#).unwrap();
//!
//! assert_eq!(config.settings.courts, 2);
//! assert_eq!(config.solver.max_solutions, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Setting;

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Solutions to collect before stopping. Zero is treated as one.
    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,
    /// Wall-clock limit for one search.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    /// Seed for shuffling entrants before pairing.
    #[serde(default)]
    pub draw_seed: Option<u64>,
}

fn default_max_solutions() -> usize {
    1
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_solutions: default_max_solutions(),
            time_limit_secs: None,
            draw_seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Sets the solution cap.
    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = n;
        self
    }

    /// Sets the time limit in seconds.
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// Time limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}

/// Settings plus search options, as read from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TournamentConfig {
    /// Tournament-wide settings.
    pub settings: Setting,
    /// Search options.
    #[serde(default)]
    pub solver: SchedulerConfig,
}

impl TournamentConfig {
    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string and validates the settings.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.settings.validate()?;
        Ok(config)
    }
}
