//! Error types for tournament scheduling.

use thiserror::Error;

use crate::models::MatchId;
use crate::validation::ValidationError;

/// Main error type for scheduling operations.
///
/// Construction-time failures (bad dates, hours, team sizes) are fatal and
/// never retried. A search that finds nothing is not an error: the solver
/// returns an empty list instead.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A team was built with zero or more than two participants.
    #[error("team in category '{category}' must have 1 or 2 participants, got {size}")]
    InvalidTeamSize { category: String, size: usize },

    /// A tournament day date could not be parsed.
    #[error("invalid tournament date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// An hour outside `[0, 23]`.
    #[error("{field} must be within 0..=23, got {hour}")]
    InvalidHour { field: &'static str, hour: u32 },

    /// Tournament-wide settings are unusable.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A constraint references a variable that was never registered.
    #[error("constraint '{constraint}' references unregistered variable {variable}")]
    UnknownVariable {
        constraint: &'static str,
        variable: String,
    },

    /// A match id that does not exist in the tournament arena.
    #[error("unknown match {0}")]
    UnknownMatch(MatchId),

    /// The built tournament failed structural validation.
    #[error("tournament validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Configuration file could not be parsed.
    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
