//! Tournament court scheduling.
//!
//! Assigns every playable match of a multi-category, single-elimination
//! tournament to a (court, start time) slot so that no court is double
//! booked, later rounds follow earlier ones with enough rest, and players
//! entered in several categories get enough rest between their matches.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Participant`, `Team`, `Match`,
//!   `MatchArena`, `TournamentDay`, `Timeslot`, `Setting`, `Group`,
//!   `Tournament`, `Solution`, `Fixture`
//! - **`bracket`**: Opening-round pairing, seeded draw, single-elimination
//!   placeholder generation
//! - **`constraints`**: The constraint network over match → timeslot
//!   assignments
//! - **`heuristics`**: Variable ordering and forward-checking filters
//! - **`solver`**: Generic backtracking CSP solver
//! - **`problem`**: Tournament → solver mapping and the `TournamentScheduler`
//! - **`config`**: TOML configuration
//! - **`validation`**: Structural checks (duplicate categories, dependency
//!   cycles, round order)
//!
//! # Example
//!
//! ```
//! use court_schedule::models::{Participant, Setting, TournamentDay};
//! use court_schedule::problem::TournamentScheduler;
//! use court_schedule::TournamentBuilder;
//!
//! let settings = Setting::new(
//!     60,
//!     30,
//!     2,
//!     vec![TournamentDay::new("2024-05-04", 9, 20)?],
//! )?;
//!
//! let tournament = TournamentBuilder::new(settings)
//!     .with_subscriptions(
//!         "mens_single",
//!         (1..=4).map(|i| vec![Participant::new(i, format!("P{i}"))]).collect(),
//!     )
//!     .build()?;
//!
//! let solutions = TournamentScheduler::new(&tournament).solve()?;
//! assert!(solutions[0].is_valid(&tournament));
//! # Ok::<(), court_schedule::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"

pub mod bracket;
mod builder;
pub mod config;
pub mod constraints;
mod error;
pub mod heuristics;
pub mod models;
pub mod problem;
pub mod solver;
pub mod validation;

pub use builder::TournamentBuilder;
pub use error::{Result, ScheduleError};
