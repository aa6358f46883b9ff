//! Tournament domain models.
//!
//! Provides the data types for describing a tournament to schedule and the
//! solutions found for it. Models are immutable once built; constraints and
//! heuristics only ever read them.
//!
//! # Domain Mappings
//!
//! | court-schedule | CSP term | Scheduling term |
//! |----------------|----------|-----------------|
//! | Match (playable) | Variable | Job |
//! | Timeslot | Value | Machine × start time |
//! | Setting::timeslots | Domain | Planning horizon |
//! | Solution | Complete assignment | Schedule |

mod calendar;
mod group;
mod matches;
mod participant;
mod setting;
mod solution;
mod team;
mod tournament;

pub use calendar::{TimeWindow, Timeslot, TournamentDay};
pub use group::Group;
pub use matches::{Match, MatchArena, MatchId, MatchKind};
pub use participant::Participant;
pub use setting::Setting;
pub use solution::{Fixture, Solution, Violation, ViolationType};
pub use team::Team;
pub use tournament::Tournament;
