//! Tournament scheduling problem.
//!
//! Maps a [`Tournament`] onto the generic [`BacktrackingSolver`]:
//!
//! - one variable per playable match, its domain every offered timeslot,
//! - the five tournament constraints,
//! - [`MultipleMatchesParticipant`] ordering and [`NoOverlap`] filtering.
//!
//! [`TournamentScheduler`] runs the search and wraps each complete
//! assignment into a [`Solution`].
//!
//! # Reference
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

use std::time::Duration;

use tracing::debug;

use crate::config::SchedulerConfig;
use crate::constraints::{
    AllDifferent, MatchConstraint, MultiCategoryConstraint, NextRoundConstraint, NoOverlapping,
};
use crate::error::Result;
use crate::heuristics::{MultipleMatchesParticipant, NoOverlap};
use crate::models::{MatchId, Solution, Timeslot, Tournament};
use crate::solver::{BacktrackingSolver, SolverStatistics};

/// Builds a ready-to-run solver for `tournament`.
///
/// Every playable match becomes a variable whose domain is the full list of
/// timeslots from [`crate::models::Setting::timeslots`]. Byes are never
/// variables.
pub fn build(tournament: &Tournament) -> Result<BacktrackingSolver<MatchId, Timeslot>> {
    let timeslots = tournament.settings().timeslots();
    let matches = tournament.playable_matches();

    let mut solver = BacktrackingSolver::new();
    for m in &matches {
        solver.add_variable(m.id, timeslots.clone());
    }

    solver.add_constraint(AllDifferent::for_tournament(tournament))?;
    solver.add_constraint(NoOverlapping::for_tournament(tournament))?;

    let precedence = MatchConstraint::for_tournament(tournament);
    let next_round = NextRoundConstraint::for_tournament(tournament);
    let multi_category = MultiCategoryConstraint::for_tournament(tournament);
    debug!(
        event = "problem_built",
        variables = matches.len(),
        timeslots = timeslots.len(),
        precedence = precedence.len(),
        next_round = next_round.len(),
        multi_category = multi_category.len(),
    );

    for c in precedence {
        solver.add_constraint(c)?;
    }
    for c in next_round {
        solver.add_constraint(c)?;
    }
    for c in multi_category {
        solver.add_constraint(c)?;
    }

    solver.add_ordering(MultipleMatchesParticipant::new(tournament));
    solver.add_filtering(NoOverlap::for_tournament(tournament));

    Ok(solver)
}

/// Schedules a tournament.
///
/// # Example
/// ```
/// use court_schedule::problem::TournamentScheduler;
/// use court_schedule::models::{Participant, Setting, TournamentDay};
/// use court_schedule::TournamentBuilder;
///
/// let settings = Setting::new(
///     60,
///     30,
///     1,
///     vec![TournamentDay::new("2024-05-04", 9, 20).unwrap()],
/// ).unwrap();
/// let tournament = TournamentBuilder::new(settings)
///     .with_subscriptions(
///         "mens_single",
///         vec![vec![Participant::new(1, "Ann")], vec![Participant::new(2, "Bob")]],
///     )
///     .build()
///     .unwrap();
///
/// let solutions = TournamentScheduler::new(&tournament).solve().unwrap();
/// assert_eq!(solutions.len(), 1);
/// assert_eq!(solutions[0].fixtures[0].title, "Ann vs Bob");
/// ```
#[derive(Debug, Clone)]
pub struct TournamentScheduler<'a> {
    tournament: &'a Tournament,
    max_solutions: usize,
    time_limit: Option<Duration>,
}

impl<'a> TournamentScheduler<'a> {
    /// Creates a scheduler collecting one solution without a time limit.
    pub fn new(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            max_solutions: 1,
            time_limit: None,
        }
    }

    /// Applies search options from configuration.
    pub fn with_config(mut self, config: &SchedulerConfig) -> Self {
        self.max_solutions = config.max_solutions;
        self.time_limit = config.time_limit();
        self
    }

    /// Sets the solution cap. Zero is treated as one.
    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = n;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Finds up to `max_solutions` schedules in discovery order.
    ///
    /// An empty list means the tournament cannot be scheduled with the
    /// given days and courts.
    pub fn solve(&self) -> Result<Vec<Solution>> {
        self.solve_with_statistics().map(|(solutions, _)| solutions)
    }

    /// Like [`Self::solve`], also returning search statistics.
    pub fn solve_with_statistics(&self) -> Result<(Vec<Solution>, SolverStatistics)> {
        let mut solver = build(self.tournament)?;
        solver.set_max_solutions(self.max_solutions);
        solver.set_time_limit(self.time_limit);

        let solutions = solver
            .solve()
            .iter()
            .map(|assignment| Solution::from_assignment(self.tournament, assignment))
            .collect::<Result<Vec<_>>>()?;
        Ok((solutions, solver.statistics().clone()))
    }
}
