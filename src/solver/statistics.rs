//! Search statistics.

use serde::Serialize;
use std::time::Duration;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SolveOutcome {
    /// The whole search space was explored.
    #[default]
    Exhausted,
    /// `max_solutions` assignments were found.
    SolutionLimit,
    /// The time limit expired; solutions found so far are kept.
    TimedOut,
}

/// Counters collected during one `solve()` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStatistics {
    /// Values tried (node expansions).
    pub nodes: u64,
    /// Values rejected by a constraint.
    pub rejected: u64,
    /// Values rejected because filtering emptied some domain.
    pub wiped_out: u64,
    /// Values rejected by the lookahead.
    pub vetoed: u64,
    /// Frames popped after exhausting their candidates.
    pub backtracks: u64,
    /// Complete assignments found.
    pub solutions: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Termination reason.
    pub outcome: SolveOutcome,
}
