//! Single-elimination bracket generation.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::models::{MatchArena, MatchId, Team};

/// Pairs teams two at a time into opening-round matches.
///
/// An odd team out gets a one-team bye that advances it automatically.
/// Returns the new match ids in pairing order.
pub fn opening_round(arena: &mut MatchArena, category: &str, teams: &[Team]) -> Vec<MatchId> {
    let mut ids = Vec::with_capacity(teams.len().div_ceil(2));
    let mut remaining = teams.iter();
    while let Some(first) = remaining.next() {
        let id = match remaining.next() {
            Some(second) => {
                arena.add_playable(category, first.clone(), second.clone(), 0, Vec::new())
            }
            None => {
                trace!(category, team = ?first.name(), "bye");
                arena.add_bye(category, first.clone(), 0)
            }
        };
        ids.push(id);
    }
    ids
}

/// A single-elimination bracket over a fixed opening round.
///
/// With `n` opening matches there are `2n` entrant slots, so the bracket
/// holds `2n - 1` matches over `ceil(log2(2n))` rounds.
///
/// # Example
/// ```
/// use court_schedule::bracket::SingleElimination;
/// use court_schedule::models::MatchId;
///
/// let bracket = SingleElimination::new("mens_single", vec![MatchId(0), MatchId(1)]);
/// assert_eq!(bracket.total_matches(), 3);
/// assert_eq!(bracket.total_rounds(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SingleElimination {
    category: String,
    opening: Vec<MatchId>,
}

impl SingleElimination {
    /// Creates a bracket over the given opening matches (byes included).
    pub fn new(category: impl Into<String>, opening: Vec<MatchId>) -> Self {
        Self {
            category: category.into(),
            opening,
        }
    }

    /// Opening-round size.
    pub fn opening_size(&self) -> usize {
        self.opening.len()
    }

    /// Matches in the whole bracket, opening round included.
    pub fn total_matches(&self) -> usize {
        match self.opening.len() {
            0 => 0,
            n => 2 * n - 1,
        }
    }

    /// Rounds in the whole bracket, opening round included.
    pub fn total_rounds(&self) -> u32 {
        match self.opening.len() {
            0 => 0,
            // ceil(log2(2n)) = 1 + ceil(log2(n))
            n => 1 + n.next_power_of_two().trailing_zeros(),
        }
    }

    /// Round of the `n`-th match (1-based) in bracket order.
    ///
    /// Rounds here are 1-based: the first `2^(R-1)` matches are round 1, the
    /// next `2^(R-2)` round 2, and so on. Returns 0 for `n == 0` or an empty
    /// bracket.
    pub fn round_for_match(&self, n: usize) -> u32 {
        let rounds = self.total_rounds();
        if n == 0 || rounds == 0 {
            return 0;
        }

        let mut remaining = n;
        for round in 1..=rounds {
            let bucket = 1usize << (rounds - round);
            if remaining <= bucket {
                return round;
            }
            remaining -= bucket;
        }
        rounds
    }

    /// Allocates the placeholder matches that lead to a single winner.
    ///
    /// Consecutive unpaired matches are paired in order; each placeholder
    /// depends on the two matches it pairs and has unresolved teams. Its
    /// round is half the number of matches in its transitive dependency
    /// chain, at least 1. Returns only the new ids.
    pub fn generate(&self, arena: &mut MatchArena) -> Vec<MatchId> {
        let mut pending: VecDeque<MatchId> = self.opening.iter().copied().collect();
        let mut generated =
            Vec::with_capacity(self.total_matches().saturating_sub(self.opening.len()));

        while pending.len() > 1 {
            let (Some(a), Some(b)) = (pending.pop_front(), pending.pop_front()) else {
                break;
            };
            // a, b and everything feeding them
            let chain = 2 + arena.dependencies(a).len() + arena.dependencies(b).len();
            let round = (chain / 2).max(1) as u32;

            let id = arena.add_playable(
                self.category.as_str(),
                Team::unresolved(self.category.as_str()),
                Team::unresolved(self.category.as_str()),
                round,
                vec![a, b],
            );
            trace!(category = %self.category, %id, %a, %b, round, "placeholder");
            generated.push(id);
            pending.push_back(id);
        }

        debug!(
            event = "bracket_generated",
            category = %self.category,
            opening = self.opening.len(),
            generated = generated.len(),
            rounds = self.total_rounds(),
        );
        generated
    }
}
