//! Tournament-wide constraints: no double booking, no court overlap.

use std::collections::{HashMap, HashSet};

use super::{Assignment, Constraint};
use crate::models::{MatchId, TimeWindow, Timeslot, Tournament};

/// All assigned timeslots are pairwise distinct (same court and time).
#[derive(Debug, Clone)]
pub struct AllDifferent {
    variables: Vec<MatchId>,
}

impl AllDifferent {
    /// Creates the constraint over `variables`.
    pub fn new(variables: Vec<MatchId>) -> Self {
        Self { variables }
    }

    /// Ranges over every playable match of the tournament.
    pub fn for_tournament(tournament: &Tournament) -> Self {
        Self::new(tournament.playable_matches().iter().map(|m| m.id).collect())
    }
}

impl Constraint<MatchId, Timeslot> for AllDifferent {
    fn name(&self) -> &'static str {
        "all_different"
    }

    fn variables(&self) -> &[MatchId] {
        &self.variables
    }

    fn is_satisfied(&self, assignment: &Assignment<MatchId, Timeslot>) -> bool {
        let Some(slots) = assignment.values_of(&self.variables) else {
            return true;
        };
        let mut seen = HashSet::with_capacity(slots.len());
        slots.into_iter().all(|slot| seen.insert(slot))
    }
}

/// Per court, no two matches' `[start, start + match_time)` intervals
/// intersect.
#[derive(Debug, Clone)]
pub struct NoOverlapping {
    variables: Vec<MatchId>,
    match_time: u32,
}

impl NoOverlapping {
    /// Creates the constraint over `variables` with matches of `match_time`
    /// minutes.
    pub fn new(variables: Vec<MatchId>, match_time: u32) -> Self {
        Self {
            variables,
            match_time,
        }
    }

    /// Ranges over every playable match of the tournament.
    pub fn for_tournament(tournament: &Tournament) -> Self {
        Self::new(
            tournament.playable_matches().iter().map(|m| m.id).collect(),
            tournament.settings().match_time,
        )
    }
}

impl Constraint<MatchId, Timeslot> for NoOverlapping {
    fn name(&self) -> &'static str {
        "no_overlapping"
    }

    fn variables(&self) -> &[MatchId] {
        &self.variables
    }

    fn is_satisfied(&self, assignment: &Assignment<MatchId, Timeslot>) -> bool {
        let Some(slots) = assignment.values_of(&self.variables) else {
            return true;
        };

        let mut by_court: HashMap<u32, Vec<TimeWindow>> = HashMap::new();
        for slot in slots {
            by_court
                .entry(slot.court)
                .or_default()
                .push(slot.window(self.match_time));
        }

        // Windows share one length, so after sorting by start only
        // neighbours can overlap.
        by_court.into_values().all(|mut windows| {
            windows.sort_by_key(|w| w.start);
            windows.windows(2).all(|pair| !pair[0].overlaps(&pair[1]))
        })
    }
}
