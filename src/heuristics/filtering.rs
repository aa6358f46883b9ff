//! Forward checking against court overlaps.

use std::collections::HashMap;

use super::DomainFilter;
use crate::constraints::Assignment;
use crate::models::{MatchId, TimeWindow, Timeslot, Tournament};

/// Drops every candidate timeslot whose match interval would overlap an
/// already assigned match on the same court.
///
/// Shrinking future domains eagerly is what keeps the search tractable:
/// the global constraints only get a say once every match is placed.
#[derive(Debug, Clone)]
pub struct NoOverlap {
    match_time: u32,
}

impl NoOverlap {
    /// Creates the filter for matches of `match_time` minutes.
    pub fn new(match_time: u32) -> Self {
        Self { match_time }
    }

    /// Binds the filter to the tournament's match duration.
    pub fn for_tournament(tournament: &Tournament) -> Self {
        Self::new(tournament.settings().match_time)
    }
}

impl DomainFilter<MatchId, Timeslot> for NoOverlap {
    fn name(&self) -> &'static str {
        "no_overlap"
    }

    fn filter(
        &self,
        variable: MatchId,
        domain: &[Timeslot],
        assignment: &Assignment<MatchId, Timeslot>,
    ) -> Vec<Timeslot> {
        let mut busy: HashMap<u32, Vec<TimeWindow>> = HashMap::new();
        for (id, slot) in assignment.iter() {
            if *id != variable {
                busy.entry(slot.court)
                    .or_default()
                    .push(slot.window(self.match_time));
            }
        }

        domain
            .iter()
            .filter(|candidate| {
                let window = candidate.window(self.match_time);
                busy.get(&candidate.court)
                    .map_or(true, |taken| taken.iter().all(|w| !w.overlaps(&window)))
            })
            .copied()
            .collect()
    }
}
