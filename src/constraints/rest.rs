//! Cross-category rest constraint.

use std::collections::HashSet;

use super::{Assignment, Constraint};
use crate::models::{MatchId, Timeslot, Tournament};

/// Two matches sharing a multi-category participant start at least
/// `min_gap` minutes apart.
#[derive(Debug, Clone)]
pub struct MultiCategoryConstraint {
    variables: [MatchId; 2],
    min_gap: i64,
}

impl MultiCategoryConstraint {
    /// `first` and `second` must be at least `min_gap` minutes apart.
    pub fn new(first: MatchId, second: MatchId, min_gap: i64) -> Self {
        Self {
            variables: [first, second],
            min_gap,
        }
    }

    /// One constraint per unordered pair of playable matches that share a
    /// participant entered in more than one category.
    pub fn for_tournament(tournament: &Tournament) -> Vec<Self> {
        let min_gap = tournament.settings().rest_minutes();
        let multi: HashSet<u32> = tournament
            .multi_tournament_participants()
            .iter()
            .map(|p| p.id)
            .collect();
        if multi.is_empty() {
            return Vec::new();
        }

        let shared: Vec<(MatchId, HashSet<u32>)> = tournament
            .playable_matches()
            .into_iter()
            .map(|m| {
                let ids: HashSet<u32> = m
                    .participants()
                    .map(|p| p.id)
                    .filter(|id| multi.contains(id))
                    .collect();
                (m.id, ids)
            })
            .filter(|(_, ids)| !ids.is_empty())
            .collect();

        let mut constraints = Vec::new();
        for (i, (first, first_ids)) in shared.iter().enumerate() {
            for (second, second_ids) in &shared[i + 1..] {
                if !first_ids.is_disjoint(second_ids) {
                    constraints.push(Self::new(*first, *second, min_gap));
                }
            }
        }
        constraints
    }

    /// Required gap in minutes.
    pub fn min_gap(&self) -> i64 {
        self.min_gap
    }
}

impl Constraint<MatchId, Timeslot> for MultiCategoryConstraint {
    fn name(&self) -> &'static str {
        "multi_category"
    }

    fn variables(&self) -> &[MatchId] {
        &self.variables
    }

    fn is_satisfied(&self, assignment: &Assignment<MatchId, Timeslot>) -> bool {
        match (
            assignment.get(&self.variables[0]),
            assignment.get(&self.variables[1]),
        ) {
            (Some(a), Some(b)) => a.gap_minutes(b) >= self.min_gap,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot(court: u32, hour: u32, minute: u32) -> Timeslot {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        Timeslot::new(court, date, date.and_hms_opt(hour, minute, 0).unwrap())
    }

    #[test]
    fn test_gap_in_both_directions() {
        let c = MultiCategoryConstraint::new(MatchId(0), MatchId(1), 90);
        let ok: Assignment<_, _> = [(MatchId(0), slot(0, 12, 0)), (MatchId(1), slot(1, 10, 30))]
            .into_iter()
            .collect();
        assert!(c.is_satisfied(&ok));

        let too_close: Assignment<_, _> =
            [(MatchId(0), slot(0, 9, 0)), (MatchId(1), slot(1, 10, 0))]
                .into_iter()
                .collect();
        assert!(!c.is_satisfied(&too_close));
    }

    #[test]
    fn test_vacuous_until_both_assigned() {
        let c = MultiCategoryConstraint::new(MatchId(0), MatchId(1), 90);
        let partial: Assignment<_, _> = [(MatchId(0), slot(0, 9, 0))].into_iter().collect();
        assert!(c.is_satisfied(&partial));
    }
}
