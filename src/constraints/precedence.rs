//! Bracket precedence constraints.
//!
//! A match can only be played after the matches that feed it. Ordering is
//! enforced against every transitive playable ancestor; the rest gap only
//! against direct dependencies, whose winners walk straight onto court.

use super::{Assignment, Constraint};
use crate::models::{MatchId, Timeslot, Tournament};

/// Binds a target and one of its ancestors: `[target, ancestor]`.
fn pair<'a>(
    variables: &[MatchId],
    assignment: &'a Assignment<MatchId, Timeslot>,
) -> Option<(&'a Timeslot, &'a Timeslot)> {
    match assignment.values_of(variables)?.as_slice() {
        [target, ancestor] => Some((*target, *ancestor)),
        _ => None,
    }
}

/// The target starts strictly after one of its playable ancestors.
#[derive(Debug, Clone)]
pub struct MatchConstraint {
    variables: [MatchId; 2],
}

impl MatchConstraint {
    /// `target` must start after `ancestor`.
    pub fn new(target: MatchId, ancestor: MatchId) -> Self {
        Self {
            variables: [target, ancestor],
        }
    }

    /// One constraint per (playable match, transitive playable ancestor).
    pub fn for_tournament(tournament: &Tournament) -> Vec<Self> {
        tournament
            .playable_matches()
            .into_iter()
            .flat_map(|m| {
                tournament
                    .previous_matches(m.id)
                    .into_iter()
                    .map(move |ancestor| Self::new(m.id, ancestor))
            })
            .collect()
    }

    /// The later match.
    pub fn target(&self) -> MatchId {
        self.variables[0]
    }

    /// The earlier match.
    pub fn ancestor(&self) -> MatchId {
        self.variables[1]
    }
}

impl Constraint<MatchId, Timeslot> for MatchConstraint {
    fn name(&self) -> &'static str {
        "match_precedence"
    }

    fn variables(&self) -> &[MatchId] {
        &self.variables
    }

    fn is_satisfied(&self, assignment: &Assignment<MatchId, Timeslot>) -> bool {
        match pair(&self.variables, assignment) {
            Some((target, ancestor)) => target.slot > ancestor.slot,
            None => true,
        }
    }
}

/// A direct dependency finishes, and its players rest, before the target.
///
/// `|target − dependency| ≥ min_gap` minutes, where `min_gap` is
/// `match_time + break_time`.
#[derive(Debug, Clone)]
pub struct NextRoundConstraint {
    variables: [MatchId; 2],
    min_gap: i64,
}

impl NextRoundConstraint {
    /// `target` and `dependency` must be at least `min_gap` minutes apart.
    pub fn new(target: MatchId, dependency: MatchId, min_gap: i64) -> Self {
        Self {
            variables: [target, dependency],
            min_gap,
        }
    }

    /// One constraint per direct playable dependency of every playable match
    /// that has at least one playable ancestor. Byes never get a timeslot,
    /// so edges to them are skipped.
    pub fn for_tournament(tournament: &Tournament) -> Vec<Self> {
        let min_gap = tournament.settings().rest_minutes();
        let mut constraints = Vec::new();

        for m in tournament.playable_matches() {
            if tournament.previous_matches(m.id).is_empty() {
                continue;
            }
            for &dependency in &m.depends_on {
                let playable = tournament
                    .get_match(dependency)
                    .is_some_and(|d| d.is_playable());
                if playable {
                    constraints.push(Self::new(m.id, dependency, min_gap));
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

impl Constraint<MatchId, Timeslot> for NextRoundConstraint {
    fn name(&self) -> &'static str {
        "next_round"
    }

    fn variables(&self) -> &[MatchId] {
        &self.variables
    }

    fn is_satisfied(&self, assignment: &Assignment<MatchId, Timeslot>) -> bool {
        match pair(&self.variables, assignment) {
            Some((target, dependency)) => target.gap_minutes(dependency) >= self.min_gap,
            None => true,
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

    fn assign(pairs: &[(u32, Timeslot)]) -> Assignment<MatchId, Timeslot> {
        pairs.iter().map(|&(id, s)| (MatchId(id), s)).collect()
    }

    #[test]
    fn test_match_constraint_strictly_after() {
        let c = MatchConstraint::new(MatchId(2), MatchId(0));
        assert_eq!(c.target(), MatchId(2));
        assert_eq!(c.ancestor(), MatchId(0));
        assert!(c.is_satisfied(&assign(&[(2, slot(0, 10, 0)), (0, slot(1, 9, 0))])));
        // Same time on another court is not "after"
        assert!(!c.is_satisfied(&assign(&[(2, slot(0, 9, 0)), (0, slot(1, 9, 0))])));
        assert!(!c.is_satisfied(&assign(&[(2, slot(0, 8, 0)), (0, slot(1, 9, 0))])));
    }

    #[test]
    fn test_match_constraint_vacuous() {
        let c = MatchConstraint::new(MatchId(2), MatchId(0));
        assert!(c.is_satisfied(&assign(&[(2, slot(0, 8, 0))])));
        assert!(c.is_satisfied(&assign(&[])));
    }

    #[test]
    fn test_next_round_gap() {
        let c = NextRoundConstraint::new(MatchId(2), MatchId(0), 90);
        assert_eq!(c.min_gap(), 90);
        assert!(c.is_satisfied(&assign(&[(2, slot(0, 10, 30)), (0, slot(0, 9, 0))])));
        assert!(!c.is_satisfied(&assign(&[(2, slot(0, 10, 0)), (0, slot(0, 9, 0))])));
        assert!(c.is_satisfied(&assign(&[(0, slot(0, 9, 0))])));
    }
}
