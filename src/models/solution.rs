//! Solution model.
//!
//! A solution binds every playable match to a timeslot. It is the shape
//! rendering and serialization code consume: an ordered list of fixtures,
//! each with enough context to print a schedule row.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{Match, MatchId, Team, Timeslot, Tournament};
use crate::constraints::{
    AllDifferent, Assignment, Constraint, MatchConstraint, MultiCategoryConstraint,
    NextRoundConstraint, NoOverlapping,
};
use crate::error::{Result, ScheduleError};

/// A match bound to a timeslot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Scheduled match.
    pub match_id: MatchId,
    /// Category of the match.
    pub category: String,
    /// Bracket round.
    pub round: u32,
    /// Court index.
    pub court: u32,
    /// Tournament day the slot belongs to.
    pub date: NaiveDate,
    /// Start time.
    pub slot: NaiveDateTime,
    /// "Team A vs Team B", or the feeding matches while unresolved.
    pub title: String,
}

impl Fixture {
    /// The timeslot this fixture occupies.
    pub fn timeslot(&self) -> Timeslot {
        Timeslot::new(self.court, self.date, self.slot)
    }
}

/// A complete schedule for one tournament.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solution {
    /// Fixtures ordered by start time, then court, then match id.
    pub fixtures: Vec<Fixture>,
    /// Duration of every match (minutes).
    pub match_time: u32,
}

/// A broken scheduling rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Which rule.
    pub violation_type: ViolationType,
    /// Matches involved.
    pub match_ids: Vec<MatchId>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of scheduling violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A playable match has no fixture.
    Unscheduled,
    /// Two matches share court and start time.
    DoubleBooking,
    /// Two matches overlap on one court.
    CourtOverlap,
    /// A match is not after one of its feeding matches.
    Precedence,
    /// Not enough rest between consecutive rounds.
    NextRoundRest,
    /// Not enough rest for a player entered in several categories.
    CrossCategoryRest,
}

impl Violation {
    fn new(violation_type: ViolationType, match_ids: Vec<MatchId>, message: String) -> Self {
        Self {
            violation_type,
            match_ids,
            message,
        }
    }
}

impl Solution {
    /// Wraps a complete assignment into fixtures.
    ///
    /// Fails with [`ScheduleError::UnknownMatch`] if the assignment binds a
    /// match the tournament does not contain.
    pub fn from_assignment(
        tournament: &Tournament,
        assignment: &Assignment<MatchId, Timeslot>,
    ) -> Result<Self> {
        let mut fixtures = Vec::with_capacity(assignment.len());
        for (&id, slot) in assignment.iter() {
            let m = tournament
                .get_match(id)
                .ok_or(ScheduleError::UnknownMatch(id))?;
            fixtures.push(Fixture {
                match_id: id,
                category: m.category.clone(),
                round: m.round,
                court: slot.court,
                date: slot.date,
                slot: slot.slot,
                title: title(tournament, m),
            });
        }
        fixtures.sort_by(|a, b| {
            (a.slot, a.court, a.match_id).cmp(&(b.slot, b.court, b.match_id))
        });

        Ok(Self {
            fixtures,
            match_time: tournament.settings().match_time,
        })
    }

    /// Number of fixtures.
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Fixture of a given match.
    pub fn fixture_for_match(&self, id: MatchId) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.match_id == id)
    }

    /// Fixtures played on a court, in time order.
    pub fn fixtures_for_court(&self, court: u32) -> Vec<&Fixture> {
        self.fixtures.iter().filter(|f| f.court == court).collect()
    }

    /// Fixtures of a category, in time order.
    pub fn fixtures_for_category(&self, category: &str) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// Earliest start.
    pub fn first_start(&self) -> Option<NaiveDateTime> {
        self.fixtures.iter().map(|f| f.slot).min()
    }

    /// Latest end (start of the last match plus match time).
    pub fn last_end(&self) -> Option<NaiveDateTime> {
        self.fixtures
            .iter()
            .map(|f| f.slot)
            .max()
            .map(|s| s + Duration::minutes(i64::from(self.match_time)))
    }

    /// Busy time on `court` divided by the span from first start to last end.
    ///
    /// Returns `None` for an empty solution.
    pub fn court_utilization(&self, court: u32) -> Option<f64> {
        let span = (self.last_end()? - self.first_start()?).num_minutes();
        if span <= 0 {
            return None;
        }
        let busy = self.fixtures_for_court(court).len() as i64 * i64::from(self.match_time);
        Some(busy as f64 / span as f64)
    }

    /// Utilization of every court that has fixtures.
    pub fn all_utilizations(&self) -> BTreeMap<u32, f64> {
        let courts: HashSet<u32> = self.fixtures.iter().map(|f| f.court).collect();
        courts
            .into_iter()
            .filter_map(|c| self.court_utilization(c).map(|u| (c, u)))
            .collect()
    }

    /// Re-checks every scheduling rule against `tournament`.
    pub fn violations(&self, tournament: &Tournament) -> Vec<Violation> {
        let assignment: Assignment<MatchId, Timeslot> = self
            .fixtures
            .iter()
            .map(|f| (f.match_id, f.timeslot()))
            .collect();
        let mut violations = Vec::new();

        for m in tournament.playable_matches() {
            if !assignment.is_assigned(&m.id) {
                violations.push(Violation::new(
                    ViolationType::Unscheduled,
                    vec![m.id],
                    format!("{} is not scheduled", m.id),
                ));
            }
        }

        let match_time = tournament.settings().match_time;
        for (i, a) in self.fixtures.iter().enumerate() {
            for b in &self.fixtures[i + 1..] {
                let pair = vec![a.match_id, b.match_id];
                if !AllDifferent::new(pair.clone()).is_satisfied(&assignment) {
                    violations.push(Violation::new(
                        ViolationType::DoubleBooking,
                        pair,
                        format!("{} and {} share {}", a.match_id, b.match_id, a.timeslot()),
                    ));
                } else if !NoOverlapping::new(pair.clone(), match_time).is_satisfied(&assignment) {
                    violations.push(Violation::new(
                        ViolationType::CourtOverlap,
                        pair,
                        format!("{} and {} overlap on court {}", a.match_id, b.match_id, a.court),
                    ));
                }
            }
        }

        for c in MatchConstraint::for_tournament(tournament) {
            check(&c, ViolationType::Precedence, &assignment, &mut violations);
        }
        for c in NextRoundConstraint::for_tournament(tournament) {
            check(&c, ViolationType::NextRoundRest, &assignment, &mut violations);
        }
        for c in MultiCategoryConstraint::for_tournament(tournament) {
            check(&c, ViolationType::CrossCategoryRest, &assignment, &mut violations);
        }

        violations
    }

    /// Whether the solution breaks no rule of `tournament`.
    pub fn is_valid(&self, tournament: &Tournament) -> bool {
        self.violations(tournament).is_empty()
    }
}

fn check(
    constraint: &dyn Constraint<MatchId, Timeslot>,
    violation_type: ViolationType,
    assignment: &Assignment<MatchId, Timeslot>,
    violations: &mut Vec<Violation>,
) {
    if constraint.is_satisfied(assignment) {
        return;
    }
    let ids = constraint.variables().to_vec();
    let names: Vec<String> = ids.iter().map(MatchId::to_string).collect();
    violations.push(Violation::new(
        violation_type,
        ids,
        format!("{} violated by {}", constraint.name(), names.join(", ")),
    ));
}

/// "A vs B"; unresolved sides name the match that feeds them.
fn title(tournament: &Tournament, m: &Match) -> String {
    let side = |team: &Team, position: usize| -> String {
        if let Some(name) = team.name() {
            return name;
        }
        match m.depends_on.get(position).and_then(|id| tournament.get_match(*id)) {
            Some(dep) if dep.is_bye() => dep
                .team1
                .name()
                .unwrap_or_else(|| format!("Winner {}", dep.id)),
            Some(dep) => format!("Winner {}", dep.id),
            None => "TBD".to_string(),
        }
    };
    format!("{} vs {}", side(&m.team1, 0), side(&m.team2, 1))
}
