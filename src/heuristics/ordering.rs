//! Variable ordering: most-entangled matches first.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::VariableOrdering;
use crate::models::{MatchId, Tournament};

/// Ranking of a count: some-but-few beats none, none beats undefined.
///
/// Derived ordering: `Positive(1) < Positive(2) < … < Zero < Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Preference {
    /// A positive finite count; smaller is preferred.
    Positive(usize),
    /// Nothing counted.
    Zero,
    /// No value at all.
    Undefined,
}

impl Preference {
    /// Ranks an optional count.
    pub fn of(count: Option<usize>) -> Self {
        match count {
            Some(0) => Self::Zero,
            Some(n) => Self::Positive(n),
            None => Self::Undefined,
        }
    }
}

/// Per-match sort key, compared field by field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    /// `false` when a multi-category participant plays (sorts first).
    no_multi_participant: bool,
    shared_count: Preference,
    shared_ids: Vec<u32>,
    participant_count: Preference,
    id: MatchId,
}

/// Orders matches so those involving multi-category participants are
/// assigned first, since they are the likeliest to conflict.
///
/// Keys are computed once from the tournament, so the order is total and
/// deterministic.
#[derive(Debug, Clone)]
pub struct MultipleMatchesParticipant {
    keys: HashMap<MatchId, OrderKey>,
}

impl MultipleMatchesParticipant {
    /// Precomputes keys for every playable match.
    pub fn new(tournament: &Tournament) -> Self {
        let multi: HashSet<u32> = tournament
            .multi_tournament_participants()
            .iter()
            .map(|p| p.id)
            .collect();
        let matches = tournament.playable_matches();

        // How many playable matches each participant appears in.
        let mut appearances: HashMap<u32, usize> = HashMap::new();
        for m in &matches {
            let ids: HashSet<u32> = m.participants().map(|p| p.id).collect();
            for id in ids {
                *appearances.entry(id).or_insert(0) += 1;
            }
        }

        let keys = matches
            .iter()
            .map(|m| {
                let mut ids: Vec<u32> = m.participants().map(|p| p.id).collect();
                ids.sort_unstable();
                ids.dedup();

                let mut shared: Vec<u32> = ids
                    .iter()
                    .copied()
                    .filter(|id| multi.contains(id))
                    .filter(|id| appearances.get(id).copied().unwrap_or(0) > 1)
                    .collect();
                shared.sort_unstable();

                let participant_count = m.participants().count();
                let shared_count = if participant_count == 0 {
                    None
                } else {
                    Some(shared.len())
                };

                let key = OrderKey {
                    no_multi_participant: !ids.iter().any(|id| multi.contains(id)),
                    shared_count: Preference::of(shared_count),
                    shared_ids: shared,
                    participant_count: Preference::of(Some(participant_count)),
                    id: m.id,
                };
                (m.id, key)
            })
            .collect();

        Self { keys }
    }

    fn compare(&self, a: &MatchId, b: &MatchId) -> Ordering {
        match (self.keys.get(a), self.keys.get(b)) {
            (Some(ka), Some(kb)) => ka.cmp(kb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl VariableOrdering<MatchId> for MultipleMatchesParticipant {
    fn name(&self) -> &'static str {
        "multiple_matches_participant"
    }

    fn order(&self, unassigned: &[MatchId]) -> Vec<MatchId> {
        let mut sorted = unassigned.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Setting, Team, TournamentDay};
    use crate::TournamentBuilder;

    fn p(id: u32) -> Participant {
        Participant::new(id, format!("P{id}"))
    }

    fn tournament() -> Tournament {
        let settings = Setting::new(
            60,
            30,
            2,
            vec![TournamentDay::new("2024-05-04", 9, 20).unwrap()],
        )
        .unwrap();

        // P1 plays in both categories.
        TournamentBuilder::new(settings)
            .with_category(
                "mens_single",
                vec![
                    Team::single("mens_single", p(3)),
                    Team::single("mens_single", p(4)),
                    Team::single("mens_single", p(1)),
                    Team::single("mens_single", p(2)),
                ],
            )
            .with_category(
                "mixed_double",
                vec![
                    Team::double("mixed_double", p(1), p(5)),
                    Team::double("mixed_double", p(6), p(7)),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_preference_order() {
        let mut prefs = vec![
            Preference::Undefined,
            Preference::Zero,
            Preference::Positive(3),
            Preference::Positive(1),
        ];
        prefs.sort();
        assert_eq!(
            prefs,
            vec![
                Preference::Positive(1),
                Preference::Positive(3),
                Preference::Zero,
                Preference::Undefined,
            ]
        );
        assert_eq!(Preference::of(Some(0)), Preference::Zero);
        assert_eq!(Preference::of(None), Preference::Undefined);
    }

    #[test]
    fn test_multi_category_matches_first() {
        let t = tournament();
        let ordering = MultipleMatchesParticipant::new(&t);
        let ids: Vec<MatchId> = t.playable_matches().iter().map(|m| m.id).collect();
        let ordered = ordering.order(&ids);

        let involves_p1 = |id: &MatchId| t.get_match(*id).unwrap().involves(&p(1));
        assert!(involves_p1(&ordered[0]));
        assert!(involves_p1(&ordered[1]));
        assert!(ordered[2..].iter().all(|id| !involves_p1(id)));
    }

    #[test]
    fn test_placeholders_after_real_matches() {
        let t = tournament();
        let ordering = MultipleMatchesParticipant::new(&t);
        let ids: Vec<MatchId> = t.playable_matches().iter().map(|m| m.id).collect();
        let ordered = ordering.order(&ids);
        let last = t.get_match(*ordered.last().unwrap()).unwrap();
        assert_eq!(last.participants().count(), 0);
    }

    #[test]
    fn test_order_is_deterministic() {
        let t = tournament();
        let ordering = MultipleMatchesParticipant::new(&t);
        let mut ids: Vec<MatchId> = t.playable_matches().iter().map(|m| m.id).collect();
        let first = ordering.order(&ids);
        ids.reverse();
        let second = ordering.order(&ids);
        assert_eq!(first, second);
        assert_eq!(first, ordering.order(&first));
    }
}
