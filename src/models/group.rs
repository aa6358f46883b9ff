//! Category group model.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Match, MatchArena, MatchId, Participant, Team};

/// One category's teams and bracket.
///
/// `initial` holds the opening round (playable matches and byes), `future`
/// the generated next-round placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Category name (e.g. `"mens_single"`).
    pub category: String,
    /// Subscribed teams.
    pub teams: Vec<Team>,
    /// Opening-round matches.
    pub initial: Vec<MatchId>,
    /// Generated later-round matches.
    pub future: Vec<MatchId>,
}

impl Group {
    /// Creates a group.
    pub fn new(
        category: impl Into<String>,
        teams: Vec<Team>,
        initial: Vec<MatchId>,
        future: Vec<MatchId>,
    ) -> Self {
        Self {
            category: category.into(),
            teams,
            initial,
            future,
        }
    }

    /// Opening round followed by generated rounds.
    pub fn all_matches(&self) -> impl Iterator<Item = MatchId> + '_ {
        self.initial.iter().chain(&self.future).copied()
    }

    /// Matches that need scheduling.
    pub fn matches<'a>(&self, arena: &'a MatchArena) -> Vec<&'a Match> {
        self.all_matches()
            .filter_map(|id| arena.get(id))
            .filter(|m| m.is_playable())
            .collect()
    }

    /// Distinct participants of the group, teams first then matches.
    pub fn participants(&self, arena: &MatchArena) -> Vec<Participant> {
        let mut seen = HashSet::new();
        let from_teams = self.teams.iter().flat_map(|t| t.participants());
        let from_matches = self
            .all_matches()
            .filter_map(|id| arena.get(id))
            .flat_map(|m| m.participants());

        from_teams
            .chain(from_matches)
            .filter(|p| seen.insert(p.id))
            .cloned()
            .collect()
    }
}
