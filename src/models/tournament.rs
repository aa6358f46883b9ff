//! Tournament model.
//!
//! The tournament owns the settings, every category group and the arena
//! holding all matches. Everything here is read-only once built; the
//! constraint network and heuristics only ever borrow it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::{Group, Match, MatchArena, MatchId, Participant, Setting};

/// A multi-category tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    settings: Setting,
    groups: Vec<Group>,
    arena: MatchArena,
}

impl Tournament {
    /// Assembles a tournament from its parts.
    ///
    /// Use [`crate::validation::validate_tournament`] on hand-built
    /// tournaments; [`crate::TournamentBuilder`] validates automatically.
    pub fn new(settings: Setting, groups: Vec<Group>, arena: MatchArena) -> Self {
        Self {
            settings,
            groups,
            arena,
        }
    }

    /// Tournament-wide settings.
    pub fn settings(&self) -> &Setting {
        &self.settings
    }

    /// Category groups in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group of a category.
    pub fn group(&self, category: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Every match, playable or not.
    pub fn arena(&self) -> &MatchArena {
        &self.arena
    }

    /// Looks up a match.
    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.arena.get(id)
    }

    /// Playable matches per category.
    pub fn matches(&self) -> BTreeMap<&str, Vec<&Match>> {
        self.groups
            .iter()
            .map(|g| (g.category.as_str(), g.matches(&self.arena)))
            .collect()
    }

    /// Playable matches across all groups, group order then bracket order.
    pub fn playable_matches(&self) -> Vec<&Match> {
        self.groups
            .iter()
            .flat_map(|g| g.matches(&self.arena))
            .collect()
    }

    /// Participants of all groups, deduplicated by id.
    pub fn participants(&self) -> Vec<Participant> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.participants(&self.arena))
            .filter(|p| seen.insert(p.id))
            .collect()
    }

    /// Participants entered in more than one group.
    ///
    /// These are subject to cross-category rest constraints.
    pub fn multi_tournament_participants(&self) -> Vec<Participant> {
        let mut group_count: HashMap<u32, usize> = HashMap::new();
        for group in &self.groups {
            for participant in group.participants(&self.arena) {
                *group_count.entry(participant.id).or_insert(0) += 1;
            }
        }

        self.participants()
            .into_iter()
            .filter(|p| group_count.get(&p.id).copied().unwrap_or(0) > 1)
            .collect()
    }

    /// Transitive dependencies of a match, byes included.
    pub fn dependencies(&self, id: MatchId) -> Vec<MatchId> {
        self.arena.dependencies(id)
    }

    /// Transitive playable ancestors of a match.
    pub fn previous_matches(&self, id: MatchId) -> Vec<MatchId> {
        self.arena.previous_matches(id)
    }
}
