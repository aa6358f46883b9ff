//! Match model and the match arena.
//!
//! Matches form a DAG through `depends_on`: a next-round placeholder
//! depends on the matches whose winners fill its slots. Matches live in a
//! [`MatchArena`] and reference each other by [`MatchId`], never by
//! pointer. Round numbers strictly increase along `depends_on` edges, so
//! the graph is acyclic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Participant, Team};

/// Stable identifier of a match inside a [`MatchArena`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MatchId(pub u32);

impl MatchId {
    /// Position of the match in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Whether a match is actually played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// A real contest, or a placeholder awaiting earlier results.
    Playable,
    /// Auto-advances its only team; never scheduled.
    Bye,
}

/// A match between two teams.
///
/// Created once (by opening-round assembly or the bracket generator) and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Arena identifier.
    pub id: MatchId,
    /// Category (bracket) this match belongs to.
    pub category: String,
    /// First side.
    pub team1: Team,
    /// Second side. Unresolved for byes.
    pub team2: Team,
    /// Round number, 0 for the opening round.
    pub round: u32,
    /// Matches whose winners feed this one, in slot order.
    pub depends_on: Vec<MatchId>,
    /// Playable or bye.
    pub kind: MatchKind,
}

impl Match {
    /// Whether this match needs a court and a time.
    #[inline]
    pub fn is_playable(&self) -> bool {
        self.kind == MatchKind::Playable
    }

    /// Whether this is a bye.
    #[inline]
    pub fn is_bye(&self) -> bool {
        self.kind == MatchKind::Bye
    }

    /// Participants of both teams, team1 first.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.team1
            .participants()
            .iter()
            .chain(self.team2.participants())
    }

    /// Whether `participant` plays in this match.
    pub fn involves(&self, participant: &Participant) -> bool {
        self.participants().any(|p| p == participant)
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.category == other.category && self.round == other.round
    }
}

impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.category.hash(state);
        self.round.hash(state);
    }
}

/// Owner of every match in a tournament.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchArena {
    matches: Vec<Match>,
}

impl MatchArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a playable match.
    pub fn add_playable(
        &mut self,
        category: impl Into<String>,
        team1: Team,
        team2: Team,
        round: u32,
        depends_on: Vec<MatchId>,
    ) -> MatchId {
        self.push(category.into(), team1, team2, round, depends_on, MatchKind::Playable)
    }

    /// Allocates a bye that advances `team`.
    pub fn add_bye(&mut self, category: impl Into<String>, team: Team, round: u32) -> MatchId {
        let category = category.into();
        let empty = Team::unresolved(category.clone());
        self.push(category, team, empty, round, Vec::new(), MatchKind::Bye)
    }

    fn push(
        &mut self,
        category: String,
        team1: Team,
        team2: Team,
        round: u32,
        depends_on: Vec<MatchId>,
        kind: MatchKind,
    ) -> MatchId {
        let id = MatchId(self.matches.len() as u32);
        self.matches.push(Match {
            id,
            category,
            team1,
            team2,
            round,
            depends_on,
            kind,
        });
        id
    }

    /// Looks up a match.
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.index())
    }

    /// All matches in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Transitive closure of `depends_on`, nearest first (pre-order).
    ///
    /// Includes byes. Unknown ids are skipped.
    pub fn dependencies(&self, id: MatchId) -> Vec<MatchId> {
        self.ancestors(id, |_| true)
    }

    /// Transitive playable ancestors.
    ///
    /// Byes are skipped but their own ancestors are still reached.
    pub fn previous_matches(&self, id: MatchId) -> Vec<MatchId> {
        self.ancestors(id, Match::is_playable)
    }

    fn ancestors(&self, id: MatchId, keep: impl Fn(&Match) -> bool) -> Vec<MatchId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<MatchId> = match self.get(id) {
            Some(m) => m.depends_on.iter().rev().copied().collect(),
            None => return out,
        };

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(m) = self.get(current) else {
                continue;
            };
            if keep(m) {
                out.push(current);
            }
            stack.extend(m.depends_on.iter().rev().copied());
        }

        out
    }
}
