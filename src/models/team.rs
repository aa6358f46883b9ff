//! Team model.
//!
//! A team is one or two participants entered in a category. Bracket slots
//! whose occupant is decided by an earlier match hold an `Unresolved` team.

use serde::{Deserialize, Serialize};

use super::Participant;
use crate::error::{Result, ScheduleError};

/// A team occupying one side of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Team {
    /// One participant (singles).
    Single {
        category: String,
        player: Participant,
    },
    /// Two participants (doubles).
    Double {
        category: String,
        players: [Participant; 2],
    },
    /// Bracket slot whose occupant is not known yet.
    Unresolved { category: String },
}

impl Team {
    /// Creates a single or double team from its participants.
    ///
    /// Fails with `InvalidTeamSize` for zero or more than two participants.
    pub fn new(category: impl Into<String>, participants: Vec<Participant>) -> Result<Self> {
        let category = category.into();
        let size = participants.len();
        let mut players = participants.into_iter();
        match (players.next(), players.next(), size) {
            (Some(player), None, 1) => Ok(Self::Single { category, player }),
            (Some(first), Some(second), 2) => Ok(Self::Double {
                category,
                players: [first, second],
            }),
            _ => Err(ScheduleError::InvalidTeamSize { category, size }),
        }
    }

    /// Creates a singles team.
    pub fn single(category: impl Into<String>, player: Participant) -> Self {
        Self::Single {
            category: category.into(),
            player,
        }
    }

    /// Creates a doubles team.
    pub fn double(category: impl Into<String>, first: Participant, second: Participant) -> Self {
        Self::Double {
            category: category.into(),
            players: [first, second],
        }
    }

    /// Creates a placeholder for a slot decided by an earlier match.
    pub fn unresolved(category: impl Into<String>) -> Self {
        Self::Unresolved {
            category: category.into(),
        }
    }

    /// Category this team is entered in.
    pub fn category(&self) -> &str {
        match self {
            Self::Single { category, .. }
            | Self::Double { category, .. }
            | Self::Unresolved { category } => category,
        }
    }

    /// Participants in entry order (empty for unresolved slots).
    pub fn participants(&self) -> &[Participant] {
        match self {
            Self::Single { player, .. } => std::slice::from_ref(player),
            Self::Double { players, .. } => &players[..],
            Self::Unresolved { .. } => &[],
        }
    }

    /// Whether the slot's occupant is known.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved { .. })
    }

    /// Display name: `"Ana"` or `"Ana / Bia"`. `None` when unresolved.
    pub fn name(&self) -> Option<String> {
        match self {
            Self::Single { player, .. } => Some(player.name.clone()),
            Self::Double { players, .. } => {
                Some(format!("{} / {}", players[0].name, players[1].name))
            }
            Self::Unresolved { .. } => None,
        }
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.category() == other.category()
            && self.is_resolved() == other.is_resolved()
            && self.participants() == other.participants()
    }
}

impl Eq for Team {}
