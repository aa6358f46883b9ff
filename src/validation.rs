//! Structural validation of tournaments.
//!
//! Checks the integrity of a tournament before scheduling. Detects:
//! - Unusable settings
//! - Duplicate categories
//! - One participant id used under different names
//! - Groups referencing unknown matches, or matches and teams of another
//!   category
//! - Dependencies on unknown matches, or on matches of a later round
//! - Circular dependencies (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::{MatchArena, MatchId, Tournament};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Settings cannot produce a schedule.
    InvalidSetting,
    /// Two groups share a category name.
    DuplicateCategory,
    /// One participant id carries two different names.
    ConflictingParticipant,
    /// A group lists a match id that is not in the arena.
    InvalidMatchReference,
    /// A match or team sits in a group of another category.
    CategoryMismatch,
    /// A match depends on a match id that is not in the arena.
    InvalidDependency,
    /// A match depends on a match of the same or a later round.
    RoundOrder,
    /// Dependency graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a tournament.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tournament(tournament: &Tournament) -> ValidationResult {
    let mut errors = Vec::new();
    let arena = tournament.arena();

    if let Err(e) = tournament.settings().validate() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSetting,
            e.to_string(),
        ));
    }

    let mut categories = HashSet::new();
    for group in tournament.groups() {
        if !categories.insert(group.category.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCategory,
                format!("Duplicate category: {}", group.category),
            ));
        }

        for team in &group.teams {
            if team.category() != group.category {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CategoryMismatch,
                    format!(
                        "Team of category '{}' listed in group '{}'",
                        team.category(),
                        group.category
                    ),
                ));
            }
        }

        for id in group.all_matches() {
            match arena.get(id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMatchReference,
                    format!("Group '{}' references unknown match {id}", group.category),
                )),
                Some(m) if m.category != group.category => errors.push(ValidationError::new(
                    ValidationErrorKind::CategoryMismatch,
                    format!(
                        "Match {id} of category '{}' listed in group '{}'",
                        m.category, group.category
                    ),
                )),
                Some(_) => {}
            }
        }
    }

    // Participant identity: same id, same name
    let mut names: HashMap<u32, &str> = HashMap::new();
    let mut reported = HashSet::new();
    let teams = tournament.groups().iter().flat_map(|g| &g.teams);
    let players = teams
        .flat_map(|t| t.participants())
        .chain(arena.iter().flat_map(|m| m.participants()));
    for p in players {
        let known = *names.entry(p.id).or_insert(p.name.as_str());
        if known != p.name && reported.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingParticipant,
                format!("Participant {} is named both '{known}' and '{}'", p.id, p.name),
            ));
        }
    }

    for m in arena.iter() {
        for &dep in &m.depends_on {
            match arena.get(dep) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDependency,
                    format!("Match {} depends on unknown match {dep}", m.id),
                )),
                Some(d) if d.round >= m.round => errors.push(ValidationError::new(
                    ValidationErrorKind::RoundOrder,
                    format!(
                        "Match {} (round {}) depends on {dep} (round {})",
                        m.id, m.round, d.round
                    ),
                )),
                Some(_) => {}
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(arena) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(arena: &MatchArena) -> Option<ValidationError> {
    let adj: HashMap<MatchId, &[MatchId]> = arena
        .iter()
        .map(|m| (m.id, m.depends_on.as_slice()))
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for m in arena.iter() {
        if !visited.contains(&m.id) && has_cycle_dfs(m.id, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving match {}", m.id),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: MatchId,
    adj: &HashMap<MatchId, &[MatchId]>,
    visited: &mut HashSet<MatchId>,
    in_stack: &mut HashSet<MatchId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors.iter() {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Participant, Setting, Team, TournamentDay};

    fn settings() -> Setting {
        Setting::new(
            60,
            30,
            1,
            vec![TournamentDay::new("2024-05-04", 9, 20).unwrap()],
        )
        .unwrap()
    }

    fn single(category: &str, id: u32, name: &str) -> Team {
        Team::single(category, Participant::new(id, name))
    }

    /// Two opening matches and a final.
    fn valid() -> Tournament {
        let mut arena = MatchArena::new();
        let teams = vec![
            single("ms", 1, "Ann"),
            single("ms", 2, "Bob"),
            single("ms", 3, "Cid"),
            single("ms", 4, "Dan"),
        ];
        let a = arena.add_playable("ms", teams[0].clone(), teams[1].clone(), 0, vec![]);
        let b = arena.add_playable("ms", teams[2].clone(), teams[3].clone(), 0, vec![]);
        let f = placeholder(&mut arena, 1, vec![a, b]);
        let group = Group::new("ms", teams, vec![a, b], vec![f]);
        Tournament::new(settings(), vec![group], arena)
    }

    fn placeholder(arena: &mut MatchArena, round: u32, depends_on: Vec<MatchId>) -> MatchId {
        arena.add_playable(
            "ms",
            Team::unresolved("ms"),
            Team::unresolved("ms"),
            round,
            depends_on,
        )
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_valid_tournament() {
        assert!(validate_tournament(&valid()).is_ok());
    }

    #[test]
    fn test_duplicate_category() {
        let t = valid();
        let mut groups = t.groups().to_vec();
        groups.push(Group::new("ms", vec![], vec![], vec![]));
        let t = Tournament::new(t.settings().clone(), groups, t.arena().clone());

        let errors = validate_tournament(&t).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateCategory]);
    }

    #[test]
    fn test_conflicting_participant() {
        let mut arena = MatchArena::new();
        let teams = vec![single("ms", 1, "Ann"), single("ms", 1, "Eve")];
        let m = arena.add_playable("ms", teams[0].clone(), teams[1].clone(), 0, vec![]);
        let t = Tournament::new(settings(), vec![Group::new("ms", teams, vec![m], vec![])], arena);

        let errors = validate_tournament(&t).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::ConflictingParticipant]);
        assert!(errors[0].message.contains("Eve"));
    }

    #[test]
    fn test_unknown_references() {
        let mut arena = MatchArena::new();
        let m = arena.add_playable(
            "ms",
            single("ms", 1, "Ann"),
            single("ms", 2, "Bob"),
            1,
            vec![MatchId(9)],
        );
        let group = Group::new("ms", vec![], vec![m, MatchId(7)], vec![]);
        let t = Tournament::new(settings(), vec![group], arena);

        let errors = validate_tournament(&t).unwrap_err();
        let kinds = kinds(&errors);
        assert!(kinds.contains(&ValidationErrorKind::InvalidMatchReference));
        assert!(kinds.contains(&ValidationErrorKind::InvalidDependency));
    }

    #[test]
    fn test_category_mismatch() {
        let mut arena = MatchArena::new();
        let m = arena.add_playable("ws", single("ws", 1, "Ann"), single("ws", 2, "Bob"), 0, vec![]);
        let group = Group::new("ms", vec![single("ws", 1, "Ann")], vec![m], vec![]);
        let t = Tournament::new(settings(), vec![group], arena);

        let errors = validate_tournament(&t).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::CategoryMismatch,
                ValidationErrorKind::CategoryMismatch
            ]
        );
    }

    #[test]
    fn test_round_order() {
        let mut arena = MatchArena::new();
        let a = arena.add_playable(
            "ms",
            single("ms", 1, "Ann"),
            single("ms", 2, "Bob"),
            1,
            vec![],
        );
        let f = placeholder(&mut arena, 1, vec![a]);
        let group = Group::new("ms", vec![], vec![a], vec![f]);
        let t = Tournament::new(settings(), vec![group], arena);

        let errors = validate_tournament(&t).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::RoundOrder]);
    }

    #[test]
    fn test_cyclic_dependency() {
        // M0 → M1 → M0
        let mut arena = MatchArena::new();
        placeholder(&mut arena, 1, vec![MatchId(1)]);
        placeholder(&mut arena, 2, vec![MatchId(0)]);
        let group = Group::new("ms", vec![], vec![MatchId(0), MatchId(1)], vec![]);
        let t = Tournament::new(settings(), vec![group], arena);

        let errors = validate_tournament(&t).unwrap_err();
        let kinds = kinds(&errors);
        assert!(kinds.contains(&ValidationErrorKind::CyclicDependency));
        assert!(kinds.contains(&ValidationErrorKind::RoundOrder));
    }

    #[test]
    fn test_invalid_setting() {
        let t = valid();
        let mut broken = t.settings().clone();
        broken.match_time = 0;
        let t = Tournament::new(broken, t.groups().to_vec(), t.arena().clone());

        let errors = validate_tournament(&t).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvalidSetting]);
    }

    #[test]
    fn test_multiple_errors() {
        let mut arena = MatchArena::new();
        arena.add_playable(
            "ms",
            single("ms", 1, "Ann"),
            single("ms", 1, "Eve"),
            0,
            vec![MatchId(5)],
        );
        let groups = vec![
            Group::new("ms", vec![], vec![MatchId(0)], vec![]),
            Group::new("ms", vec![], vec![], vec![]),
        ];
        let t = Tournament::new(settings(), groups, arena);

        let errors = validate_tournament(&t).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
