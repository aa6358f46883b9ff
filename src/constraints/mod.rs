//! Constraint network for court scheduling.
//!
//! Every constraint is a predicate over a (possibly partial) assignment of
//! variables to values. A constraint only rejects a state once *all* of its
//! variables are bound; while any is unassigned it is vacuously satisfied.
//! This lets the solver assign variables one at a time without premature
//! failure.
//!
//! # Tournament constraints
//!
//! | Constraint | Variables | Rule |
//! |------------|-----------|------|
//! | [`AllDifferent`] | all playable matches | timeslots pairwise distinct |
//! | [`NoOverlapping`] | all playable matches | per court, match intervals disjoint |
//! | [`MatchConstraint`] | target + one playable ancestor | ancestor strictly earlier |
//! | [`NextRoundConstraint`] | target + one direct dependency | gap ≥ match + break time |
//! | [`MultiCategoryConstraint`] | two matches sharing a multi-category player | gap ≥ match + break time |

mod global;
mod precedence;
mod rest;

pub use global::{AllDifferent, NoOverlapping};
pub use precedence::{MatchConstraint, NextRoundConstraint};
pub use rest::MultiCategoryConstraint;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A hard constraint over solver variables.
///
/// Implementations must be pure: they may read the assignment and their own
/// data, nothing else.
pub trait Constraint<V, T>: Debug {
    /// Short constraint name, used in logs and violation reports.
    fn name(&self) -> &'static str;

    /// Variables this constraint ranges over.
    fn variables(&self) -> &[V];

    /// Whether the assignment satisfies the constraint.
    ///
    /// Must return `true` while any of [`Self::variables`] is unassigned.
    fn is_satisfied(&self, assignment: &Assignment<V, T>) -> bool;
}

/// A partial or complete mapping from variables to values.
#[derive(Debug, Clone)]
pub struct Assignment<V, T> {
    values: HashMap<V, T>,
}

impl<V: Eq + Hash, T: PartialEq> PartialEq for Assignment<V, T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V, T> Default for Assignment<V, T> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<V: Copy + Eq + Hash, T> Assignment<V, T> {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `variable`, if any.
    #[inline]
    pub fn get(&self, variable: &V) -> Option<&T> {
        self.values.get(variable)
    }

    /// Whether `variable` is bound.
    #[inline]
    pub fn is_assigned(&self, variable: &V) -> bool {
        self.values.contains_key(variable)
    }

    /// Binds `variable`, returning its previous value.
    pub fn assign(&mut self, variable: V, value: T) -> Option<T> {
        self.values.insert(variable, value)
    }

    /// Unbinds `variable`, returning its value.
    pub fn unassign(&mut self, variable: &V) -> Option<T> {
        self.values.remove(variable)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound (variable, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &T)> {
        self.values.iter()
    }

    /// Values of `variables` in order, or `None` if any is unbound.
    pub fn values_of(&self, variables: &[V]) -> Option<Vec<&T>> {
        variables.iter().map(|v| self.values.get(v)).collect()
    }

    /// Consumes the assignment into its map.
    pub fn into_inner(self) -> HashMap<V, T> {
        self.values
    }
}

impl<V: Copy + Eq + Hash, T> FromIterator<(V, T)> for Assignment<V, T> {
    fn from_iter<I: IntoIterator<Item = (V, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_basics() {
        let mut a: Assignment<u32, &str> = Assignment::new();
        assert!(a.is_empty());
        assert_eq!(a.assign(1, "x"), None);
        assert_eq!(a.assign(1, "y"), Some("x"));
        assert!(a.is_assigned(&1));
        assert_eq!(a.len(), 1);
        assert_eq!(a.unassign(&1), Some("y"));
        assert!(!a.is_assigned(&1));
    }

    #[test]
    fn test_values_of_requires_all() {
        let a: Assignment<u32, i32> = [(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(a.values_of(&[1, 2]), Some(vec![&10, &20]));
        assert_eq!(a.values_of(&[1, 3]), None);
        assert_eq!(a.values_of(&[]), Some(vec![]));
    }
}
