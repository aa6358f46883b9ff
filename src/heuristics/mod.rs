//! Search heuristics: variable ordering, domain filtering, lookahead.
//!
//! The solver asks an ordering strategy which unassigned variable to bind
//! next, and a filtering strategy to narrow the domains of the remaining
//! variables after each binding (forward checking). A lookahead strategy
//! may veto a state before the search descends into it.
//!
//! Heuristics never change which assignments are valid, only how quickly
//! the search reaches them.

mod filtering;
mod ordering;

pub use filtering::NoOverlap;
pub use ordering::{MultipleMatchesParticipant, Preference};

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::constraints::Assignment;

/// Chooses the order in which unassigned variables are bound.
pub trait VariableOrdering<V>: Debug {
    /// Strategy name.
    fn name(&self) -> &'static str;

    /// Returns `unassigned` sorted most-constrained first.
    fn order(&self, unassigned: &[V]) -> Vec<V>;
}

/// Narrows a variable's candidate values against a partial assignment.
pub trait DomainFilter<V, T>: Debug {
    /// Strategy name.
    fn name(&self) -> &'static str;

    /// Candidates of `variable` still compatible with `assignment`.
    fn filter(&self, variable: V, domain: &[T], assignment: &Assignment<V, T>) -> Vec<T>;
}

/// Vetoes a partial state by looking at the remaining domains.
pub trait Lookahead<V, T>: Debug {
    /// Strategy name.
    fn name(&self) -> &'static str;

    /// Whether the search should continue below this state.
    fn is_viable(&self, assignment: &Assignment<V, T>, domains: &DomainView<'_, V, T>) -> bool;
}

/// Read-only view of the current candidate domains.
#[derive(Debug)]
pub struct DomainView<'a, V, T> {
    variables: &'a [V],
    index: &'a HashMap<V, usize>,
    domains: &'a [Vec<T>],
}

impl<'a, V: Copy + Eq + Hash, T> DomainView<'a, V, T> {
    pub(crate) fn new(
        variables: &'a [V],
        index: &'a HashMap<V, usize>,
        domains: &'a [Vec<T>],
    ) -> Self {
        Self {
            variables,
            index,
            domains,
        }
    }

    /// Current candidates of `variable`.
    pub fn get(&self, variable: &V) -> Option<&'a [T]> {
        let domains = self.domains;
        self.index
            .get(variable)
            .and_then(|&i| domains.get(i))
            .map(Vec::as_slice)
    }

    /// Every variable with its candidates, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (V, &'a [T])> + '_ {
        self.variables
            .iter()
            .copied()
            .zip(self.domains.iter().map(Vec::as_slice))
    }
}
