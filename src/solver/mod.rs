//! Backtracking constraint-satisfaction solver.
//!
//! Variables with finite domains, constraints over them, an optional
//! ordering, filtering and lookahead strategy, and a cap on the number of
//! solutions to collect.
//!
//! # State machine
//!
//! The search runs over "current depth" with an explicit stack instead of
//! recursion, so bracket size never hits a call-depth limit:
//!
//! - **advance**: bind the top frame's next candidate, check every
//!   constraint touching the variable, narrow the remaining domains, then
//!   push a frame for the next variable.
//! - **retreat**: when a frame runs out of candidates, pop it and resume the
//!   frame below with its next candidate.
//!
//! Depth N (all variables bound, all constraints satisfied) records a
//! solution. An empty stack means the space is exhausted. Reaching
//! `max_solutions` or the time limit simply stops iterating.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

mod statistics;

pub use statistics::{SolveOutcome, SolverStatistics};

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::constraints::{Assignment, Constraint};
use crate::error::{Result, ScheduleError};
use crate::heuristics::{DomainFilter, DomainView, Lookahead, VariableOrdering};

/// One level of the search stack.
struct Frame<T> {
    /// Index of the variable bound at this depth.
    variable: usize,
    /// Candidates for the variable, in domain order.
    candidates: Vec<T>,
    /// Next candidate to try.
    next: usize,
    /// Domains in effect when this variable was chosen.
    domains: Rc<Vec<Vec<T>>>,
}

/// Depth-first backtracking solver.
///
/// # Example
/// ```
/// use court_schedule::constraints::{Assignment, Constraint};
/// use court_schedule::solver::BacktrackingSolver;
///
/// #[derive(Debug)]
/// struct Different([u8; 2]);
///
/// impl Constraint<u8, u8> for Different {
///     fn name(&self) -> &'static str { "different" }
///     fn variables(&self) -> &[u8] { &self.0 }
///     fn is_satisfied(&self, a: &Assignment<u8, u8>) -> bool {
///         match (a.get(&self.0[0]), a.get(&self.0[1])) {
///             (Some(x), Some(y)) => x != y,
///             _ => true,
///         }
///     }
/// }
///
/// let mut solver: BacktrackingSolver<u8, u8> = BacktrackingSolver::new();
/// solver.add_variable(0, vec![1, 2]);
/// solver.add_variable(1, vec![1, 2]);
/// solver.add_constraint(Different([0, 1])).unwrap();
/// solver.set_max_solutions(10);
///
/// let solutions = solver.solve();
/// assert_eq!(solutions.len(), 2);
/// assert_eq!(solutions[0].get(&0), Some(&1));
/// ```
pub struct BacktrackingSolver<V, T> {
    variables: Vec<V>,
    index: HashMap<V, usize>,
    domains: Vec<Vec<T>>,
    constraints: Vec<Box<dyn Constraint<V, T>>>,
    constraints_by_var: Vec<Vec<usize>>,
    ordering: Option<Box<dyn VariableOrdering<V>>>,
    filtering: Option<Box<dyn DomainFilter<V, T>>>,
    lookahead: Option<Box<dyn Lookahead<V, T>>>,
    max_solutions: usize,
    time_limit: Option<Duration>,
    statistics: SolverStatistics,
}

impl<V, T> BacktrackingSolver<V, T>
where
    V: Copy + Eq + Hash + Debug,
    T: Clone + Debug,
{
    /// Creates an empty solver collecting one solution.
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            index: HashMap::new(),
            domains: Vec::new(),
            constraints: Vec::new(),
            constraints_by_var: Vec::new(),
            ordering: None,
            filtering: None,
            lookahead: None,
            max_solutions: 1,
            time_limit: None,
            statistics: SolverStatistics::default(),
        }
    }

    /// Registers a variable with its candidate values.
    ///
    /// Registering a variable again replaces its domain and keeps its
    /// position in the input order.
    pub fn add_variable(&mut self, variable: V, domain: Vec<T>) {
        if let Some(&i) = self.index.get(&variable) {
            self.domains[i] = domain;
            return;
        }
        self.index.insert(variable, self.variables.len());
        self.variables.push(variable);
        self.domains.push(domain);
        self.constraints_by_var.push(Vec::new());
    }

    /// Registers a constraint.
    ///
    /// Fails with [`ScheduleError::UnknownVariable`] if it references a
    /// variable that was never added.
    pub fn add_constraint<C>(&mut self, constraint: C) -> Result<()>
    where
        C: Constraint<V, T> + 'static,
    {
        self.add_boxed_constraint(Box::new(constraint))
    }

    /// Registers an already boxed constraint.
    pub fn add_boxed_constraint(&mut self, constraint: Box<dyn Constraint<V, T>>) -> Result<()> {
        let mut positions = Vec::with_capacity(constraint.variables().len());
        for variable in constraint.variables() {
            let Some(&i) = self.index.get(variable) else {
                return Err(ScheduleError::UnknownVariable {
                    constraint: constraint.name(),
                    variable: format!("{variable:?}"),
                });
            };
            positions.push(i);
        }

        let idx = self.constraints.len();
        positions.sort_unstable();
        positions.dedup();
        for i in positions {
            self.constraints_by_var[i].push(idx);
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Sets the variable ordering strategy. Input order is used without one.
    pub fn add_ordering<O>(&mut self, ordering: O)
    where
        O: VariableOrdering<V> + 'static,
    {
        self.ordering = Some(Box::new(ordering));
    }

    /// Sets the domain filtering (forward checking) strategy.
    pub fn add_filtering<F>(&mut self, filtering: F)
    where
        F: DomainFilter<V, T> + 'static,
    {
        self.filtering = Some(Box::new(filtering));
    }

    /// Sets a lookahead strategy.
    pub fn add_lookahead<L>(&mut self, lookahead: L)
    where
        L: Lookahead<V, T> + 'static,
    {
        self.lookahead = Some(Box::new(lookahead));
    }

    /// Caps the number of solutions collected. Zero is raised to one.
    pub fn set_max_solutions(&mut self, max_solutions: usize) {
        self.max_solutions = max_solutions.max(1);
    }

    /// Stops the search once `limit` has elapsed.
    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    /// Solution cap in effect.
    pub fn max_solutions(&self) -> usize {
        self.max_solutions
    }

    /// Registered variables in input order.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    /// Number of registered constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Statistics of the last `solve()` call.
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Runs the search and returns up to `max_solutions` complete
    /// assignments in discovery order.
    ///
    /// An empty result means no assignment satisfies every constraint.
    pub fn solve(&mut self) -> Vec<Assignment<V, T>> {
        let started = Instant::now();
        self.statistics = SolverStatistics::default();

        info!(
            event = "solve_start",
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            max_solutions = self.max_solutions,
            ordering = self.ordering.as_ref().map(|o| o.name()),
            filtering = self.filtering.as_ref().map(|f| f.name()),
        );

        let mut solutions = Vec::new();
        let outcome = self.search(&mut solutions, started);

        self.statistics.solutions = solutions.len();
        self.statistics.elapsed = started.elapsed();
        self.statistics.outcome = outcome;

        info!(
            event = "solve_end",
            outcome = ?outcome,
            solutions = solutions.len(),
            nodes = self.statistics.nodes,
            backtracks = self.statistics.backtracks,
            duration_ms = self.statistics.elapsed.as_millis() as u64,
        );

        solutions
    }

    fn search(&mut self, solutions: &mut Vec<Assignment<V, T>>, started: Instant) -> SolveOutcome {
        let mut assignment = Assignment::new();

        // Constraints over no variable are decided up front.
        if self
            .constraints
            .iter()
            .any(|c| c.variables().is_empty() && !c.is_satisfied(&assignment))
        {
            return SolveOutcome::Exhausted;
        }

        let Some(first) = self.select_variable(&assignment) else {
            solutions.push(assignment);
            return if self.max_solutions == 1 {
                SolveOutcome::SolutionLimit
            } else {
                SolveOutcome::Exhausted
            };
        };

        let domains = Rc::new(self.domains.clone());
        let mut stack = vec![Frame {
            variable: first,
            candidates: domains[first].clone(),
            next: 0,
            domains,
        }];

        while let Some(frame) = stack.last_mut() {
            let variable = self.variables[frame.variable];
            assignment.unassign(&variable);

            let Some(value) = frame.candidates.get(frame.next).cloned() else {
                // retreat
                stack.pop();
                self.statistics.backtracks += 1;
                continue;
            };
            frame.next += 1;

            if let Some(limit) = self.time_limit {
                if started.elapsed() >= limit {
                    warn!(
                        event = "time_limit",
                        limit_ms = limit.as_millis() as u64,
                        solutions = solutions.len(),
                    );
                    return SolveOutcome::TimedOut;
                }
            }

            // advance
            self.statistics.nodes += 1;
            assignment.assign(variable, value);

            if !self.is_consistent(frame.variable, &assignment) {
                self.statistics.rejected += 1;
                continue;
            }

            let Some(domains) = self.narrow(&frame.domains, &assignment) else {
                self.statistics.wiped_out += 1;
                continue;
            };

            if let Some(lookahead) = &self.lookahead {
                let view = DomainView::new(&self.variables, &self.index, &domains);
                if !lookahead.is_viable(&assignment, &view) {
                    self.statistics.vetoed += 1;
                    continue;
                }
            }

            match self.select_variable(&assignment) {
                None => {
                    solutions.push(assignment.clone());
                    debug!(
                        event = "solution_found",
                        index = solutions.len(),
                        nodes = self.statistics.nodes,
                    );
                    if solutions.len() >= self.max_solutions {
                        return SolveOutcome::SolutionLimit;
                    }
                }
                Some(next) => {
                    let candidates = domains[next].clone();
                    stack.push(Frame {
                        variable: next,
                        candidates,
                        next: 0,
                        domains,
                    });
                }
            }
        }

        SolveOutcome::Exhausted
    }

    /// Checks every constraint that mentions the variable at `position`.
    fn is_consistent(&self, position: usize, assignment: &Assignment<V, T>) -> bool {
        self.constraints_by_var[position]
            .iter()
            .all(|&c| self.constraints[c].is_satisfied(assignment))
    }

    /// Narrows the domains of unassigned variables.
    ///
    /// Returns `None` when some domain becomes empty. Domains of assigned
    /// variables are left as they were.
    fn narrow(
        &self,
        domains: &Rc<Vec<Vec<T>>>,
        assignment: &Assignment<V, T>,
    ) -> Option<Rc<Vec<Vec<T>>>> {
        let Some(filter) = &self.filtering else {
            return Some(Rc::clone(domains));
        };

        let mut narrowed = Vec::with_capacity(domains.len());
        for (variable, domain) in self.variables.iter().zip(domains.iter()) {
            if assignment.is_assigned(variable) {
                narrowed.push(domain.clone());
                continue;
            }
            let filtered = filter.filter(*variable, domain, assignment);
            if filtered.is_empty() {
                return None;
            }
            narrowed.push(filtered);
        }
        Some(Rc::new(narrowed))
    }

    /// Picks the next unassigned variable, by strategy or input order.
    fn select_variable(&self, assignment: &Assignment<V, T>) -> Option<usize> {
        let unassigned: Vec<V> = self
            .variables
            .iter()
            .filter(|v| !assignment.is_assigned(v))
            .copied()
            .collect();
        let fallback = *unassigned.first()?;

        let chosen = self
            .ordering
            .as_ref()
            .and_then(|o| o.order(&unassigned).first().copied())
            .filter(|v| !assignment.is_assigned(v))
            .unwrap_or(fallback);

        self.index
            .get(&chosen)
            .or_else(|| self.index.get(&fallback))
            .copied()
    }
}

impl<V, T> Default for BacktrackingSolver<V, T>
where
    V: Copy + Eq + Hash + Debug,
    T: Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug, T> Debug for BacktrackingSolver<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktrackingSolver")
            .field("variables", &self.variables)
            .field("constraints", &self.constraints.len())
            .field("max_solutions", &self.max_solutions)
            .field("time_limit", &self.time_limit)
            .finish()
    }
}
