//! Bracket assembly.
//!
//! Turns a category's teams into a single-elimination bracket:
//!
//! 1. optionally shuffle the entrants with a seeded [`Draw`],
//! 2. pair them into the opening round with [`opening_round`] (an odd team
//!    out gets a bye),
//! 3. let [`SingleElimination`] add the placeholder matches for every later
//!    round, each depending on the two matches whose winners meet in it.
//!
//! # Reference
//! Knuth (1998), "The Art of Computer Programming, Vol. 3", §5.4.1
//! (tournament trees)

mod draw;
mod elimination;

pub use draw::Draw;
pub use elimination::{opening_round, SingleElimination};
