//! Roster derivations: the filtered view and the summary counters.
//!
//! Both are pure functions of the last-fetched roster, so the list view
//! recomputes them on every input change instead of mutating them in place.

mod filter;
mod summary;

pub use filter::*;
pub use summary::*;
