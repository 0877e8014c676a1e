//! Dashboard view state.
//!
//! Each view owns its state exclusively and receives the collaborator,
//! navigator and session at construction.

mod detail;
mod list;
mod schedule;

pub use detail::*;
pub use list::*;
pub use schedule::ScheduledCallback;
