//! Presentation helpers shared by every frontend.

mod badge;
mod format;

pub use badge::*;
pub use format::*;
