//! Domain models for the provider dashboard.

mod overview;
mod patient;

pub use overview::*;
pub use patient::*;
