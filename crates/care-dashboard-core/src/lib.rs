//! Care Dashboard Core Library
//!
//! Pure domain layer for the provider-facing patient dashboard.
//!
//! # Architecture
//!
//! ```text
//! get_patients ──► roster ──┬──► apply_filters(roster, search, status) ──► visible rows
//!                           │
//!                           └──► compute_summary(roster) ──► headline cards
//!
//! get_patient_overview(id) ──► PatientDetail ──► display::stat_cards / LogLine
//! ```
//!
//! # Core Principle
//!
//! **Derived views are never mutated.** The filtered roster and the summary
//! counters are recomputed from the last-fetched roster on every input change.
//!
//! # Modules
//!
//! - [`models`]: Wire types (PatientSummary, PatientDetail, ComplianceStatus, etc.)
//! - [`roster`]: Search/status filtering and summary counters
//! - [`display`]: Status badges, statistic and date formatting

pub mod display;
pub mod models;
pub mod roster;

// Re-export commonly used types
pub use display::{status_badge, Badge, LogLine, StatCard, Tone};
pub use models::{
    ComplianceStatus, LogEntry, PatientDetail, PatientProfile, PatientSummary, WellnessGoals,
    WellnessStatistics,
};
pub use roster::{apply_filters, compute_summary, RosterSummary, StatusFilter};
