//! Search and status filtering over an already-fetched roster.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ComplianceStatus, PatientSummary, UnknownStatus};

/// Select value meaning "no status filter".
pub const ALL_STATUSES: &str = "all";

/// Status dropdown selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ComplianceStatus),
}

impl StatusFilter {
    /// Dropdown options as (value, label) pairs.
    pub const OPTIONS: [(StatusFilter, &'static str); 4] = [
        (StatusFilter::All, "All Statuses"),
        (StatusFilter::Only(ComplianceStatus::GoalMet), "Goal Met"),
        (StatusFilter::Only(ComplianceStatus::MissedPreventiveCheckup), "Missed Checkup"),
        (StatusFilter::Only(ComplianceStatus::Pending), "Pending"),
    ];

    /// Exact match against the raw wire label. An absent status never
    /// matches, not even `Only(Pending)`.
    pub fn accepts(&self, patient: &PatientSummary) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => {
                patient.compliance_status.as_deref() == Some(status.as_str())
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, StatusFilter::All)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL_STATUSES),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_STATUSES {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Derive the visible roster from the full roster and the two filter inputs.
///
/// Pure: the result depends only on the arguments, keeps the roster's order,
/// and is always a subset of `roster`.
pub fn apply_filters(
    roster: &[PatientSummary],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<PatientSummary> {
    let needle = search_term.to_lowercase();

    roster
        .iter()
        .filter(|p| search_term.is_empty() || p.matches_search(&needle))
        .filter(|p| status_filter.accepts(p))
        .cloned()
        .collect()
}
