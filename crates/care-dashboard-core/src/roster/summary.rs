//! Headline counters for the roster cards.

use serde::{Deserialize, Serialize};

use crate::models::{PatientSummary, GOAL_MET, MISSED_PREVENTIVE_CHECKUP, PENDING};

/// Counts shown on the four dashboard cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub total: usize,
    pub goal_met: usize,
    pub missed: usize,
    pub pending: usize,
}

/// Count the roster by compliance label.
///
/// `goal_met` and `missed` are exact matches. `pending` also counts patients
/// with no status at all or an empty one; unrecognized labels land in no
/// bucket.
pub fn compute_summary(roster: &[PatientSummary]) -> RosterSummary {
    roster.iter().fold(
        RosterSummary {
            total: roster.len(),
            ..RosterSummary::default()
        },
        |mut acc, patient| {
            match patient.compliance_status.as_deref() {
                Some(GOAL_MET) => acc.goal_met += 1,
                Some(MISSED_PREVENTIVE_CHECKUP) => acc.missed += 1,
                Some(PENDING) | Some("") | None => acc.pending += 1,
                Some(_) => {}
            }
            acc
        },
    )
}
