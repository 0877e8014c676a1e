//! Patient roster models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Wire label for a met goal.
pub const GOAL_MET: &str = "Goal Met";
/// Wire label for a missed preventive checkup.
pub const MISSED_PREVENTIVE_CHECKUP: &str = "Missed Preventive Checkup";
/// Wire label for a pending review.
pub const PENDING: &str = "Pending";

/// Returned when a string is not one of the known compliance labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown compliance status: {0}")]
pub struct UnknownStatus(pub String);

/// Preventive-care compliance status a provider assigns to a patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ComplianceStatus {
    #[serde(rename = "Goal Met")]
    GoalMet,
    #[serde(rename = "Missed Preventive Checkup")]
    MissedPreventiveCheckup,
    #[default]
    #[serde(rename = "Pending")]
    Pending,
}

impl ComplianceStatus {
    /// All statuses in the order the update widget offers them.
    pub const ALL: [ComplianceStatus; 3] = [
        ComplianceStatus::GoalMet,
        ComplianceStatus::MissedPreventiveCheckup,
        ComplianceStatus::Pending,
    ];

    /// The exact label exchanged with the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::GoalMet => GOAL_MET,
            ComplianceStatus::MissedPreventiveCheckup => MISSED_PREVENTIVE_CHECKUP,
            ComplianceStatus::Pending => PENDING,
        }
    }

    /// Lenient parse: absent or unrecognized values become `Pending`.
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GOAL_MET => Ok(ComplianceStatus::GoalMet),
            MISSED_PREVENTIVE_CHECKUP => Ok(ComplianceStatus::MissedPreventiveCheckup),
            PENDING => Ok(ComplianceStatus::Pending),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One row of a provider's roster.
///
/// `compliance_status` keeps the server's raw label: filtering and the
/// summary counters compare it exactly, while presentation falls back to
/// `Pending` for anything unrecognized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// Server-assigned identifier
    #[serde(rename = "_id", alias = "id", deserialize_with = "lenient_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Daily step target
    #[serde(default)]
    pub steps_goal: Option<u64>,
    /// Raw compliance label, absent until a provider sets one
    #[serde(default)]
    pub compliance_status: Option<String>,
}

impl PatientSummary {
    /// Create a roster entry with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            age: None,
            steps_goal: None,
            compliance_status: None,
        }
    }

    /// Builder-style setter for the raw compliance label.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.compliance_status = Some(status.into());
        self
    }

    /// Status with the `Pending` fallback applied.
    pub fn compliance(&self) -> ComplianceStatus {
        ComplianceStatus::from_wire(self.compliance_status.as_deref())
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}

/// Accept string or integer ids; integers are kept in decimal form.
pub(super) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}
