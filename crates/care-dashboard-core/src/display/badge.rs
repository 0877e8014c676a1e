//! Status badge presentation.

use serde::{Deserialize, Serialize};

use crate::models::{ComplianceStatus, PENDING};

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn for_status(status: ComplianceStatus) -> Self {
        match status {
            ComplianceStatus::GoalMet => Tone::Positive,
            ComplianceStatus::MissedPreventiveCheckup => Tone::Negative,
            ComplianceStatus::Pending => Tone::Neutral,
        }
    }
}

/// A rendered status badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    /// Text shown in the badge
    pub label: String,
    pub tone: Tone,
}

/// Build the badge for a raw status label.
///
/// The label is shown verbatim (or "Pending" when absent) while the tone uses
/// the lenient lookup, so an unknown label keeps its text but gets the
/// neutral styling.
pub fn status_badge(raw: Option<&str>) -> Badge {
    let label = match raw {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PENDING.to_string(),
    };

    Badge {
        label,
        tone: Tone::for_status(ComplianceStatus::from_wire(raw)),
    }
}
