//! Per-patient overview models (profile, goals, statistics, recent logs).

use serde::{Deserialize, Deserializer, Serialize};

use super::patient::{lenient_id, ComplianceStatus, PatientSummary};

/// Everything the overview page shows for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetail {
    pub profile: PatientProfile,
    pub goals: WellnessGoals,
    pub statistics: WellnessStatistics,
    #[serde(default)]
    pub recent_logs: Vec<LogEntry>,
}

impl PatientDetail {
    /// Initial value for the editable compliance field.
    pub fn initial_status(&self) -> ComplianceStatus {
        self.profile.summary.compliance()
    }
}

/// Roster fields plus medical notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    #[serde(flatten)]
    pub summary: PatientSummary,
    /// Free-text allergies
    #[serde(default)]
    pub allergies: Option<String>,
    /// Free-text current medications
    #[serde(default)]
    pub current_medications: Option<String>,
}

/// Daily targets set for the patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WellnessGoals {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub steps_goal: f64,
    /// Litres
    #[serde(default, deserialize_with = "lenient_f64")]
    pub water_goal: f64,
    /// Hours
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_goal: f64,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_f64")]
    pub active_time_goal: f64,
}

/// Aggregates computed server-side over the patient's logs.
///
/// The dashboard never recomputes these, it only formats them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WellnessStatistics {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_steps: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_water: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_sleep: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_active: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub goals_met_percentage: f64,
    #[serde(default)]
    pub total_logs: u64,
}

/// A single daily wellness log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(rename = "_id", alias = "id", deserialize_with = "lenient_id")]
    pub id: String,
    /// ISO-8601 date or timestamp, as sent by the server
    pub date: String,
    #[serde(default)]
    pub steps: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub water_litres: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sleep_hours: f64,
    #[serde(default)]
    pub goals_met: bool,
}

/// Accept numbers, numeric strings (servers often send `toFixed` output) and null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Raw::Null => Ok(0.0),
    }
}
