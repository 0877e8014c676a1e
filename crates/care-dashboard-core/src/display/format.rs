//! Value formatting for the overview page.
//!
//! Numbers render the way the dashboard has always shown them: integral
//! values without a decimal point, others in shortest round-trip form.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LogEntry, WellnessGoals, WellnessStatistics};

/// Shown when a log date cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Shown for empty allergy / medication fields.
pub const NONE_REPORTED: &str = "None reported";

// en-IN short month names ("Sept", not "Sep").
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Format a number without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}

/// Step counts are whole numbers.
pub fn format_steps(value: f64) -> String {
    format_number(value.round())
}

pub fn format_litres(value: f64) -> String {
    format!("{}L", format_number(value))
}

pub fn format_hours(value: f64) -> String {
    format!("{}h", format_number(value))
}

pub fn format_minutes(value: f64) -> String {
    format!("{}m", format_number(value))
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// Format a log date as `DD Mon YYYY`.
///
/// Accepts RFC 3339 timestamps (rendered in UTC), naive timestamps and plain
/// `YYYY-MM-DD` dates.
pub fn format_log_date(raw: &str) -> String {
    match parse_log_date(raw.trim()) {
        Some(date) => format!(
            "{:02} {} {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Free-text medical field with the "None reported" fallback.
pub fn or_none_reported(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => NONE_REPORTED,
    }
}

pub fn years_old(age: u32) -> String {
    format!("{} years old", age)
}

/// First character of a name, for the avatar.
pub fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

/// One statistics card: headline value plus caption.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub caption: String,
}

/// The five cards of the overview page, in display order.
pub fn stat_cards(goals: &WellnessGoals, stats: &WellnessStatistics) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Avg Steps",
            value: format_steps(stats.avg_steps),
            caption: format!("Goal: {}", format_steps(goals.steps_goal)),
        },
        StatCard {
            label: "Avg Water",
            value: format_litres(stats.avg_water),
            caption: format!("Goal: {}", format_litres(goals.water_goal)),
        },
        StatCard {
            label: "Avg Sleep",
            value: format_hours(stats.avg_sleep),
            caption: format!("Goal: {}", format_hours(goals.sleep_goal)),
        },
        StatCard {
            label: "Avg Active",
            value: format_minutes(stats.avg_active),
            caption: format!("Goal: {}", format_minutes(goals.active_time_goal)),
        },
        StatCard {
            label: "Goals Met",
            value: format_percentage(stats.goals_met_percentage),
            caption: format!("{} logs", stats.total_logs),
        },
    ]
}

/// A recent-activity row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogLine {
    pub date: String,
    pub steps: String,
    pub water: String,
    pub sleep: String,
    pub goals_met: bool,
}

impl From<&LogEntry> for LogLine {
    fn from(log: &LogEntry) -> Self {
        Self {
            date: format_log_date(&log.date),
            steps: format!("{} steps", log.steps),
            water: format!("{} water", format_litres(log.water_litres)),
            sleep: format!("{} sleep", format_hours(log.sleep_hours)),
            goals_met: log.goals_met,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_steps_round_to_integer() {
        assert_eq!(format_steps(7421.4), "7421");
        assert_eq!(format_steps(7421.5), "7422");
    }

    #[test]
    fn test_log_date_formats() {
        assert_eq!(format_log_date("2024-03-05T00:00:00.000Z"), "05 Mar 2024");
        assert_eq!(format_log_date("2024-09-17"), "17 Sept 2024");
        assert_eq!(format_log_date("2024-12-01T10:30:00"), "01 Dec 2024");
        assert_eq!(format_log_date("yesterday"), INVALID_DATE);
    }

    #[test]
    fn test_log_date_normalizes_to_utc() {
        assert_eq!(format_log_date("2024-01-01T01:00:00+05:30"), "31 Dec 2023");
    }

    #[test]
    fn test_none_reported() {
        assert_eq!(or_none_reported(None), NONE_REPORTED);
        assert_eq!(or_none_reported(Some("  ")), NONE_REPORTED);
        assert_eq!(or_none_reported(Some("Peanuts")), "Peanuts");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("Ann"), "A");
        assert_eq!(initial(""), "");
    }
}
