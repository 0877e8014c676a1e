//! Plain-text rendering of view state for terminals and logs.

use std::fmt::Write;

use care_dashboard_core::display::{
    initial, or_none_reported, stat_cards, years_old, Badge, LogLine, Tone,
};
use care_dashboard_core::models::ComplianceStatus;

use crate::views::{DetailPhase, PatientDetailView, PatientListView};

pub const NO_RECENT_LOGS: &str = "No recent logs available";

fn badge_text(badge: &Badge) -> String {
    let marker = match badge.tone {
        Tone::Positive => '+',
        Tone::Negative => '!',
        Tone::Neutral => '~',
    };
    format!("[{} {}]", marker, badge.label)
}

/// Render the roster page.
pub fn render_roster(view: &PatientListView) -> String {
    let mut out = String::new();
    let summary = view.summary();

    let _ = writeln!(out, "Provider Dashboard");
    let _ = writeln!(out, "{}", view.greeting());
    let _ = writeln!(out);

    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {} (retry available)", error);
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Total Patients: {}  Goals Met: {}  Missed Checkups: {}  Pending: {}",
        summary.total, summary.goal_met, summary.missed, summary.pending
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.heading());

    if let Some(message) = view.empty_message() {
        let _ = writeln!(out, "  {}", message);
        return out;
    }

    for patient in view.filtered() {
        let _ = writeln!(
            out,
            "  {:<24} {:<28} age {:<4} {:<14} {:>6} steps  {}  -> /provider/patients/{}",
            patient.name,
            patient.email,
            patient.age.map(|a| a.to_string()).unwrap_or_default(),
            patient.phone.as_deref().unwrap_or_default(),
            patient.steps_goal.map(|s| s.to_string()).unwrap_or_default(),
            badge_text(&PatientListView::badge_for(patient)),
            patient.id,
        );
    }

    out
}

/// Render the patient overview page.
pub fn render_overview(view: &PatientDetailView) -> String {
    let mut out = String::new();

    let detail = match view.phase() {
        DetailPhase::Loading => return "Loading patient overview...\n".to_string(),
        DetailPhase::Unavailable(message) => {
            let _ = writeln!(out, "! {}", message);
            let _ = writeln!(out, "Back to Dashboard: /provider/dashboard");
            return out;
        }
        DetailPhase::Ready => match view.detail() {
            Some(detail) => detail,
            None => return out,
        },
    };

    let profile = &detail.profile;
    let summary = &profile.summary;

    let _ = writeln!(out, "({}) {}", initial(&summary.name), summary.name);
    let _ = writeln!(out, "Patient Overview");
    let _ = writeln!(
        out,
        "{} | {} | {}",
        summary.email,
        summary.phone.as_deref().unwrap_or_default(),
        summary.age.map(years_old).unwrap_or_default()
    );
    let _ = writeln!(out);

    for banner in [view.load_error(), view.update_error(), view.refresh_error()]
        .into_iter()
        .flatten()
    {
        let _ = writeln!(out, "! {}", banner);
    }
    if let Some(message) = view.success_message() {
        let _ = writeln!(out, "+ {}", message);
    }

    for card in stat_cards(&detail.goals, &detail.statistics) {
        let _ = writeln!(out, "{:<11} {:>8}   {}", card.label, card.value, card.caption);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Medical Information");
    let _ = writeln!(out, "  Allergies: {}", or_none_reported(profile.allergies.as_deref()));
    let _ = writeln!(
        out,
        "  Current Medications: {}",
        or_none_reported(profile.current_medications.as_deref())
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Recent Activity Logs");
    if detail.recent_logs.is_empty() {
        let _ = writeln!(out, "  {}", NO_RECENT_LOGS);
    }
    for line in detail.recent_logs.iter().map(LogLine::from) {
        let _ = writeln!(
            out,
            "  {:<12} {}  {}  {}{}",
            line.date,
            line.steps,
            line.water,
            line.sleep,
            if line.goals_met { "  [goals met]" } else { "" }
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Update Compliance");
    let selected = view.selected_status();
    for status in ComplianceStatus::ALL {
        let mark = if status == selected { "(*)" } else { "( )" };
        let _ = writeln!(out, "  {} {}", mark, status);
    }
    let _ = writeln!(out, "  [{}]", view.save_label());

    out
}
