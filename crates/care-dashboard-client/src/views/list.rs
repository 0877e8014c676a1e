//! Provider roster view: fetch once, filter and summarize locally.

use std::sync::Arc;

use care_dashboard_core::display::{status_badge, Badge};
use care_dashboard_core::models::PatientSummary;
use care_dashboard_core::roster::{apply_filters, compute_summary, RosterSummary, StatusFilter};

use crate::api::ProviderApi;
use crate::error::{DashboardError, DashboardResult};
use crate::session::{Navigator, Route, Session};

pub const NO_MATCHES_MESSAGE: &str = "No patients match your filters";
pub const NO_PATIENTS_MESSAGE: &str = "No patients assigned yet";

/// State behind the provider dashboard page.
///
/// `filtered` is only ever written by [`PatientListView::refilter`], from
/// the current roster and filter inputs.
pub struct PatientListView {
    api: Arc<dyn ProviderApi>,
    navigator: Arc<dyn Navigator>,
    session: Session,
    roster: Vec<PatientSummary>,
    filtered: Vec<PatientSummary>,
    search_term: String,
    status_filter: StatusFilter,
    loading: bool,
    error: Option<String>,
}

impl PatientListView {
    pub fn new(api: Arc<dyn ProviderApi>, navigator: Arc<dyn Navigator>, session: Session) -> Self {
        Self {
            api,
            navigator,
            session,
            roster: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
            loading: false,
            error: None,
        }
    }

    /// Fetch the roster. On failure the previous roster is kept.
    pub async fn load_roster(&mut self) -> DashboardResult<usize> {
        self.loading = true;
        let result = self.api.get_patients().await;
        self.loading = false;

        match result {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "Roster loaded");
                self.roster = patients;
                self.error = None;
                self.refilter();
                Ok(self.roster.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching patients");
                let err = DashboardError::FetchRoster(e);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Banner retry action.
    pub async fn retry(&mut self) -> DashboardResult<usize> {
        self.load_roster().await
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(&self.roster, &self.search_term, self.status_filter);
    }

    /// Navigate to a patient's overview.
    pub fn open_patient(&self, patient_id: &str) {
        self.navigator.navigate(Route::PatientDetail(patient_id.to_string()));
    }

    pub fn roster(&self) -> &[PatientSummary] {
        &self.roster
    }

    pub fn filtered(&self) -> &[PatientSummary] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Counters over the whole roster, not the filtered rows.
    pub fn summary(&self) -> RosterSummary {
        compute_summary(&self.roster)
    }

    pub fn greeting(&self) -> String {
        self.session.greeting()
    }

    pub fn heading(&self) -> String {
        format!("Assigned Patients ({})", self.filtered.len())
    }

    /// Placeholder text when no rows are visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.filtered.is_empty() {
            return None;
        }
        if !self.search_term.is_empty() || self.status_filter.is_active() {
            Some(NO_MATCHES_MESSAGE)
        } else {
            Some(NO_PATIENTS_MESSAGE)
        }
    }

    pub fn badge_for(patient: &PatientSummary) -> Badge {
        status_badge(patient.compliance_status.as_deref())
    }
}

impl std::fmt::Debug for PatientListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientListView")
            .field("roster", &self.roster.len())
            .field("filtered", &self.filtered.len())
            .field("search_term", &self.search_term)
            .field("status_filter", &self.status_filter)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::mock::{fixtures, MockProviderApi, RecordingNavigator};
    use care_dashboard_core::models::ComplianceStatus;

    fn view_with(api: Arc<MockProviderApi>) -> (PatientListView, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new());
        let view = PatientListView::new(api, navigator.clone(), Session::new("Rao"));
        (view, navigator)
    }

    #[tokio::test]
    async fn test_load_sets_roster_and_filtered() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        let (mut view, _) = view_with(api.clone());

        assert_eq!(view.load_roster().await.unwrap(), 2);
        assert_eq!(view.roster().len(), 2);
        assert_eq!(view.filtered(), view.roster());
        assert_eq!(view.heading(), "Assigned Patients (2)");
        assert!(view.error().is_none());
        assert_eq!(api.roster_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_roster() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        let (mut view, _) = view_with(api.clone());
        view.load_roster().await.unwrap();

        api.fail_next_roster(ApiError::Transport("down".into()));
        let err = view.retry().await.unwrap_err();

        assert!(matches!(err, DashboardError::FetchRoster(_)));
        assert_eq!(view.error(), Some("Failed to load patients list"));
        assert_eq!(view.roster().len(), 2);
    }

    #[tokio::test]
    async fn test_first_failure_shows_empty_then_retry_recovers() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        api.fail_next_roster(ApiError::Rejected { status: 500, message: None });
        let (mut view, _) = view_with(api.clone());

        assert!(view.load_roster().await.is_err());
        assert!(view.roster().is_empty());
        assert_eq!(view.empty_message(), Some(NO_PATIENTS_MESSAGE));

        view.retry().await.unwrap();
        assert!(view.error().is_none());
        assert_eq!(view.filtered().len(), 2);
    }

    #[tokio::test]
    async fn test_filters_recompute_on_change() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        let (mut view, _) = view_with(api);

        // Filters set before the roster arrives still apply to it.
        view.set_search_term("bo");
        view.load_roster().await.unwrap();
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.filtered()[0].name, "Bob");

        view.set_status_filter(StatusFilter::Only(ComplianceStatus::Pending));
        assert!(view.filtered().is_empty());
        assert_eq!(view.empty_message(), Some(NO_MATCHES_MESSAGE));

        view.set_search_term("");
        view.set_status_filter(StatusFilter::All);
        assert_eq!(view.filtered(), view.roster());
    }

    #[tokio::test]
    async fn test_summary_uses_whole_roster() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        let (mut view, _) = view_with(api);
        view.load_roster().await.unwrap();
        view.set_search_term("ann");

        let summary = view.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.goal_met, 1);
        assert_eq!(summary.pending, 1);
    }

    #[tokio::test]
    async fn test_open_patient_navigates() {
        let api = Arc::new(MockProviderApi::new().with_roster(fixtures::roster()));
        let (view, navigator) = view_with(api);

        view.open_patient("2");
        assert_eq!(navigator.routes(), vec![Route::PatientDetail("2".into())]);
        assert_eq!(view.greeting(), "Welcome back, Dr. Rao");
    }
}
