//! Patient overview view and the compliance-update workflow.
//!
//! ```text
//!            save()                   request ok
//!   Idle ─────────────► Saving ─────────────────► Success ──(window elapses)──► Idle
//!    ▲                    │                          │
//!    │                    │ request failed           │ save()
//!    │                    ▼                          ▼
//!    └──── save() ──── Error(msg)                  Saving
//! ```
//!
//! `save()` while `Saving` is ignored. After a successful update the
//! overview is fetched again before `update_compliance` returns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use care_dashboard_core::models::{ComplianceStatus, PatientDetail};

use super::schedule::ScheduledCallback;
use crate::api::ProviderApi;
use crate::error::{DashboardError, DashboardResult};
use crate::session::{Navigator, Route, Session};

/// How long the success banner stays up by default.
pub const DEFAULT_SUCCESS_WINDOW: Duration = Duration::from_secs(3);

pub const SUCCESS_MESSAGE: &str = "Compliance status updated successfully!";
pub const SAVE_LABEL: &str = "Update Status";
pub const SAVING_LABEL: &str = "Updating...";

/// Compliance update workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    Idle,
    Saving,
    Success,
    /// Banner text for the update widget
    Error(String),
}

/// What a call to [`PatientDetailView::update_compliance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server accepted the update. `refreshed` is false when the
    /// follow-up fetch failed and the page shows pre-update data.
    Saved { refreshed: bool },
    /// A save was already in flight, no overview was loaded, or the view
    /// was torn down before the workflow finished.
    Ignored,
}

/// What the page as a whole should show.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    /// First fetch in flight, nothing to show yet
    Loading,
    Ready,
    /// First fetch failed. Only way out is back to the roster.
    Unavailable(String),
}

#[derive(Debug)]
struct DetailState {
    mounted: bool,
    loading: bool,
    detail: Option<PatientDetail>,
    load_error: Option<String>,
    selected_status: ComplianceStatus,
    update: UpdateState,
    refresh_error: Option<String>,
    // Bumped on every Success; a revert only applies to its own Success.
    success_epoch: u64,
    revert: Option<ScheduledCallback>,
}

fn lock(state: &Mutex<DetailState>) -> MutexGuard<'_, DetailState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State behind the patient overview page.
///
/// Methods take `&self`: state lives behind a mutex that is never held
/// across an await, so two saves can race and the second sees `Saving`.
pub struct PatientDetailView {
    api: Arc<dyn ProviderApi>,
    navigator: Arc<dyn Navigator>,
    session: Session,
    patient_id: String,
    success_window: Duration,
    state: Arc<Mutex<DetailState>>,
}

impl PatientDetailView {
    pub fn new(
        api: Arc<dyn ProviderApi>,
        navigator: Arc<dyn Navigator>,
        session: Session,
        patient_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            navigator,
            session,
            patient_id: patient_id.into(),
            success_window: DEFAULT_SUCCESS_WINDOW,
            state: Arc::new(Mutex::new(DetailState {
                mounted: true,
                loading: false,
                detail: None,
                load_error: None,
                selected_status: ComplianceStatus::default(),
                update: UpdateState::Idle,
                refresh_error: None,
                success_epoch: 0,
                revert: None,
            })),
        }
    }

    pub fn with_success_window(mut self, window: Duration) -> Self {
        self.success_window = window;
        self
    }

    /// Fetch the overview and reset the editable status from it.
    pub async fn load_detail(&self) -> DashboardResult<()> {
        {
            let mut state = lock(&self.state);
            if !state.mounted {
                return Ok(());
            }
            state.loading = true;
        }

        let result = self.api.get_patient_overview(&self.patient_id).await;

        let mut state = lock(&self.state);
        state.loading = false;
        if !state.mounted {
            tracing::debug!(patient_id = %self.patient_id, "View torn down, discarding overview");
            return Ok(());
        }

        match result {
            Ok(detail) => {
                state.selected_status = detail.initial_status();
                state.detail = Some(detail);
                state.load_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(patient_id = %self.patient_id, error = %e, "Error fetching patient overview");
                let err = DashboardError::FetchDetail(e);
                state.load_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Change the editable status field without saving.
    pub fn select_status(&self, status: ComplianceStatus) {
        lock(&self.state).selected_status = status;
    }

    /// Save button: submit the currently selected status.
    pub async fn save(&self) -> DashboardResult<UpdateOutcome> {
        let status = lock(&self.state).selected_status;
        self.update_compliance(status).await
    }

    /// Submit `new_status` for this patient.
    pub async fn update_compliance(
        &self,
        new_status: ComplianceStatus,
    ) -> DashboardResult<UpdateOutcome> {
        {
            let mut state = lock(&self.state);
            if !state.mounted {
                return Ok(UpdateOutcome::Ignored);
            }
            if state.detail.is_none() {
                tracing::debug!(patient_id = %self.patient_id, "No overview loaded, ignoring save");
                return Ok(UpdateOutcome::Ignored);
            }
            if state.update == UpdateState::Saving {
                tracing::debug!(patient_id = %self.patient_id, "Save already in flight, ignoring");
                return Ok(UpdateOutcome::Ignored);
            }
            if let Some(revert) = state.revert.take() {
                tracing::debug!(patient_id = %self.patient_id, "Cancelling pending success revert");
                revert.cancel();
            }
            state.selected_status = new_status;
            state.update = UpdateState::Saving;
        }

        let result = self
            .api
            .update_compliance(&self.patient_id, new_status)
            .await;

        {
            let mut state = lock(&self.state);
            if !state.mounted {
                return Ok(UpdateOutcome::Ignored);
            }

            if let Err(e) = result {
                tracing::warn!(
                    patient_id = %self.patient_id,
                    status = %new_status,
                    error = %e,
                    "Error updating compliance"
                );
                let err = DashboardError::UpdateCompliance(e);
                state.update = UpdateState::Error(err.user_message());
                return Err(err);
            }

            tracing::info!(patient_id = %self.patient_id, status = %new_status, "Compliance status updated");
            state.update = UpdateState::Success;
            state.success_epoch += 1;
            let epoch = state.success_epoch;
            state.revert = Some(self.schedule_revert(epoch));
        }

        let refreshed = self.refresh().await;
        if !lock(&self.state).mounted {
            return Ok(UpdateOutcome::Ignored);
        }
        Ok(UpdateOutcome::Saved { refreshed })
    }

    fn schedule_revert(&self, epoch: u64) -> ScheduledCallback {
        let shared = Arc::clone(&self.state);
        ScheduledCallback::schedule(self.success_window, move || {
            let mut state = lock(&shared);
            if state.update == UpdateState::Success && state.success_epoch == epoch {
                state.update = UpdateState::Idle;
                state.revert = None;
            }
        })
    }

    /// Read-after-write fetch. A failure is recorded separately from the
    /// update outcome and leaves the previous data on screen.
    async fn refresh(&self) -> bool {
        let result = self.load_detail().await;

        let mut state = lock(&self.state);
        if !state.mounted {
            return false;
        }
        match result {
            Ok(()) => {
                state.refresh_error = None;
                true
            }
            Err(e) => {
                // load_detail put this in load_error; it belongs to the refresh
                // unless there is no data and the page must stay unavailable.
                if state.detail.is_some() {
                    state.load_error = None;
                }
                state.refresh_error = Some(e.user_message());
                false
            }
        }
    }

    /// Stop the revert timer and discard any result still in flight.
    pub fn teardown(&self) {
        let mut state = lock(&self.state);
        state.mounted = false;
        if let Some(revert) = state.revert.take() {
            revert.cancel();
        }
    }

    /// Back to the roster.
    pub fn go_back(&self) {
        self.navigator.navigate(Route::Roster);
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> DetailPhase {
        let state = lock(&self.state);
        match (&state.detail, &state.load_error) {
            (Some(_), _) => DetailPhase::Ready,
            (None, Some(message)) => DetailPhase::Unavailable(message.clone()),
            (None, None) => DetailPhase::Loading,
        }
    }

    pub fn detail(&self) -> Option<PatientDetail> {
        lock(&self.state).detail.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Fetch error shown as a page banner when data is already on screen.
    pub fn load_error(&self) -> Option<String> {
        lock(&self.state).load_error.clone()
    }

    /// Failure of the follow-up fetch after a successful update.
    pub fn refresh_error(&self) -> Option<String> {
        lock(&self.state).refresh_error.clone()
    }

    pub fn selected_status(&self) -> ComplianceStatus {
        lock(&self.state).selected_status
    }

    pub fn update_state(&self) -> UpdateState {
        lock(&self.state).update.clone()
    }

    pub fn can_save(&self) -> bool {
        let state = lock(&self.state);
        state.mounted && state.detail.is_some() && state.update != UpdateState::Saving
    }

    pub fn save_label(&self) -> &'static str {
        if self.update_state() == UpdateState::Saving {
            SAVING_LABEL
        } else {
            SAVE_LABEL
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        (self.update_state() == UpdateState::Success).then_some(SUCCESS_MESSAGE)
    }

    pub fn update_error(&self) -> Option<String> {
        match self.update_state() {
            UpdateState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl Drop for PatientDetailView {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PatientDetailView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientDetailView")
            .field("patient_id", &self.patient_id)
            .field("success_window", &self.success_window)
            .field("state", &self.state)
            .finish()
    }
}
