//! Scriptable in-memory collaborator for tests and offline demos.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use care_dashboard_core::models::{ComplianceStatus, PatientDetail, PatientSummary};
use tokio::sync::Notify;

use crate::api::{ApiError, ApiResult, ProviderApi};
use crate::session::{Navigator, Route};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock provider API.
///
/// Serves a fixed roster and overviews; queued failures are returned
/// (once each) before the happy path. A successful update writes the new
/// status into the stored overview and roster so a refetch observes it.
#[derive(Debug, Default)]
pub struct MockProviderApi {
    roster: Mutex<Vec<PatientSummary>>,
    overviews: Mutex<HashMap<String, PatientDetail>>,
    roster_failures: Mutex<VecDeque<ApiError>>,
    overview_failures: Mutex<VecDeque<ApiError>>,
    update_failures: Mutex<VecDeque<ApiError>>,
    updates: Mutex<Vec<(String, ComplianceStatus)>>,
    overview_gate: Option<Arc<Notify>>,
    update_gate: Option<Arc<Notify>>,
    roster_calls: AtomicUsize,
    overview_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MockProviderApi {
    /// Create a new mock with no patients.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(self, roster: Vec<PatientSummary>) -> Self {
        *lock(&self.roster) = roster;
        self
    }

    pub fn with_overview(self, detail: PatientDetail) -> Self {
        lock(&self.overviews).insert(detail.profile.summary.id.clone(), detail);
        self
    }

    /// Hold every overview request until the gate is notified.
    pub fn with_overview_gate(mut self, gate: Arc<Notify>) -> Self {
        self.overview_gate = Some(gate);
        self
    }

    /// Hold every update request until the gate is notified.
    pub fn with_update_gate(mut self, gate: Arc<Notify>) -> Self {
        self.update_gate = Some(gate);
        self
    }

    pub fn fail_next_roster(&self, error: ApiError) {
        lock(&self.roster_failures).push_back(error);
    }

    pub fn fail_next_overview(&self, error: ApiError) {
        lock(&self.overview_failures).push_back(error);
    }

    pub fn fail_next_update(&self, error: ApiError) {
        lock(&self.update_failures).push_back(error);
    }

    pub fn roster_calls(&self) -> usize {
        self.roster_calls.load(Ordering::SeqCst)
    }

    pub fn overview_calls(&self) -> usize {
        self.overview_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Updates that were accepted, in order.
    pub fn applied_updates(&self) -> Vec<(String, ComplianceStatus)> {
        lock(&self.updates).clone()
    }
}

#[async_trait]
impl ProviderApi for MockProviderApi {
    async fn get_patients(&self) -> ApiResult<Vec<PatientSummary>> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = lock(&self.roster_failures).pop_front() {
            return Err(error);
        }
        Ok(lock(&self.roster).clone())
    }

    async fn get_patient_overview(&self, patient_id: &str) -> ApiResult<PatientDetail> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.overview_gate {
            gate.notified().await;
        }
        if let Some(error) = lock(&self.overview_failures).pop_front() {
            return Err(error);
        }
        lock(&self.overviews)
            .get(patient_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(patient_id.to_string()))
    }

    async fn update_compliance(&self, patient_id: &str, status: ComplianceStatus) -> ApiResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.update_gate {
            gate.notified().await;
        }
        if let Some(error) = lock(&self.update_failures).pop_front() {
            return Err(error);
        }

        let label = status.as_str().to_string();
        {
            let mut overviews = lock(&self.overviews);
            let detail = overviews
                .get_mut(patient_id)
                .ok_or_else(|| ApiError::Rejected {
                    status: 404,
                    message: Some("Patient not found".to_string()),
                })?;
            detail.profile.summary.compliance_status = Some(label.clone());
        }
        for patient in lock(&self.roster).iter_mut().filter(|p| p.id == patient_id) {
            patient.compliance_status = Some(label.clone());
        }

        lock(&self.updates).push((patient_id.to_string(), status));
        Ok(())
    }
}

/// Navigator that remembers every route it was asked for.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

/// Sample data for demos and tests.
pub mod fixtures {
    use care_dashboard_core::models::{
        LogEntry, PatientDetail, PatientProfile, PatientSummary, WellnessGoals,
        WellnessStatistics,
    };

    pub fn roster() -> Vec<PatientSummary> {
        vec![
            PatientSummary {
                phone: Some("555-0101".into()),
                age: Some(34),
                steps_goal: Some(10000),
                ..PatientSummary::new("1", "Ann", "a@x.com").with_status("Goal Met")
            },
            PatientSummary {
                phone: Some("555-0102".into()),
                age: Some(57),
                steps_goal: Some(8000),
                ..PatientSummary::new("2", "Bob", "b@x.com")
            },
        ]
    }

    pub fn overview(summary: PatientSummary) -> PatientDetail {
        PatientDetail {
            profile: PatientProfile {
                summary,
                allergies: Some("Penicillin".into()),
                current_medications: None,
            },
            goals: WellnessGoals {
                steps_goal: 8000.0,
                water_goal: 2.5,
                sleep_goal: 8.0,
                active_time_goal: 30.0,
            },
            statistics: WellnessStatistics {
                avg_steps: 7421.0,
                avg_water: 2.1,
                avg_sleep: 7.5,
                avg_active: 42.0,
                goals_met_percentage: 67.0,
                total_logs: 3,
            },
            recent_logs: vec![LogEntry {
                id: "l1".into(),
                date: "2024-03-05T00:00:00.000Z".into(),
                steps: 9000,
                water_litres: 2.5,
                sleep_hours: 8.0,
                goals_met: true,
            }],
        }
    }
}
