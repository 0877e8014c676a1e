//! End-to-end view workflows over the mock collaborator.

use std::sync::Arc;
use std::time::Duration;

use care_dashboard_client::mock::{fixtures, MockProviderApi, RecordingNavigator};
use care_dashboard_client::{
    ApiError, PatientDetailView, PatientListView, Session, UpdateOutcome, UpdateState,
};
use care_dashboard_core::models::{ComplianceStatus, PatientSummary};
use care_dashboard_core::roster::{apply_filters, StatusFilter};
use proptest::prelude::*;
use tokio::sync::Notify;

fn bob_api() -> MockProviderApi {
    let bob = fixtures::roster().remove(1);
    MockProviderApi::new()
        .with_roster(fixtures::roster())
        .with_overview(fixtures::overview(bob))
}

fn detail_view(api: Arc<MockProviderApi>) -> PatientDetailView {
    PatientDetailView::new(
        api,
        Arc::new(RecordingNavigator::new()),
        Session::new("Rao"),
        "2",
    )
}

#[tokio::test(start_paused = true)]
async fn test_update_success_refetches_then_reverts() {
    let api = Arc::new(bob_api());
    let view = detail_view(api.clone());
    view.load_detail().await.unwrap();
    assert_eq!(view.update_state(), UpdateState::Idle);

    let outcome = view
        .update_compliance(ComplianceStatus::GoalMet)
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Saved { refreshed: true });
    assert_eq!(view.update_state(), UpdateState::Success);
    assert_eq!(
        view.success_message(),
        Some("Compliance status updated successfully!")
    );
    assert_eq!(api.overview_calls(), 2);
    assert_eq!(
        view.detail().unwrap().profile.summary.compliance_status.as_deref(),
        Some("Goal Met")
    );
    assert_eq!(view.selected_status(), ComplianceStatus::GoalMet);

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert_eq!(view.update_state(), UpdateState::Success);

    tokio::time::sleep(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert_eq!(view.update_state(), UpdateState::Idle);
    assert!(view.success_message().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_new_save_restarts_success_window() {
    let api = Arc::new(bob_api());
    let view = detail_view(api.clone());
    view.load_detail().await.unwrap();

    view.update_compliance(ComplianceStatus::GoalMet).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    view.update_compliance(ComplianceStatus::Pending).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    // The first window would have closed by now.
    assert_eq!(view.update_state(), UpdateState::Success);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    tokio::task::yield_now().await;
    assert_eq!(view.update_state(), UpdateState::Idle);
    assert_eq!(api.update_calls(), 2);
}

#[tokio::test]
async fn test_save_while_saving_is_ignored() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(bob_api().with_update_gate(gate.clone()));
    let view = Arc::new(detail_view(api.clone()));
    view.load_detail().await.unwrap();

    let first = {
        let view = view.clone();
        tokio::spawn(async move { view.update_compliance(ComplianceStatus::GoalMet).await })
    };
    while view.update_state() != UpdateState::Saving {
        tokio::task::yield_now().await;
    }
    assert_eq!(view.save_label(), "Updating...");
    assert!(!view.can_save());

    let second = view
        .update_compliance(ComplianceStatus::MissedPreventiveCheckup)
        .await
        .unwrap();
    assert_eq!(second, UpdateOutcome::Ignored);

    gate.notify_one();
    let first = first.await.unwrap().unwrap();

    assert_eq!(first, UpdateOutcome::Saved { refreshed: true });
    assert_eq!(api.update_calls(), 1);
    assert_eq!(
        api.applied_updates(),
        vec![("2".to_string(), ComplianceStatus::GoalMet)]
    );
}

#[tokio::test]
async fn test_rejection_shows_server_message_then_recovers() {
    let api = Arc::new(bob_api());
    let view = detail_view(api.clone());
    view.load_detail().await.unwrap();

    api.fail_next_update(ApiError::Rejected {
        status: 400,
        message: Some("Invalid status".into()),
    });
    view.select_status(ComplianceStatus::GoalMet);
    assert!(view.save().await.is_err());

    assert_eq!(view.update_state(), UpdateState::Error("Invalid status".into()));
    assert_eq!(view.update_error().as_deref(), Some("Invalid status"));
    assert_eq!(api.overview_calls(), 1);

    view.save().await.unwrap();
    assert_eq!(view.update_state(), UpdateState::Success);
    assert!(view.update_error().is_none());
}

#[tokio::test]
async fn test_roster_then_detail_navigation() {
    let api = Arc::new(bob_api());
    let navigator = Arc::new(RecordingNavigator::new());
    let mut list = PatientListView::new(api.clone(), navigator.clone(), Session::new("Rao"));
    list.load_roster().await.unwrap();

    list.set_search_term("bo");
    assert_eq!(list.filtered().len(), 1);
    list.open_patient(&list.filtered()[0].id);

    let route = navigator.routes().pop().unwrap();
    assert_eq!(route.path(), "/provider/patients/2");
}

fn arb_patient() -> impl Strategy<Value = PatientSummary> {
    (
        "[a-z0-9]{1,6}",
        "[A-Za-z ]{0,10}",
        "[a-z]{0,6}@[a-z]{1,4}\\.com",
        prop::option::of(prop::sample::select(vec![
            "Goal Met",
            "Missed Preventive Checkup",
            "Pending",
            "Unknown",
        ])),
    )
        .prop_map(|(id, name, email, status)| {
            let patient = PatientSummary::new(id, name, email);
            match status {
                Some(s) => patient.with_status(s),
                None => patient,
            }
        })
}

#[derive(Debug, Clone)]
enum Input {
    Search(String),
    Status(StatusFilter),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        "[A-Za-z@. ]{0,4}".prop_map(Input::Search),
        prop::sample::select(vec![
            StatusFilter::All,
            StatusFilter::Only(ComplianceStatus::GoalMet),
            StatusFilter::Only(ComplianceStatus::MissedPreventiveCheckup),
            StatusFilter::Only(ComplianceStatus::Pending),
        ])
        .prop_map(Input::Status),
    ]
}

proptest! {
    #[test]
    fn prop_filtered_tracks_inputs(
        roster in prop::collection::vec(arb_patient(), 0..12),
        inputs in prop::collection::vec(arb_input(), 0..8),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let api = Arc::new(MockProviderApi::new().with_roster(roster.clone()));
        let mut view = PatientListView::new(api, Arc::new(RecordingNavigator::new()), Session::default());
        rt.block_on(view.load_roster()).unwrap();

        for input in inputs {
            match input {
                Input::Search(term) => view.set_search_term(term),
                Input::Status(filter) => view.set_status_filter(filter),
            }
            let expected = apply_filters(&roster, view.search_term(), view.status_filter());
            prop_assert_eq!(view.filtered(), expected.as_slice());
        }

        prop_assert_eq!(view.summary().total, roster.len());
    }
}
