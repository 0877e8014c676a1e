//! HTTP client tests against a mock server.

use care_dashboard_client::{ApiError, DashboardError, HttpProviderApi, ProviderApi};
use care_dashboard_core::models::ComplianceStatus;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn overview_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "profile": {
                "_id": "p2",
                "name": "Bob",
                "email": "b@x.com",
                "age": 57,
                "complianceStatus": "Missed Preventive Checkup",
                "allergies": "",
                "currentMedications": "Metformin"
            },
            "goals": { "stepsGoal": 8000, "waterGoal": 2.5, "sleepGoal": 8, "activeTimeGoal": 30 },
            "statistics": {
                "avgSteps": 7421,
                "avgWater": "2.1",
                "avgSleep": "7.5",
                "avgActive": 42,
                "goalsMetPercentage": "66.7",
                "totalLogs": 3
            },
            "recentLogs": [
                { "_id": "l1", "date": "2024-03-05T00:00:00.000Z", "steps": 9000,
                  "waterLitres": 2.5, "sleepHours": 8, "goalsMet": true }
            ]
        }
    })
}

#[tokio::test]
async fn test_get_patients_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/provider/patients"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "_id": "1", "name": "Ann", "email": "a@x.com", "complianceStatus": "Goal Met" },
                { "_id": "2", "name": "Bob", "email": "b@x.com", "phone": "555-0102" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(format!("{}/api", server.uri())).with_api_token("secret");
    let patients = api.get_patients().await.unwrap();

    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].id, "1");
    assert_eq!(patients[0].compliance_status.as_deref(), Some("Goal Met"));
    assert_eq!(patients[1].compliance_status, None);
    assert_eq!(patients[1].phone.as_deref(), Some("555-0102"));
}

#[tokio::test]
async fn test_get_patients_missing_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provider/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    assert!(api.get_patients().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_overview_parses_numeric_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provider/patients/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview_body()))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    let detail = api.get_patient_overview("p2").await.unwrap();

    assert_eq!(detail.profile.summary.name, "Bob");
    assert_eq!(detail.initial_status(), ComplianceStatus::MissedPreventiveCheckup);
    assert_eq!(detail.profile.current_medications.as_deref(), Some("Metformin"));
    assert_eq!(detail.statistics.avg_water, 2.1);
    assert_eq!(detail.statistics.goals_met_percentage, 66.7);
    assert_eq!(detail.recent_logs.len(), 1);
}

#[tokio::test]
async fn test_overview_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provider/patients/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Patient not found"
        })))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    let err = api.get_patient_overview("ghost").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref id) if id == "ghost"));
}

#[tokio::test]
async fn test_update_sends_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/provider/patients/p2/compliance"))
        .and(body_json(json!({ "complianceStatus": "Goal Met" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Compliance status updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    api.update_compliance("p2", ComplianceStatus::GoalMet)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/provider/patients/p2/compliance"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Invalid status"
        })))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    let err = api
        .update_compliance("p2", ComplianceStatus::Pending)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(err.server_message(), Some("Invalid status"));
}

#[tokio::test]
async fn test_update_404_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/provider/patients/p7/compliance"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Patient is not assigned to you"
        })))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    let err = api
        .update_compliance("p7", ComplianceStatus::GoalMet)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
    assert_eq!(
        DashboardError::UpdateCompliance(err).user_message(),
        "Patient is not assigned to you"
    );
}

#[tokio::test]
async fn test_non_json_error_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provider/patients"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let api = HttpProviderApi::new(server.uri());
    let err = api.get_patients().await.unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 502, message: None }));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on port 9 of localhost in test environments.
    let api = HttpProviderApi::new("http://127.0.0.1:9");
    let err = api.get_patients().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
