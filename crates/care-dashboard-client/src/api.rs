//! The provider-data collaborator the dashboard views talk to.

use async_trait::async_trait;
use care_dashboard_core::models::{ComplianceStatus, PatientDetail, PatientSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collaborator errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Response envelope used by every provider endpoint.
///
/// Missing fields read as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Operations the dashboard consumes. Transport is up to the implementor.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// The signed-in provider's assigned patients, in server order.
    async fn get_patients(&self) -> ApiResult<Vec<PatientSummary>>;

    /// Profile, goals, aggregates and recent logs for one patient.
    async fn get_patient_overview(&self, patient_id: &str) -> ApiResult<PatientDetail>;

    /// Set a patient's compliance status.
    async fn update_compliance(&self, patient_id: &str, status: ComplianceStatus) -> ApiResult<()>;
}
