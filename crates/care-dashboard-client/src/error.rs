//! View-level error taxonomy.

use thiserror::Error;

use crate::api::ApiError;

pub const ROSTER_FAILED_MESSAGE: &str = "Failed to load patients list";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load patient data";
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "Patient not found";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update compliance status";

/// A failure contained to one view. None of these are fatal.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetching roster failed: {0}")]
    FetchRoster(#[source] ApiError),

    #[error("Fetching patient detail failed: {0}")]
    FetchDetail(#[source] ApiError),

    #[error("Updating compliance failed: {0}")]
    UpdateCompliance(#[source] ApiError),
}

impl DashboardError {
    /// Banner text shown to the provider.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::FetchRoster(_) => ROSTER_FAILED_MESSAGE.to_string(),
            DashboardError::FetchDetail(e) if e.is_not_found() => {
                DETAIL_NOT_FOUND_MESSAGE.to_string()
            }
            DashboardError::FetchDetail(_) => DETAIL_FAILED_MESSAGE.to_string(),
            DashboardError::UpdateCompliance(e) => e
                .server_message()
                .unwrap_or(UPDATE_FAILED_MESSAGE)
                .to_string(),
        }
    }

    pub fn api_error(&self) -> &ApiError {
        match self {
            DashboardError::FetchRoster(e)
            | DashboardError::FetchDetail(e)
            | DashboardError::UpdateCompliance(e) => e,
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
