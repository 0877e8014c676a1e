//! HTTP implementation of [`ProviderApi`].

use async_trait::async_trait;
use care_dashboard_core::models::{ComplianceStatus, PatientDetail, PatientSummary};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiError, ApiResult, Envelope, ProviderApi};
use crate::config::ClientConfig;

/// API client for the provider endpoints.
#[derive(Debug, Clone)]
pub struct HttpProviderApi {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComplianceUpdate {
    compliance_status: ComplianceStatus,
}

impl HttpProviderApi {
    /// Create a new API client.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Set the bearer token for authentication.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let api = Self::new(config.base_url.clone());
        match &config.api_token {
            Some(token) => api.with_api_token(token.clone()),
            None => api,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Read the body and unwrap the `{ success, data, message }` envelope.
    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
        not_found: Option<&str>,
    ) -> ApiResult<Option<T>> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = not_found {
                return Err(ApiError::NotFound(id.to_string()));
            }
        }

        if !status.is_success() {
            // Error bodies are best-effort: a non-JSON body just loses its message.
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if body.is_empty() {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ProviderApi for HttpProviderApi {
    async fn get_patients(&self) -> ApiResult<Vec<PatientSummary>> {
        let url = self.url("/provider/patients");
        tracing::debug!(%url, "Fetching patient roster");

        let response = self.send(self.client.get(&url)).await?;
        let patients = Self::read_envelope::<Vec<PatientSummary>>(response, None).await?;
        Ok(patients.unwrap_or_default())
    }

    async fn get_patient_overview(&self, patient_id: &str) -> ApiResult<PatientDetail> {
        let url = self.url(&format!("/provider/patients/{}", patient_id));
        tracing::debug!(%url, patient_id, "Fetching patient overview");

        let response = self.send(self.client.get(&url)).await?;
        Self::read_envelope::<PatientDetail>(response, Some(patient_id))
            .await?
            .ok_or_else(|| ApiError::NotFound(patient_id.to_string()))
    }

    async fn update_compliance(&self, patient_id: &str, status: ComplianceStatus) -> ApiResult<()> {
        let url = self.url(&format!("/provider/patients/{}/compliance", patient_id));
        tracing::debug!(%url, patient_id, %status, "Updating compliance status");

        let body = ComplianceUpdate {
            compliance_status: status,
        };
        let response = self.send(self.client.put(&url).json(&body)).await?;
        // A 404 here is a rejection like any other: its message reaches the banner.
        Self::read_envelope::<serde_json::Value>(response, None).await?;
        Ok(())
    }
}
