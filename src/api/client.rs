//! API client configuration and typed endpoint wrappers

use crate::api::{ApiError, ApiRequest, ApiResponse, ApiTransport};
use crate::core::credentials::{Credentials, Session};
use crate::core::resource::{DataSourceRef, PipelineRef};
use crate::core::spec::{DataSourceSpec, PipelineSpec};
use serde_json::json;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the pipeline service API
    pub base_url: String,

    /// Timeout for requests in seconds
    pub timeout_secs: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Typed wrapper over a transport for the endpoints the validator drives.
///
/// Keeps path and payload conventions in one place; steps never format
/// paths themselves.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// POST /auth/register
    pub async fn register(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
            "name": credentials.name,
            "company_name": credentials.company_name,
        });
        self.transport.send(ApiRequest::post("/auth/register", body)).await
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        self.transport.send(ApiRequest::post("/auth/login", body)).await
    }

    /// POST /datasources
    pub async fn create_data_source(
        &self,
        session: &Session,
        spec: &DataSourceSpec,
    ) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(spec).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.transport
            .send(ApiRequest::post("/datasources", body).with_token(&session.access_token))
            .await
    }

    /// GET /datasources
    pub async fn list_data_sources(&self, session: &Session) -> Result<ApiResponse, ApiError> {
        self.transport
            .send(ApiRequest::get("/datasources").with_token(&session.access_token))
            .await
    }

    /// POST /pipelines
    pub async fn create_pipeline(
        &self,
        session: &Session,
        spec: &PipelineSpec,
    ) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(spec).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.transport
            .send(ApiRequest::post("/pipelines", body).with_token(&session.access_token))
            .await
    }

    /// GET /datasources/{id}/pipelines
    pub async fn list_pipelines(
        &self,
        session: &Session,
        data_source: &DataSourceRef,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/datasources/{}/pipelines", data_source.id);
        self.transport
            .send(ApiRequest::get(path).with_token(&session.access_token))
            .await
    }

    /// DELETE /pipelines/{id}
    pub async fn delete_pipeline(
        &self,
        session: &Session,
        pipeline: &PipelineRef,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/pipelines/{}", pipeline.id);
        self.transport
            .send(ApiRequest::delete(path).with_token(&session.access_token))
            .await
    }
}
