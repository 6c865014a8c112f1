//! Individual scenario steps
//!
//! Each step returns the typed value the next step consumes, so a step can
//! only run once everything it needs exists. Failure details always carry
//! the raw response body where one was received.

use crate::api::{envelope, ApiClient, ApiTransport};
use crate::core::config::ValidatorConfig;
use crate::core::credentials::{Credentials, Session};
use crate::core::resource::{DataSourceRef, PipelineRef, ResourceId};
use crate::core::state::FailureKind;
use serde_json::Value;
use thiserror::Error;

/// Error types for scenario steps, one gating kind per step
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("no access token in login response: {detail}")]
    AuthenticationFailure { detail: String },

    #[error("no data source available: {detail}")]
    ProvisioningFailure { detail: String },

    #[error("pipeline creation rejected: {detail}")]
    PipelineCreationFailure { detail: String },

    #[error("pipeline {id} missing from listing: {detail}")]
    PipelineNotFound { id: ResourceId, detail: String },

    #[error("pipeline deletion rejected: {detail}")]
    PipelineDeletionFailure { detail: String },
}

impl ScenarioError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScenarioError::AuthenticationFailure { .. } => FailureKind::AuthenticationFailure,
            ScenarioError::ProvisioningFailure { .. } => FailureKind::ProvisioningFailure,
            ScenarioError::PipelineCreationFailure { .. } => FailureKind::PipelineCreationFailure,
            ScenarioError::PipelineNotFound { .. } => FailureKind::PipelineNotFound,
            ScenarioError::PipelineDeletionFailure { .. } => FailureKind::PipelineDeletionFailure,
        }
    }
}

/// A passed step: its typed value, a human-readable note for the trace,
/// and any non-gating warnings collected along the way
#[derive(Debug)]
pub struct StepPass<O> {
    pub value: O,
    pub note: String,
    pub warnings: Vec<String>,
}

impl<O> StepPass<O> {
    fn new(value: O, note: impl Into<String>) -> Self {
        Self {
            value,
            note: note.into(),
            warnings: Vec::new(),
        }
    }

    fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Executes the scenario's steps against an API client
pub struct StepExecutor<T> {
    client: ApiClient<T>,
    config: ValidatorConfig,
}

impl<T: ApiTransport> StepExecutor<T> {
    pub fn new(client: ApiClient<T>, config: ValidatorConfig) -> Self {
        Self { client, config }
    }

    /// Register a fresh account (fire-and-forget) and log in.
    ///
    /// Registration never gates the run: the account may already half-exist
    /// and the service rejects duplicate emails. Anything other than a
    /// success answer is surfaced as a warning. Login success is decided
    /// purely by token extraction, not by HTTP status.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<StepPass<Session>, ScenarioError> {
        let mut warnings = Vec::new();
        match self.client.register(credentials).await {
            Ok(response) if !response.is_success() => {
                warnings.push(format!(
                    "registration returned {}: {}",
                    response.status, response.body
                ));
            }
            Ok(_) => {}
            Err(err) => warnings.push(format!("registration call failed: {err}")),
        }

        let response = self.client.login(credentials).await.map_err(|err| {
            ScenarioError::AuthenticationFailure {
                detail: err.to_string(),
            }
        })?;
        let body = response
            .json()
            .map_err(|err| ScenarioError::AuthenticationFailure {
                detail: format!("{err}: {}", response.body),
            })?;
        let token = envelope::field(&body, "access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| ScenarioError::AuthenticationFailure {
                detail: response.body.clone(),
            })?;

        Ok(StepPass::new(Session::new(token), "authenticated").with_warnings(warnings))
    }

    /// Create the configured data source, or fall back to the first
    /// existing one when creation is rejected.
    ///
    /// The service refuses duplicate sources; a source someone already
    /// provisioned is just as usable, so the fallback is not a failure
    /// path. Creation is never retried and the listing is consulted at
    /// most once.
    pub async fn provision(
        &self,
        session: &Session,
    ) -> Result<StepPass<DataSourceRef>, ScenarioError> {
        let response = self
            .client
            .create_data_source(session, &self.config.data_source)
            .await
            .map_err(|err| ScenarioError::ProvisioningFailure {
                detail: err.to_string(),
            })?;

        if response.is_success() {
            let body = response
                .json()
                .map_err(|err| ScenarioError::ProvisioningFailure {
                    detail: format!("{err}: {}", response.body),
                })?;
            let id = envelope::field(&body, "id")
                .and_then(ResourceId::from_value)
                .ok_or_else(|| ScenarioError::ProvisioningFailure {
                    detail: format!("creation succeeded but returned no id: {}", response.body),
                })?;
            let note = format!("created data source {id}");
            return Ok(StepPass::new(DataSourceRef { id }, note));
        }

        let rejection = format!("creation returned {}: {}", response.status, response.body);

        let listing = self
            .client
            .list_data_sources(session)
            .await
            .map_err(|err| ScenarioError::ProvisioningFailure {
                detail: format!("{rejection}; listing failed: {err}"),
            })?;
        if !listing.is_success() {
            return Err(ScenarioError::ProvisioningFailure {
                detail: format!(
                    "{rejection}; listing returned {}: {}",
                    listing.status, listing.body
                ),
            });
        }
        let body = listing
            .json()
            .map_err(|err| ScenarioError::ProvisioningFailure {
                detail: format!("{rejection}; listing undecodable: {err}"),
            })?;
        let id = envelope::collection(&body)
            .and_then(<[Value]>::first)
            .and_then(|entry| entry.get("id"))
            .and_then(ResourceId::from_value)
            .ok_or_else(|| ScenarioError::ProvisioningFailure {
                detail: format!("{rejection}; no existing data source to fall back to"),
            })?;

        let note = format!("reusing existing data source {id}");
        Ok(StepPass::new(DataSourceRef { id }, note))
    }

    /// Create the probe pipeline bound to the provisioned data source
    pub async fn create_pipeline(
        &self,
        session: &Session,
        data_source: &DataSourceRef,
    ) -> Result<StepPass<PipelineRef>, ScenarioError> {
        let spec = self.config.pipeline.to_spec(data_source);
        let response = self
            .client
            .create_pipeline(session, &spec)
            .await
            .map_err(|err| ScenarioError::PipelineCreationFailure {
                detail: err.to_string(),
            })?;

        if !response.is_success() {
            return Err(ScenarioError::PipelineCreationFailure {
                detail: format!("status {}: {}", response.status, response.body),
            });
        }

        let body = response
            .json()
            .map_err(|err| ScenarioError::PipelineCreationFailure {
                detail: format!("{err}: {}", response.body),
            })?;
        let id = envelope::field(&body, "id")
            .and_then(ResourceId::from_value)
            .ok_or_else(|| ScenarioError::PipelineCreationFailure {
                detail: format!("creation succeeded but returned no id: {}", response.body),
            })?;

        let note = format!("created pipeline {id}");
        Ok(StepPass::new(PipelineRef { id }, note))
    }

    /// Verify the created pipeline appears in the data source's listing.
    ///
    /// Created-then-immediately-listed must be visible; there is no
    /// eventual-consistency tolerance.
    pub async fn verify_listing(
        &self,
        session: &Session,
        data_source: &DataSourceRef,
        pipeline: &PipelineRef,
    ) -> Result<StepPass<usize>, ScenarioError> {
        let not_found = |detail: String| ScenarioError::PipelineNotFound {
            id: pipeline.id.clone(),
            detail,
        };

        let response = self
            .client
            .list_pipelines(session, data_source)
            .await
            .map_err(|err| not_found(err.to_string()))?;
        if !response.is_success() {
            return Err(not_found(format!(
                "listing returned {}: {}",
                response.status, response.body
            )));
        }

        let body = response
            .json()
            .map_err(|err| not_found(format!("{err}: {}", response.body)))?;
        let items = envelope::collection(&body)
            .ok_or_else(|| not_found(format!("listing is not a collection: {}", response.body)))?;

        let present = items
            .iter()
            .filter_map(|item| item.get("id").and_then(ResourceId::from_value))
            .any(|id| id == pipeline.id);
        if !present {
            return Err(not_found(response.body.clone()));
        }

        let note = format!(
            "pipeline {} visible in listing of {}",
            pipeline.id,
            match items.len() {
                1 => "1 pipeline".to_string(),
                n => format!("{n} pipelines"),
            }
        );
        Ok(StepPass::new(items.len(), note))
    }

    /// Delete the probe pipeline
    pub async fn delete_pipeline(
        &self,
        session: &Session,
        pipeline: &PipelineRef,
    ) -> Result<StepPass<()>, ScenarioError> {
        let response = self
            .client
            .delete_pipeline(session, pipeline)
            .await
            .map_err(|err| ScenarioError::PipelineDeletionFailure {
                detail: err.to_string(),
            })?;

        if !response.is_success() {
            return Err(ScenarioError::PipelineDeletionFailure {
                detail: format!("status {}: {}", response.status, response.body),
            });
        }

        let note = format!("deleted pipeline {}", pipeline.id);
        Ok(StepPass::new((), note))
    }
}
