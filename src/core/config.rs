//! Validator configuration from YAML
//!
//! Every field has a default, so `pipecheck run` works against a local
//! service with no config file at all.

use crate::core::resource::DataSourceRef;
use crate::core::spec::{ColumnMapping, DataSourceSpec, FilterSpec, JoinSpec, PipelineSpec, TransformConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_base_url() -> String {
    "http://localhost:8081/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Top-level validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Base URL of the pipeline service API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection settings for the data source the run provisions
    #[serde(default)]
    pub data_source: DataSourceSpec,

    /// Settings for the probe pipeline the run creates and deletes
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            data_source: DataSourceSpec::default(),
            pipeline: PipelineSettings::default(),
        }
    }
}

/// Transform and schedule settings for the probe pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub name: String,
    pub base_table: String,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
    pub mappings: Vec<ColumnMapping>,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub limit: Option<u64>,
    pub cron_active: bool,
    pub cron: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            name: "Probe ETL Pipeline".to_string(),
            base_table: "public.orders".to_string(),
            joins: Vec::new(),
            mappings: vec![ColumnMapping {
                target_column: "full_address".to_string(),
                expression: "delivery_address".to_string(),
            }],
            filters: Vec::new(),
            limit: None,
            cron_active: true,
            // every minute; accepted by the service, never awaited by the run
            cron: "*/1 * * * *".to_string(),
        }
    }
}

impl PipelineSettings {
    /// Build the creation payload for a provisioned data source
    pub fn to_spec(&self, data_source: &DataSourceRef) -> PipelineSpec {
        PipelineSpec::new(
            self.name.clone(),
            data_source,
            TransformConfig {
                base_table: self.base_table.clone(),
                joins: self.joins.clone(),
                mappings: self.mappings.clone(),
                filters: self.filters.clone(),
                limit: self.limit,
                cron_active: self.cron_active,
                cron: self.cron.clone(),
            },
        )
    }
}

impl ValidatorConfig {
    /// Load validator configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse validator configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ValidatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if self.pipeline.name.trim().is_empty() {
            anyhow::bail!("pipeline name must not be empty");
        }
        if self.pipeline.base_table.trim().is_empty() {
            anyhow::bail!("pipeline base_table must not be empty");
        }
        if self.pipeline.cron_active && self.pipeline.cron.trim().is_empty() {
            anyhow::bail!("cron_active is set but cron expression is empty");
        }
        for mapping in &self.pipeline.mappings {
            if mapping.target_column.trim().is_empty() {
                anyhow::bail!("mapping target_column must not be empty");
            }
        }
        Ok(())
    }
}
