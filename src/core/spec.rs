//! Request payloads for provisioning and pipeline creation

use crate::core::resource::{DataSourceRef, ResourceId};
use serde::{Deserialize, Serialize};

/// Connection settings for the data source the run provisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceSpec {
    pub name: String,
    pub provider: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DataSourceSpec {
    fn default() -> Self {
        Self {
            name: "Probe Test DB".to_string(),
            provider: "postgresql".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            username: "postgres".to_string(),
            password: "password".to_string(),
        }
    }
}

/// One output-column mapping. Order across mappings defines output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub target_column: String,
    pub expression: String,
}

/// One join descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// Join type accepted by the service ("LEFT", "INNER", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub table: String,
    pub on_source: String,
    pub on_target: String,
}

/// One row filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    pub operator: String,
    pub value: String,
}

/// Transformation and scheduling settings for a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    pub base_table: String,
    pub joins: Vec<JoinSpec>,
    pub mappings: Vec<ColumnMapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub cron_active: bool,
    pub cron: String,
}

/// Payload for pipeline creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub name: String,
    pub data_source_id: ResourceId,
    pub config: TransformConfig,
}

impl PipelineSpec {
    /// Bind transform settings to a provisioned data source
    pub fn new(name: impl Into<String>, data_source: &DataSourceRef, config: TransformConfig) -> Self {
        Self {
            name: name.into(),
            data_source_id: data_source.id.clone(),
            config,
        }
    }
}
