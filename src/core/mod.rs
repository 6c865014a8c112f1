//! Core domain types

pub mod config;
pub mod credentials;
pub mod resource;
pub mod spec;
pub mod state;

pub use config::{PipelineSettings, ValidatorConfig};
pub use credentials::{Credentials, Session};
pub use resource::{DataSourceRef, PipelineRef, ResourceId};
pub use spec::{ColumnMapping, DataSourceSpec, FilterSpec, JoinSpec, PipelineSpec, TransformConfig};
pub use state::{FailureKind, RunReport, RunState, StepKind, StepRecord, Verdict};
