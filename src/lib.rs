//! pipecheck - end-to-end lifecycle validator for a pipeline management API

pub mod api;
pub mod cli;
pub mod core;
pub mod scenario;

// Re-export commonly used types
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiRequest, ApiResponse, ApiTransport};
pub use api::{Envelope, HttpTransport, Method};
pub use scenario::{ScenarioError, ScenarioEvent, ScenarioRunner, StepExecutor, StepPass};
pub use self::core::{Credentials, FailureKind, RunReport, RunState, Session, StepKind, Verdict};
pub use self::core::{DataSourceRef, PipelineRef, ResourceId, ValidatorConfig};
