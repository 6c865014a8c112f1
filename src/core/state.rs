//! Run state and verdict models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five scenario steps, in the order they must run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Auth,
    Provision,
    CreatePipeline,
    ListPipelines,
    DeletePipeline,
}

impl StepKind {
    /// Execution order. A run's trace is always a strict prefix of this.
    pub const SEQUENCE: [StepKind; 5] = [
        StepKind::Auth,
        StepKind::Provision,
        StepKind::CreatePipeline,
        StepKind::ListPipelines,
        StepKind::DeletePipeline,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Auth => "authenticate",
            StepKind::Provision => "provision data source",
            StepKind::CreatePipeline => "create pipeline",
            StepKind::ListPipelines => "verify pipeline listing",
            StepKind::DeletePipeline => "delete pipeline",
        }
    }
}

/// How far a run has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Init,
    Authenticated,
    Provisioned,
    PipelineCreated,
    PipelineListed,
    PipelineDeleted,
}

impl RunState {
    /// State reached when the given step passes
    pub fn after(step: StepKind) -> Self {
        match step {
            StepKind::Auth => RunState::Authenticated,
            StepKind::Provision => RunState::Provisioned,
            StepKind::CreatePipeline => RunState::PipelineCreated,
            StepKind::ListPipelines => RunState::PipelineListed,
            StepKind::DeletePipeline => RunState::PipelineDeleted,
        }
    }
}

/// Failure classification, one kind per step that can gate the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    AuthenticationFailure,
    ProvisioningFailure,
    PipelineCreationFailure,
    PipelineNotFound,
    PipelineDeletionFailure,
}

/// Outcome of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: StepKind,
    pub passed: bool,
    /// Success note or failure diagnostic, raw response body included
    pub detail: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail {
        step: StepKind,
        kind: FailureKind,
        reason: String,
    },
}

/// Full record of one validator run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub state: RunState,
    pub trace: Vec<StepRecord>,
    pub verdict: Verdict,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Pass)
    }

    /// Record for a step, if the run got that far
    pub fn step(&self, kind: StepKind) -> Option<&StepRecord> {
        self.trace.iter().find(|record| record.step == kind)
    }

    /// Steps executed, in order
    pub fn executed_steps(&self) -> Vec<StepKind> {
        self.trace.iter().map(|record| record.step).collect()
    }
}
