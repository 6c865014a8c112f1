//! Scenario runner - drives the whole validation run
//!
//! The run is a straight line: authenticate, provision, create, list,
//! delete. Each step's future consumes the previous step's typed output,
//! so the sequencing invariant is structural; a shared `drive` helper
//! records every outcome in the trace and stops the chain at the first
//! failure.

use crate::api::ApiTransport;
use crate::core::credentials::Credentials;
use crate::core::state::{RunReport, RunState, StepKind, StepRecord, Verdict};
use crate::scenario::steps::{ScenarioError, StepExecutor, StepPass};
use chrono::Utc;
use std::future::Future;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Events emitted while a run progresses
#[derive(Debug, Clone)]
pub enum ScenarioEvent {
    RunStarted {
        run_id: Uuid,
    },
    StepStarted {
        step: StepKind,
    },
    StepPassed {
        step: StepKind,
        note: String,
    },
    /// Non-gating anomaly, e.g. an unexpected registration rejection
    StepWarning {
        step: StepKind,
        warning: String,
    },
    StepFailed {
        step: StepKind,
        error: String,
    },
    RunFinished {
        run_id: Uuid,
        verdict: Verdict,
    },
}

/// Type for event handlers
pub type EventHandler = Box<dyn Fn(ScenarioEvent) + Send + Sync>;

/// Drives one validation run against an API client
pub struct ScenarioRunner<T> {
    executor: StepExecutor<T>,
    event_handlers: Vec<EventHandler>,
}

impl<T: ApiTransport> ScenarioRunner<T> {
    pub fn new(executor: StepExecutor<T>) -> Self {
        Self {
            executor,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ScenarioEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Box::new(handler));
    }

    fn emit(&self, event: ScenarioEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the whole scenario and report the terminal verdict.
    ///
    /// Always reaches a terminal state; failures are reported, never
    /// propagated.
    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "starting validation run");
        self.emit(ScenarioEvent::RunStarted { run_id });

        let mut state = RunState::Init;
        let mut trace = Vec::new();

        let verdict = match self.run_steps(&mut state, &mut trace).await {
            Ok(()) => Verdict::Pass,
            Err((step, err)) => Verdict::Fail {
                step,
                kind: err.kind(),
                reason: err.to_string(),
            },
        };

        match &verdict {
            Verdict::Pass => info!(%run_id, "run passed"),
            Verdict::Fail { step, reason, .. } => {
                error!(%run_id, step = step.label(), "run failed: {reason}");
            }
        }

        let report = RunReport {
            run_id,
            state,
            trace,
            verdict: verdict.clone(),
            started_at,
            finished_at: Utc::now(),
        };
        self.emit(ScenarioEvent::RunFinished { run_id, verdict });
        report
    }

    /// The step chain. Each `drive` call gates the next; `?` carries the
    /// failing step out.
    async fn run_steps(
        &self,
        state: &mut RunState,
        trace: &mut Vec<StepRecord>,
    ) -> Result<(), (StepKind, ScenarioError)> {
        let credentials = Credentials::generate();

        let session = self
            .drive(StepKind::Auth, state, trace, self.executor.authenticate(&credentials))
            .await?;
        let data_source = self
            .drive(StepKind::Provision, state, trace, self.executor.provision(&session))
            .await?;
        let pipeline = self
            .drive(
                StepKind::CreatePipeline,
                state,
                trace,
                self.executor.create_pipeline(&session, &data_source),
            )
            .await?;
        self.drive(
            StepKind::ListPipelines,
            state,
            trace,
            self.executor.verify_listing(&session, &data_source, &pipeline),
        )
        .await?;
        self.drive(
            StepKind::DeletePipeline,
            state,
            trace,
            self.executor.delete_pipeline(&session, &pipeline),
        )
        .await?;

        Ok(())
    }

    /// Run one step: emit events, record the trace entry, advance the
    /// state on success.
    async fn drive<O>(
        &self,
        step: StepKind,
        state: &mut RunState,
        trace: &mut Vec<StepRecord>,
        fut: impl Future<Output = Result<StepPass<O>, ScenarioError>>,
    ) -> Result<O, (StepKind, ScenarioError)> {
        self.emit(ScenarioEvent::StepStarted { step });
        let started_at = Utc::now();

        match fut.await {
            Ok(pass) => {
                *state = RunState::after(step);
                for warning in &pass.warnings {
                    warn!(step = step.label(), "{warning}");
                    self.emit(ScenarioEvent::StepWarning {
                        step,
                        warning: warning.clone(),
                    });
                }
                trace.push(StepRecord {
                    step,
                    passed: true,
                    detail: pass.note.clone(),
                    started_at,
                    finished_at: Utc::now(),
                });
                self.emit(ScenarioEvent::StepPassed {
                    step,
                    note: pass.note,
                });
                Ok(pass.value)
            }
            Err(err) => {
                let detail = err.to_string();
                trace.push(StepRecord {
                    step,
                    passed: false,
                    detail: detail.clone(),
                    started_at,
                    finished_at: Utc::now(),
                });
                self.emit(ScenarioEvent::StepFailed {
                    step,
                    error: detail,
                });
                Err((step, err))
            }
        }
    }
}
