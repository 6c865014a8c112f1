//! Test: the full scenario passes against a well-behaved service

use crate::helpers::*;
use pipecheck::api::Method;
use pipecheck::core::state::{RunState, StepKind, Verdict};

/// The canonical run: every step passes, in order, and the verdict is Pass
#[tokio::test]
async fn test_full_run_passes() {
    let result = run_scenario_with_script(happy_script()).await;

    assert_run_passed(&result);
    assert_trace(
        &result,
        &[
            StepKind::Auth,
            StepKind::Provision,
            StepKind::CreatePipeline,
            StepKind::ListPipelines,
            StepKind::DeletePipeline,
        ],
    );
    assert_eq!(result.report.state, RunState::PipelineDeleted);

    // every call hit the endpoint it should, in order
    let paths: Vec<&str> = result.calls.iter().map(|(_, p)| p.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/auth/register",
            "/auth/login",
            "/datasources",
            "/pipelines",
            "/datasources/7/pipelines",
            "/pipelines/42",
        ]
    );
    assert_eq!(result.calls[5].0, Method::Delete);
}

/// Login answered without the wrapper envelope
#[tokio::test]
async fn test_direct_login_envelope() {
    let mut script = happy_script();
    script[1] = ok(r#"{"access_token": "abc123"}"#);

    let result = run_scenario_with_script(script).await;
    assert_run_passed(&result);
}

/// Creation responses answered with the wrapper envelope
#[tokio::test]
async fn test_wrapped_creation_envelopes() {
    let mut script = happy_script();
    script[2] = ok(r#"{"data": {"id": 7}}"#);
    script[3] = ok(r#"{"data": {"id": 42}}"#);
    // listing answered bare
    script[4] = ok(r#"[{"id": 41}, {"id": 42}]"#);

    let result = run_scenario_with_script(script).await;
    assert_run_passed(&result);
}

/// Identifiers may be strings instead of numbers
#[tokio::test]
async fn test_string_identifiers() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": "ds-7f"}"#),
        ok(r#"{"id": "pl-42"}"#),
        ok(r#"{"data": [{"id": "pl-42"}]}"#),
        ok("{}"),
    ];

    let result = run_scenario_with_script(script).await;
    assert_run_passed(&result);

    let paths: Vec<&str> = result.calls.iter().map(|(_, p)| p.as_str()).collect();
    assert!(paths.contains(&"/datasources/ds-7f/pipelines"));
    assert!(paths.contains(&"/pipelines/pl-42"));
}

/// The same script always produces the same single verdict
#[tokio::test]
async fn test_terminal_determinism() {
    let first = run_scenario_with_script(happy_script()).await;
    let second = run_scenario_with_script(happy_script()).await;

    assert_eq!(first.report.verdict, Verdict::Pass);
    assert_eq!(second.report.verdict, Verdict::Pass);
    assert_eq!(
        first.report.executed_steps(),
        second.report.executed_steps()
    );
}

/// The passing trace is itself a (full) prefix of the canonical sequence
#[tokio::test]
async fn test_pass_trace_is_full_sequence() {
    let result = run_scenario_with_script(happy_script()).await;
    assert_trace_is_sequence_prefix(&result);
    assert_eq!(result.report.executed_steps().len(), StepKind::SEQUENCE.len());
    assert!(result.report.trace.iter().all(|record| record.passed));
}
