//! Test: pipeline create, list-containment, delete

use crate::helpers::*;
use pipecheck::api::Method;
use pipecheck::core::state::{FailureKind, RunState, StepKind};

/// Rejected creation aborts before any listing
#[tokio::test]
async fn test_pipeline_creation_rejected() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": 7}"#),
        status(500, r#"{"error": "invalid cron expression"}"#),
    ];

    let result = run_scenario_with_script(script).await;

    assert_run_failed(
        &result,
        StepKind::CreatePipeline,
        FailureKind::PipelineCreationFailure,
    );
    assert_trace(
        &result,
        &[StepKind::Auth, StepKind::Provision, StepKind::CreatePipeline],
    );
    assert_eq!(result.report.state, RunState::Provisioned);
    assert_eq!(result.call_count(Method::Get, "/datasources/7/pipelines"), 0);

    let record = result.report.step(StepKind::CreatePipeline).unwrap();
    assert!(record.detail.contains("invalid cron expression"));
}

/// Creation accepted but without an id cannot proceed to listing
#[tokio::test]
async fn test_pipeline_creation_without_id_fails() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": 7}"#),
        ok(r#"{"status": "accepted"}"#),
    ];

    let result = run_scenario_with_script(script).await;
    assert_run_failed(
        &result,
        StepKind::CreatePipeline,
        FailureKind::PipelineCreationFailure,
    );
}

/// The created pipeline must appear in the listing for its data source
#[tokio::test]
async fn test_created_pipeline_missing_from_listing() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": 7}"#),
        ok(r#"{"id": 42}"#),
        ok(r#"{"data": [{"id": 41}, {"id": 43}]}"#),
    ];

    let result = run_scenario_with_script(script).await;

    assert_run_failed(&result, StepKind::ListPipelines, FailureKind::PipelineNotFound);
    assert_eq!(result.report.state, RunState::PipelineCreated);
    assert_trace_is_sequence_prefix(&result);

    // deletion must never be attempted after a failed containment check
    assert!(result
        .calls
        .iter()
        .all(|(method, _)| *method != Method::Delete));
}

/// An empty listing right after creation is a consistency violation
#[tokio::test]
async fn test_empty_listing_after_creation() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": 7}"#),
        ok(r#"{"id": 42}"#),
        ok(r#"{"data": []}"#),
    ];

    let result = run_scenario_with_script(script).await;

    assert_run_failed(&result, StepKind::ListPipelines, FailureKind::PipelineNotFound);
    assert!(result
        .calls
        .iter()
        .all(|(method, _)| *method != Method::Delete));
}

/// A listing that is not a collection at all cannot pass containment
#[tokio::test]
async fn test_listing_not_a_collection_fails() {
    let script = vec![
        status(201, "{}"),
        ok(r#"{"access_token": "abc123"}"#),
        ok(r#"{"id": 7}"#),
        ok(r#"{"id": 42}"#),
        ok(r#"{"message": "try again later"}"#),
    ];

    let result = run_scenario_with_script(script).await;
    assert_run_failed(&result, StepKind::ListPipelines, FailureKind::PipelineNotFound);
}

/// Rejected deletion fails the run at the last step
#[tokio::test]
async fn test_deletion_rejected() {
    let mut script = happy_script();
    script[5] = status(500, r#"{"error": "pipeline is busy"}"#);

    let result = run_scenario_with_script(script).await;

    assert_run_failed(
        &result,
        StepKind::DeletePipeline,
        FailureKind::PipelineDeletionFailure,
    );
    assert_eq!(result.report.state, RunState::PipelineListed);
    assert_trace_is_sequence_prefix(&result);

    let record = result.report.step(StepKind::DeletePipeline).unwrap();
    assert!(record.detail.contains("pipeline is busy"));
}

/// Transport failure on deletion counts as a deletion failure
#[tokio::test]
async fn test_deletion_transport_failure() {
    let mut script = happy_script();
    script[5] = transport_failure("broken pipe");

    let result = run_scenario_with_script(script).await;
    assert_run_failed(
        &result,
        StepKind::DeletePipeline,
        FailureKind::PipelineDeletionFailure,
    );
}

/// Listing entries with malformed ids are skipped, not fatal, as long as
/// the created id is present
#[tokio::test]
async fn test_listing_with_malformed_entries_still_contains_id() {
    let mut script = happy_script();
    script[4] = ok(r#"{"data": [{"name": "stray"}, {"id": null}, {"id": 42}]}"#);

    let result = run_scenario_with_script(script).await;
    assert_run_passed(&result);
}
