// ABOUTME: Integration tests for the tool dispatch table and the workout tools it routes to
// ABOUTME: Exercises schemas, argument validation, and registry effects through dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{easy_5k_args, init_test_logging, steady_run, FakeProvider};
use pierre_workout_planner::llm::{ToolInvocation, ToolResultRecord};
use pierre_workout_planner::pierre_workouts::WorkoutRegistry;
use pierre_workout_planner::tools::{ToolCapabilities, ToolContext, ToolRegistry};
use serde_json::{json, Value};

async fn dispatch(
    tools: &ToolRegistry,
    registry: &mut WorkoutRegistry,
    provider: &FakeProvider,
    name: &str,
    input: Value,
) -> ToolResultRecord {
    let mut ctx = ToolContext::new(registry, provider);
    let invocation = ToolInvocation {
        id: format!("call_{name}"),
        name: name.to_owned(),
        input,
    };
    tools.dispatch(&invocation, &mut ctx).await
}

#[test]
fn test_default_catalogue_is_sorted() {
    let tools = ToolRegistry::with_default_tools();
    let names: Vec<String> = tools.all_schemas().into_iter().map(|s| s.name).collect();

    assert_eq!(
        names,
        vec![
            "create_workouts",
            "retrieve_proposed_workouts",
            "retrieve_remote_workout_details",
            "retrieve_remote_workouts",
        ]
    );
}

#[test]
fn test_create_workouts_schema_requires_workouts() {
    let tools = ToolRegistry::default();
    let schema = tools
        .all_schemas()
        .into_iter()
        .find(|s| s.name == "create_workouts")
        .unwrap();

    assert_eq!(schema.input_schema["type"], "object");
    assert_eq!(schema.input_schema["required"], json!(["workouts"]));

    let tool = tools.get("create_workouts").unwrap();
    assert!(tool.capabilities().contains(ToolCapabilities::WRITES_DATA));
    assert!(!tool.capabilities().requires_provider());
}

#[tokio::test]
async fn test_proposed_workouts_before_and_after_creation() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let empty = dispatch(
        &tools,
        &mut registry,
        &provider,
        "retrieve_proposed_workouts",
        json!({}),
    )
    .await;
    assert!(!empty.is_error);
    assert_eq!(empty.content, "No workouts have been created yet.");

    let created = dispatch(
        &tools,
        &mut registry,
        &provider,
        "create_workouts",
        easy_5k_args(),
    )
    .await;
    assert!(!created.is_error);
    assert_eq!(created.tool_call_id, "call_create_workouts");
    assert_eq!(registry.names(), vec!["Easy 5K"]);

    let listed = dispatch(
        &tools,
        &mut registry,
        &provider,
        "retrieve_proposed_workouts",
        json!({}),
    )
    .await;
    assert!(listed.content.starts_with("1 created total."));
    assert!(listed.content.contains("Easy 5K (3 steps, 35 min timed)"));
}

#[tokio::test]
async fn test_create_workouts_argument_errors() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let missing = dispatch(&tools, &mut registry, &provider, "create_workouts", json!({})).await;
    assert!(missing.is_error);
    assert_eq!(
        missing.content,
        "Error: Missing required parameter 'workouts' for tool 'create_workouts'"
    );

    let empty = dispatch(
        &tools,
        &mut registry,
        &provider,
        "create_workouts",
        json!({"workouts": []}),
    )
    .await;
    assert!(empty.is_error);
    assert!(empty.content.contains("Invalid parameter 'workouts'"));

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_rejected_steps_are_explained() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let args = json!({
        "workouts": [
            {
                "workout_name": "Mystery",
                "steps": [{"step_type": "other", "duration_minutes": 5, "target_type": "no_target"}]
            },
            {
                "workout_name": "Zone Run",
                "steps": [{"step_type": "interval", "duration_minutes": 30, "target_type": "heart_rate_zone"}]
            },
            steady_run("Aerobic", 45.0)
        ]
    });
    let record = dispatch(&tools, &mut registry, &provider, "create_workouts", args).await;

    assert!(record.is_error);
    assert!(record.content.starts_with("Created 1 workouts:"));
    assert!(record.content.contains("2 workouts were invalid"));
    assert!(record.content.contains("- Mystery:"));
    assert!(record.content.contains("- Zone Run:"));
    assert_eq!(registry.names(), vec!["Aerobic"]);
}

#[tokio::test]
async fn test_workout_without_steps_is_rejected() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let args = json!({"workouts": [{"workout_name": "Nothing", "steps": []}]});
    let record = dispatch(&tools, &mut registry, &provider, "create_workouts", args).await;

    assert!(record.is_error);
    assert!(record.content.contains("1 workouts were invalid"));
    assert!(record.content.contains("- Nothing: workout 'Nothing' has no steps"));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_remote_details_rejects_bad_id() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let record = dispatch(
        &tools,
        &mut registry,
        &provider,
        "retrieve_remote_workout_details",
        json!({"workout_id": "tempo"}),
    )
    .await;

    assert!(record.is_error);
    assert!(record.content.contains("'tempo' is not a number"));
}

#[tokio::test]
async fn test_remote_details_not_found() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let record = dispatch(
        &tools,
        &mut registry,
        &provider,
        "retrieve_remote_workout_details",
        json!({"workout_id": 7}),
    )
    .await;

    assert!(record.is_error);
    assert_eq!(
        record.content,
        "Error retrieving workout 7: workout '7' not found"
    );
}

#[tokio::test]
async fn test_empty_remote_listing() {
    init_test_logging();
    let tools = ToolRegistry::with_default_tools();
    let provider = FakeProvider::default();
    let mut registry = WorkoutRegistry::new();

    let record = dispatch(
        &tools,
        &mut registry,
        &provider,
        "retrieve_remote_workouts",
        json!({"start": 0, "limit": 10}),
    )
    .await;

    assert!(!record.is_error);
    assert_eq!(record.content, "No workouts found on Fake.");
}
