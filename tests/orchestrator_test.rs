// ABOUTME: Integration tests for the conversation orchestrator with a scripted model and fake provider
// ABOUTME: Covers tool rounds, error capture, round and continuation caps, cancellation, and uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{
    easy_5k_args, init_test_logging, remote_tempo, steady_run, text_response, tool_response,
    tool_results, FakeProvider, RequestLog, ScriptedModel,
};
use pierre_workout_planner::config::LoopLimits;
use pierre_workout_planner::conversation::{
    CancellationFlag, Orchestrator, PhraseContinuationHeuristic, TurnState, TurnStatus,
};
use pierre_workout_planner::errors::{AppError, AppResult, ErrorCode};
use pierre_workout_planner::llm::{
    ContentBlock, ConversationMessage, LlmResponse, MessageRole, StopReason,
};
use pierre_workout_planner::tools::implementations::CreateWorkoutsTool;
use pierre_workout_planner::tools::ToolRegistry;
use pierre_workout_planner::pierre_workouts::{
    IntensityTarget, StepType, Workout, WorkoutOverview,
};
use serde_json::json;

fn orchestrator_with(
    responses: Vec<AppResult<LlmResponse>>,
    provider: FakeProvider,
) -> (Orchestrator, RequestLog, Arc<FakeProvider>) {
    init_test_logging();
    let (model, requests) = ScriptedModel::new(responses);
    let provider = Arc::new(provider);
    let orchestrator = Orchestrator::new(Box::new(model), provider.clone());
    (orchestrator, requests, provider)
}

fn orchestrator(
    responses: Vec<AppResult<LlmResponse>>,
) -> (Orchestrator, RequestLog, Arc<FakeProvider>) {
    orchestrator_with(responses, FakeProvider::default())
}

#[tokio::test]
async fn test_easy_5k_end_to_end() {
    let (mut orchestrator, requests, _) = orchestrator(vec![
        Ok(tool_response(
            Some("Building your 5K now."),
            vec![("toolu_1", "create_workouts", easy_5k_args())],
        )),
        Ok(text_response("Your Easy 5K is ready to upload.")),
    ]);

    let chat = orchestrator.chat("Make me an easy 5K").await.unwrap();

    assert_eq!(chat.summary, "Created 1 workouts:\n1. Easy 5K");
    assert_eq!(chat.continuations, 0);
    assert!(!chat.truncated);

    let workout = &chat.workouts[0];
    assert_eq!(workout.name(), "Easy 5K");
    assert_eq!(workout.segments().len(), 1);
    assert_eq!(workout.step_count(), 3);
    assert!((workout.timed_duration_secs() - 35.0 * 60.0).abs() < 1e-9);

    let steps = workout.segments()[0].steps();
    assert_eq!(steps[0].step_type(), StepType::Warmup);
    assert_eq!(steps[0].intensity(), &IntensityTarget::NoTarget);
    assert!(matches!(steps[1].intensity(), IntensityTarget::PaceZone(_)));
    assert_eq!(steps[2].step_type(), StepType::Cooldown);

    // user, assistant tool_use, combined tool results, final assistant text
    let history = orchestrator.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[2].role, MessageRole::User);
    let results = tool_results(&history[2]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "toolu_1");
    assert!(!results[0].2);
    assert!(results[0].1.starts_with("Created 1 workouts:"));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools.len(), 4);
    assert!(requests[0].system_policy.contains("create_workouts"));
    assert_eq!(orchestrator.state(), TurnState::Done);
    assert_eq!(orchestrator.workouts().len(), 1);
}

#[tokio::test]
async fn test_invocations_in_one_round_run_in_order() {
    let (mut orchestrator, _, _) = orchestrator(vec![
        Ok(tool_response(
            None,
            vec![
                (
                    "toolu_a",
                    "create_workouts",
                    json!({"workouts": [steady_run("Hills", 30.0)]}),
                ),
                (
                    "toolu_b",
                    "create_workouts",
                    json!({"workouts": [steady_run("Hills", 40.0), steady_run("Tempo", 25.0)]}),
                ),
                ("toolu_c", "retrieve_proposed_workouts", json!({})),
            ],
        )),
        Ok(text_response("The second hill session needs a new name.")),
    ]);

    let chat = orchestrator.chat("Two hill sessions and a tempo").await.unwrap();

    let names: Vec<&str> = chat.workouts.iter().map(Workout::name).collect();
    assert_eq!(names, vec!["Hills", "Tempo"]);
    assert_eq!(chat.summary, "Created 2 workouts:\n1. Hills\n2. Tempo");

    let results = tool_results(&orchestrator.history()[2]);
    let ids: Vec<&str> = results.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(ids, vec!["toolu_a", "toolu_b", "toolu_c"]);

    assert!(!results[0].2);
    assert!(results[1].2);
    assert!(results[1]
        .1
        .contains("The following names already exist: Hills"));
    assert!(results[1].1.contains("Created 1 workouts:"));

    // the third call sees both earlier calls' workouts
    assert!(results[2].1.starts_with("2 created total."));
}

#[tokio::test]
async fn test_invalid_items_do_not_block_valid_ones() {
    let bad_cadence = json!({
        "workout_name": "Bad Cadence",
        "steps": [{
            "step_type": "interval",
            "duration_minutes": 10,
            "target_type": "cadence_range",
            "target_lower_bound": 180,
            "target_upper_bound": 160
        }]
    });
    let (mut orchestrator, _, _) = orchestrator(vec![
        Ok(tool_response(
            None,
            vec![(
                "toolu_1",
                "create_workouts",
                json!({"workouts": [steady_run("Strides", 20.0), bad_cadence]}),
            )],
        )),
        Ok(text_response("One of those needs fixing.")),
    ]);

    let chat = orchestrator.chat("Strides and a cadence drill").await.unwrap();

    assert_eq!(chat.workouts.len(), 1);
    assert_eq!(chat.workouts[0].name(), "Strides");
    let results = tool_results(&orchestrator.history()[2]);
    assert!(results[0].2);
    assert!(results[0].1.contains("1 workouts were invalid"));
    assert!(results[0].1.contains("Bad Cadence"));
}

#[tokio::test]
async fn test_unknown_tool_becomes_error_result() {
    let (mut orchestrator, _, _) = orchestrator(vec![
        Ok(tool_response(
            None,
            vec![("toolu_9", "delete_workout", json!({"name": "Easy 5K"}))],
        )),
        Ok(text_response("I can't delete workouts.")),
    ]);

    let chat = orchestrator.chat("Delete my 5K").await.unwrap();

    assert!(chat.workouts.is_empty());
    assert_eq!(chat.summary, "I can't delete workouts.");
    let results = tool_results(&orchestrator.history()[2]);
    assert_eq!(results[0].0, "toolu_9");
    assert!(results[0].2);
    assert_eq!(results[0].1, "Error: Unknown tool 'delete_workout'");
}

#[tokio::test]
async fn test_remote_failure_is_reported_to_the_model() {
    let (mut orchestrator, requests, _) = orchestrator_with(
        vec![
            Ok(tool_response(
                None,
                vec![("toolu_1", "retrieve_remote_workouts", json!({}))],
            )),
            Ok(text_response("Garmin Connect is unavailable right now.")),
        ],
        FakeProvider::failing(503),
    );

    let chat = orchestrator.chat("What's on my watch?").await.unwrap();

    assert_eq!(chat.summary, "Garmin Connect is unavailable right now.");
    let results = tool_results(&orchestrator.history()[2]);
    assert!(results[0].2);
    assert!(results[0].1.starts_with("Error retrieving remote workouts:"));
    assert!(results[0].1.contains("503"));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_remote_listing_and_details() {
    let provider = FakeProvider {
        overviews: vec![WorkoutOverview::from_value(&json!({
            "workoutId": 42,
            "workoutName": "Remote Tempo",
            "sportType": {"sportTypeKey": "running"}
        }))],
        remote_workout: Some(remote_tempo()),
        ..FakeProvider::default()
    };
    let (mut orchestrator, _, _) = orchestrator_with(
        vec![
            Ok(tool_response(
                None,
                vec![
                    ("toolu_1", "retrieve_remote_workouts", json!({"limit": 5})),
                    (
                        "toolu_2",
                        "retrieve_remote_workout_details",
                        json!({"workout_id": "42"}),
                    ),
                ],
            )),
            Ok(text_response("You have one tempo run saved.")),
        ],
        provider,
    );

    orchestrator.chat("What's on my watch?").await.unwrap();

    let results = tool_results(&orchestrator.history()[2]);
    assert!(!results[0].2);
    assert!(results[0].1.starts_with("1 workouts on Fake:"));
    assert!(results[0].1.contains("Remote Tempo [id 42]"));
    assert!(!results[1].2);
    assert!(results[1].1.starts_with("Workout 42:"));
    assert!(results[1].1.contains("Remote Tempo"));
    // remote workouts are never added to the session
    assert!(orchestrator.workouts().is_empty());
}

#[tokio::test]
async fn test_model_failure_aborts_turn() {
    let (mut orchestrator, _, _) = orchestrator(vec![Err(AppError::new(
        ErrorCode::ExternalServiceUnavailable,
        "model overloaded",
    ))]);

    let error = orchestrator.chat("Plan my week").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(orchestrator.state(), TurnState::AwaitingUser);
    assert_eq!(
        orchestrator.history(),
        &[ConversationMessage::user_text("Plan my week")]
    );
}

#[tokio::test]
async fn test_empty_model_reply_keeps_history_sendable() {
    let empty = LlmResponse {
        content: Vec::new(),
        stop_reason: StopReason::EndTurn,
        usage: None,
    };
    let (mut orchestrator, requests, _) =
        orchestrator(vec![Ok(empty), Ok(text_response("Back again."))]);

    let first = orchestrator.chat("hi").await.unwrap();
    assert_eq!(first.continuations, 0);
    orchestrator.chat("again").await.unwrap();

    let requests = requests.lock().unwrap();
    let history = &requests[1].history;
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].role, MessageRole::Assistant);
    assert_eq!(history[1].content, vec![ContentBlock::text("(no response)")]);
    assert!(history.iter().all(|message| !message.content.is_empty()));
}

#[tokio::test]
async fn test_round_cap_truncates_turn() {
    init_test_logging();
    let (model, requests) = ScriptedModel::repeating(tool_response(
        None,
        vec![("toolu_loop", "retrieve_proposed_workouts", json!({}))],
    ));
    let mut orchestrator = Orchestrator::new(Box::new(model), Arc::new(FakeProvider::default()))
        .with_limits(LoopLimits {
            max_tool_rounds: 3,
            max_continuations: 10,
        });

    let outcome = orchestrator.chat_turn("Keep checking").await.unwrap();
    assert_eq!(outcome.status, TurnStatus::Truncated);
    assert_eq!(outcome.rounds, 3);
    assert_eq!(requests.lock().unwrap().len(), 3);
    assert_eq!(orchestrator.state(), TurnState::Done);
}

#[tokio::test]
async fn test_truncated_turn_marks_chat_truncated() {
    init_test_logging();
    let (model, requests) = ScriptedModel::repeating(tool_response(
        Some("Week 1 coming up."),
        vec![("toolu_loop", "retrieve_proposed_workouts", json!({}))],
    ));
    let mut orchestrator = Orchestrator::new(Box::new(model), Arc::new(FakeProvider::default()))
        .with_limits(LoopLimits {
            max_tool_rounds: 2,
            max_continuations: 10,
        });

    let chat = orchestrator.chat("Plan my month").await.unwrap();
    assert!(chat.truncated);
    // a truncated turn is never followed by a continuation
    assert_eq!(chat.continuations, 0);
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_first_week_only_triggers_one_continuation() {
    let (mut orchestrator, requests, _) = orchestrator(vec![
        Ok(text_response("Here is Week 1: three easy runs.")),
        Ok(text_response("Week 2 and Week 3 add strides.")),
    ]);

    let chat = orchestrator.chat("Plan three weeks").await.unwrap();

    assert_eq!(chat.continuations, 1);
    assert!(!chat.truncated);
    assert_eq!(
        chat.summary,
        "Here is Week 1: three easy runs.\n\nWeek 2 and Week 3 add strides."
    );

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].history.last(),
        Some(&ConversationMessage::user_text("continue"))
    );
}

#[tokio::test]
async fn test_continuations_are_capped() {
    init_test_logging();
    let (model, requests) = ScriptedModel::repeating(text_response("Week 1: easy running."));
    let mut orchestrator = Orchestrator::new(Box::new(model), Arc::new(FakeProvider::default()))
        .with_limits(LoopLimits {
            max_tool_rounds: 10,
            max_continuations: 2,
        });

    let chat = orchestrator.chat("Plan my block").await.unwrap();

    assert_eq!(chat.continuations, 2);
    assert!(chat.truncated);
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cancelled_flag_stops_before_model_call() {
    let (mut orchestrator, requests, _) = orchestrator(vec![Ok(text_response("unused"))]);
    orchestrator.cancellation_flag().cancel();

    let error = orchestrator.chat("Plan my week").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::Cancelled);
    assert!(requests.lock().unwrap().is_empty());

    orchestrator.cancellation_flag().reset();
    let chat = orchestrator.chat("Plan my week").await.unwrap();
    assert_eq!(chat.summary, "unused");
}

#[tokio::test]
async fn test_upload_encodes_registered_workout() {
    let (mut orchestrator, _, provider) = orchestrator(vec![
        Ok(tool_response(
            None,
            vec![("toolu_1", "create_workouts", easy_5k_args())],
        )),
        Ok(text_response("Done.")),
    ]);
    orchestrator.chat("Make me an easy 5K").await.unwrap();

    let response = orchestrator.upload_workout("Easy 5K").await.unwrap();
    assert_eq!(response["workoutId"], 9001);

    let uploads = provider.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["workoutName"], "Easy 5K");
    assert_eq!(uploads[0]["sportType"]["sportTypeKey"], "running");
}

#[tokio::test]
async fn test_upload_unknown_workout_is_not_found() {
    let (orchestrator, _, provider) = orchestrator(Vec::new());

    let error = orchestrator.upload_workout("Long Run").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(provider.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_collaborators_are_used() {
    init_test_logging();
    let (model, requests) = ScriptedModel::new(vec![
        Ok(text_response("Base week done, to be continued.")),
        Ok(text_response("Next, the hill repeats.")),
    ]);
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(CreateWorkoutsTool));
    let cancellation = CancellationFlag::new();

    let mut orchestrator = Orchestrator::new(Box::new(model), Arc::new(FakeProvider::default()))
        .with_tools(tools)
        .with_system_policy("Only build hill workouts.")
        .with_heuristic(Box::new(PhraseContinuationHeuristic::with_phrases([
            "to be continued",
        ])))
        .with_cancellation(cancellation.clone());

    let chat = orchestrator.chat("Plan a hill block").await.unwrap();

    // custom phrases replace the defaults, so "Next," no longer continues
    assert_eq!(chat.continuations, 1);
    assert!(!chat.truncated);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].system_policy, "Only build hill workouts.");
    assert_eq!(requests[0].tools, vec!["create_workouts"]);

    cancellation.cancel();
    assert!(orchestrator.cancellation_flag().is_cancelled());
}
