// ABOUTME: Shared test doubles for integration tests: scripted language model and fake provider
// ABOUTME: Lets orchestrator and tool tests run without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pierre_workout_planner`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use pierre_workout_planner::errors::{AppError, AppResult};
use pierre_workout_planner::llm::{
    ContentBlock, ConversationMessage, LanguageModel, LlmResponse, StopReason, ToolSchema,
};
use pierre_workout_planner::pierre_workouts::{
    EndCondition, HeartRateZoneTarget, IntensityTarget, StepType, Workout, WorkoutOverview,
    WorkoutStep,
};
use pierre_workout_planner::providers::{ProviderError, ProviderResult, WorkoutProvider};
use serde_json::{json, Value};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Scripted Language Model
// ============================================================================

/// What the model received in one round
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub history: Vec<ConversationMessage>,
    pub system_policy: String,
    pub tools: Vec<String>,
}

/// Requests the model received, one entry per round
pub type RequestLog = Arc<Mutex<Vec<ModelRequest>>>;

/// Language model that replays canned responses in order
pub struct ScriptedModel {
    script: Mutex<VecDeque<AppResult<LlmResponse>>>,
    fallback: Option<LlmResponse>,
    requests: RequestLog,
}

impl ScriptedModel {
    /// Replay `responses`, then fail
    pub fn new(responses: Vec<AppResult<LlmResponse>>) -> (Self, RequestLog) {
        Self::build(responses, None)
    }

    /// Answer every round with the same response
    pub fn repeating(response: LlmResponse) -> (Self, RequestLog) {
        Self::build(Vec::new(), Some(response))
    }

    fn build(
        responses: Vec<AppResult<LlmResponse>>,
        fallback: Option<LlmResponse>,
    ) -> (Self, RequestLog) {
        let requests = RequestLog::default();
        let model = Self {
            script: Mutex::new(responses.into()),
            fallback,
            requests: Arc::clone(&requests),
        };
        (model, requests)
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn send(
        &self,
        history: &[ConversationMessage],
        system_policy: &str,
        tools: &[ToolSchema],
    ) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(ModelRequest {
            history: history.to_vec(),
            system_policy: system_policy.to_owned(),
            tools: tools.iter().map(|tool| tool.name.clone()).collect(),
        });

        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(AppError::internal("model script exhausted")),
        }
    }
}

/// Final answer with no tool calls
pub fn text_response(text: &str) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::text(text)],
        stop_reason: StopReason::EndTurn,
        usage: None,
    }
}

/// Round with optional text followed by tool calls `(id, name, input)`
pub fn tool_response(text: Option<&str>, calls: Vec<(&str, &str, Value)>) -> LlmResponse {
    let mut content: Vec<ContentBlock> = text.map(ContentBlock::text).into_iter().collect();
    content.extend(calls.into_iter().map(|(id, name, input)| ContentBlock::ToolUse {
        id: id.to_owned(),
        name: name.to_owned(),
        input,
    }));
    LlmResponse {
        content,
        stop_reason: StopReason::ToolUse,
        usage: None,
    }
}

/// Tool result blocks `(tool_use_id, content, is_error)` of a message
pub fn tool_results(message: &ConversationMessage) -> Vec<(String, String, bool)> {
    message
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Some((tool_use_id.clone(), content.clone(), *is_error)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Workout Payloads
// ============================================================================

/// `create_workouts` arguments for a 10/20/5 minute easy 5K
pub fn easy_5k_args() -> Value {
    json!({
        "workouts": [{
            "workout_name": "Easy 5K",
            "steps": [
                {"step_type": "warmup", "duration_minutes": 10, "target_type": "no_target"},
                {
                    "step_type": "interval",
                    "duration_minutes": 20,
                    "target_type": "pace_range",
                    "target_lower_bound": 5.5,
                    "target_upper_bound": 6.0
                },
                {"step_type": "cooldown", "duration_minutes": 5, "target_type": "no_target"}
            ]
        }]
    })
}

/// One-step steady run
pub fn steady_run(name: &str, minutes: f64) -> Value {
    json!({
        "workout_name": name,
        "steps": [{
            "step_type": "interval",
            "duration_minutes": minutes,
            "target_type": "heart_rate_zone",
            "zone_number": 2
        }]
    })
}

// ============================================================================
// Fake Provider
// ============================================================================

/// In-memory remote platform
#[derive(Default)]
pub struct FakeProvider {
    /// Listing returned by `list_workouts`
    pub overviews: Vec<WorkoutOverview>,
    /// Workout returned by `get_workout`
    pub remote_workout: Option<Workout>,
    /// Every call fails with this HTTP status when set
    pub failing_status: Option<u16>,
    /// Bodies passed to `upload_workout`
    pub uploads: Mutex<Vec<Value>>,
}

impl FakeProvider {
    /// Provider whose every call fails with `status`
    pub fn failing(status: u16) -> Self {
        Self {
            failing_status: Some(status),
            ..Self::default()
        }
    }

    fn check(&self) -> ProviderResult<()> {
        match self.failing_status {
            Some(status) => Err(ProviderError::Status {
                provider: "Fake",
                status,
                body: "service unavailable".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkoutProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "Fake"
    }

    async fn list_workouts(&self, start: u32, limit: u32) -> ProviderResult<Vec<WorkoutOverview>> {
        self.check()?;
        Ok(self
            .overviews
            .iter()
            .skip(start as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_workout(&self, workout_id: u64) -> ProviderResult<Workout> {
        self.check()?;
        self.remote_workout
            .clone()
            .ok_or_else(|| ProviderError::NotFound {
                resource: "workout",
                id: workout_id.to_string(),
            })
    }

    async fn upload_workout(&self, wire: &Value) -> ProviderResult<Value> {
        self.check()?;
        self.uploads.lock().unwrap().push(wire.clone());
        Ok(json!({"workoutId": 9001}))
    }
}

/// Remote workout: 15 minute warmup then 30 minutes in zone 3
pub fn remote_tempo() -> Workout {
    let warmup = WorkoutStep::new(
        1,
        StepType::Warmup,
        EndCondition::time_minutes(15.0).unwrap(),
        IntensityTarget::NoTarget,
    )
    .unwrap();
    let tempo = WorkoutStep::new(
        2,
        StepType::Interval,
        EndCondition::time_minutes(30.0).unwrap(),
        IntensityTarget::HeartRateZone(HeartRateZoneTarget::new(3).unwrap()),
    )
    .unwrap();
    Workout::running("Remote Tempo", vec![warmup, tempo]).unwrap()
}
