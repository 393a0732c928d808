// ABOUTME: Conversation orchestrator driving model rounds, sequential tool execution, and continuations
// ABOUTME: Owns the session workout registry and history; bounded by tool-round and continuation caps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Conversation Orchestrator
//!
//! One orchestrator per session. A turn moves through
//! `AwaitingUser → AwaitingModel → ExecutingTools → AwaitingModel … → Done`.
//! Tool invocations of a round run strictly in emission order against the
//! same registry; their results go back to the model as one combined turn.
//!
//! Only a failing model call or cancellation aborts a turn. Tool failures,
//! unknown tools and remote errors become error content for the model.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pierre_workouts::{encode_workout, Workout, WorkoutRegistry};
use serde_json::Value;
use tracing::{info, warn};

use super::continuation::{ContinuationHeuristic, PhraseContinuationHeuristic};
use crate::config::{LoopLimits, PlannerConfig};
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::WORKOUT_PLANNER_SYSTEM_PROMPT;
use crate::llm::{AnthropicProvider, ContentBlock, ConversationMessage, LanguageModel};
use crate::logging::AppLogger;
use crate::providers::{GarminConnectClient, WorkoutProvider};
use crate::tools::{ToolContext, ToolRegistry};

// ============================================================================
// Cancellation
// ============================================================================

/// Shared cancellation flag, checked before every model round
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// New, not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the running turn
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation so the session can continue
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ============================================================================
// Turn Types
// ============================================================================

/// Where the orchestrator is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the next user message
    AwaitingUser,
    /// A model request is pending
    AwaitingModel,
    /// Tool invocations of the current round are running
    ExecutingTools,
    /// The last turn finished
    Done,
}

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// The model stopped requesting tools
    Completed,
    /// The round cap was hit while the model still requested tools
    Truncated,
}

/// Result of one user turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Free text accumulated across the turn's rounds
    pub text: String,
    /// Workouts accepted into the registry during the turn
    pub created: Vec<Workout>,
    /// Completion status
    pub status: TurnStatus,
    /// Model rounds used
    pub rounds: usize,
}

/// Result of a user message including any synthesized continuations
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    /// "Created N workouts" listing when any were created, otherwise the free text
    pub summary: String,
    /// Workouts created across all turns, in creation order
    pub workouts: Vec<Workout>,
    /// Free text of all turns
    pub text: String,
    /// Synthesized continuation turns issued
    pub continuations: usize,
    /// Whether a round or continuation cap cut the answer short
    pub truncated: bool,
}

/// "Created N workouts:" followed by one numbered name per line
#[must_use]
pub fn summarize_created(workouts: &[Workout]) -> String {
    let header = format!("Created {} workouts:", workouts.len());
    let lines: Vec<String> = workouts
        .iter()
        .enumerate()
        .map(|(index, workout)| format!("{}. {}", index + 1, workout.name()))
        .collect();
    if lines.is_empty() {
        header
    } else {
        format!("{header}\n{}", lines.join("\n"))
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives a single conversation session
pub struct Orchestrator {
    model: Box<dyn LanguageModel>,
    provider: Arc<dyn WorkoutProvider>,
    tools: ToolRegistry,
    heuristic: Box<dyn ContinuationHeuristic>,
    registry: WorkoutRegistry,
    history: Vec<ConversationMessage>,
    system_policy: String,
    limits: LoopLimits,
    cancellation: CancellationFlag,
    state: TurnState,
}

impl Orchestrator {
    /// Orchestrator with the default tools, heuristic, policy and limits
    #[must_use]
    pub fn new(model: Box<dyn LanguageModel>, provider: Arc<dyn WorkoutProvider>) -> Self {
        Self {
            model,
            provider,
            tools: ToolRegistry::with_default_tools(),
            heuristic: Box::new(PhraseContinuationHeuristic::new()),
            registry: WorkoutRegistry::new(),
            history: Vec::new(),
            system_policy: WORKOUT_PLANNER_SYSTEM_PROMPT.to_owned(),
            limits: LoopLimits::default(),
            cancellation: CancellationFlag::new(),
            state: TurnState::AwaitingUser,
        }
    }

    /// Anthropic model and Garmin Connect provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the model credential is missing or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &PlannerConfig) -> AppResult<Self> {
        let model = AnthropicProvider::from_config(&config.llm)?;
        let provider = GarminConnectClient::from_config(&config.garmin)?;
        Ok(Self::new(Box::new(model), Arc::new(provider)).with_limits(config.limits))
    }

    /// Override round and continuation caps
    #[must_use]
    pub const fn with_limits(mut self, limits: LoopLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the continuation heuristic
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Box<dyn ContinuationHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replace the tool dispatch table
    #[must_use]
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Replace the system policy
    #[must_use]
    pub fn with_system_policy(mut self, policy: impl Into<String>) -> Self {
        self.system_policy = policy.into();
        self
    }

    /// Share an externally owned cancellation flag
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Handle for cancelling running turns
    #[must_use]
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Conversation history
    #[must_use]
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Snapshot of every workout created in this session
    #[must_use]
    pub fn workouts(&self) -> Vec<Workout> {
        self.registry.get_all()
    }

    /// Session workout registry
    #[must_use]
    pub const fn registry(&self) -> &WorkoutRegistry {
        &self.registry
    }

    /// Run one user turn until the model stops requesting tools
    ///
    /// # Errors
    ///
    /// Returns the model's error when a model call fails, or `Cancelled`
    /// when the cancellation flag is set before a round.
    pub async fn chat_turn(&mut self, message: &str) -> AppResult<TurnOutcome> {
        self.history.push(ConversationMessage::user_text(message));
        let result = self.run_rounds().await;
        self.state = match result {
            Ok(_) => TurnState::Done,
            Err(_) => TurnState::AwaitingUser,
        };
        result
    }

    async fn run_rounds(&mut self) -> AppResult<TurnOutcome> {
        let schemas = self.tools.all_schemas();
        let mut text = String::new();
        let mut created = Vec::new();

        for round in 1..=self.limits.max_tool_rounds {
            if self.cancellation.is_cancelled() {
                warn!(round, "Turn cancelled");
                return Err(AppError::cancelled("conversation turn cancelled"));
            }

            self.state = TurnState::AwaitingModel;
            let response = self
                .model
                .send(&self.history, &self.system_policy, &schemas)
                .await?;

            let round_text: String = response.text_parts().concat();
            let invocations = response.tool_invocations();
            AppLogger::log_model_round(
                round,
                response.stop_reason.as_str(),
                invocations.len(),
                round_text.len(),
            );
            text.push_str(&round_text);
            // the Messages API rejects an empty assistant turn anywhere but last
            let content = if response.content.is_empty() {
                warn!(round, "Model reply had no content blocks");
                vec![ContentBlock::text(messages::EMPTY_MODEL_REPLY)]
            } else {
                response.content
            };
            self.history.push(ConversationMessage::assistant(content));

            if invocations.is_empty() {
                return Ok(TurnOutcome {
                    text,
                    created,
                    status: TurnStatus::Completed,
                    rounds: round,
                });
            }

            self.state = TurnState::ExecutingTools;
            let mut ctx = ToolContext::new(&mut self.registry, self.provider.as_ref());
            let mut records = Vec::with_capacity(invocations.len());
            for invocation in &invocations {
                records.push(self.tools.dispatch(invocation, &mut ctx).await);
            }
            created.extend(ctx.into_created());
            self.history.push(ConversationMessage::tool_results(records));
        }

        warn!(
            max_tool_rounds = self.limits.max_tool_rounds,
            "Model still requesting tools at the round cap, truncating turn"
        );
        Ok(TurnOutcome {
            text,
            created,
            status: TurnStatus::Truncated,
            rounds: self.limits.max_tool_rounds,
        })
    }

    /// Run a turn and keep continuing while the answer looks unfinished
    ///
    /// # Errors
    ///
    /// Propagates the first failing turn's error.
    pub async fn chat(&mut self, message: &str) -> AppResult<ChatSummary> {
        let mut input = message.to_owned();
        let mut texts: Vec<String> = Vec::new();
        let mut workouts = Vec::new();
        let mut continuations = 0;
        let mut truncated = false;

        loop {
            let outcome = self.chat_turn(&input).await?;
            workouts.extend(outcome.created);
            let signal = self.heuristic.continuation_signal(&outcome.text);
            if !outcome.text.trim().is_empty() {
                texts.push(outcome.text.trim().to_owned());
            }

            if outcome.status == TurnStatus::Truncated {
                truncated = true;
                break;
            }
            let Some(signal) = signal else {
                break;
            };
            if continuations >= self.limits.max_continuations {
                warn!(
                    max_continuations = self.limits.max_continuations,
                    "Continuation cap reached, answer may be incomplete"
                );
                truncated = true;
                break;
            }

            continuations += 1;
            AppLogger::log_continuation(continuations, &signal);
            messages::CONTINUE_PROMPT.clone_into(&mut input);
        }

        let text = texts.join("\n\n");
        let summary = if workouts.is_empty() {
            text.clone()
        } else {
            summarize_created(&workouts)
        };
        info!(
            workouts = workouts.len(),
            continuations, truncated, "Chat complete"
        );

        Ok(ChatSummary {
            summary,
            workouts,
            text,
            continuations,
            truncated,
        })
    }

    /// Encode a registered workout and upload it to the remote platform
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown name, or the provider's
    /// failure mapped into `AppError`.
    pub async fn upload_workout(&self, name: &str) -> AppResult<Value> {
        let workout = self
            .registry
            .get(name)
            .ok_or_else(|| AppError::not_found(format!("workout '{name}'")))?;
        let wire = encode_workout(workout)?;
        let response = self.provider.upload_workout(&wire).await?;
        info!(workout = %name, provider = self.provider.name(), "Workout uploaded");
        Ok(response)
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("model", &self.model.model())
            .field("provider", &self.provider.name())
            .field("tools", &self.tools)
            .field("workouts", &self.registry.len())
            .field("history", &self.history.len())
            .field("limits", &self.limits)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let handle = flag.clone();
        handle.cancel();
        assert!(flag.is_cancelled());
        flag.reset();
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn test_summary_of_no_workouts() {
        assert_eq!(summarize_created(&[]), "Created 0 workouts:");
    }
}
