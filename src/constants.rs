// ABOUTME: Application constants for the workout planner: tool names, env vars, and defaults
// ABOUTME: Wire-format identifiers live in the pierre-workouts crate instead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity used in startup logs
pub mod service_names {
    /// Service name
    pub const WORKOUT_PLANNER: &str = "pierre-workout-planner";
}

/// Names of the tools exposed to the language model
pub mod tool_names {
    /// Build workouts and store them in the session registry
    pub const CREATE_WORKOUTS: &str = "create_workouts";
    /// Summarise workouts proposed so far in this session
    pub const RETRIEVE_PROPOSED_WORKOUTS: &str = "retrieve_proposed_workouts";
    /// List workouts stored on the fitness platform
    pub const RETRIEVE_REMOTE_WORKOUTS: &str = "retrieve_remote_workouts";
    /// Fetch one workout from the fitness platform
    pub const RETRIEVE_REMOTE_WORKOUT_DETAILS: &str = "retrieve_remote_workout_details";
}

/// Environment variable names
pub mod env_config {
    /// Language model API key
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    /// Language model API base URL
    pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";
    /// Model identifier
    pub const LLM_MODEL: &str = "PIERRE_LLM_MODEL";
    /// Max output tokens per model round
    pub const LLM_MAX_TOKENS: &str = "PIERRE_LLM_MAX_TOKENS";
    /// Garmin Connect API base URL
    pub const GARMIN_API_BASE_URL: &str = "GARMIN_API_BASE_URL";
    /// Pre-issued Garmin bearer token
    pub const GARMIN_ACCESS_TOKEN: &str = "GARMIN_ACCESS_TOKEN";
    /// Cap on model rounds per user turn
    pub const MAX_TOOL_ROUNDS: &str = "PIERRE_MAX_TOOL_ROUNDS";
    /// Cap on synthesized continuation turns per chat
    pub const MAX_CONTINUATIONS: &str = "PIERRE_MAX_CONTINUATIONS";
}

/// Default values used when configuration is absent
pub mod defaults {
    /// Default model identifier
    pub const LLM_MODEL: &str = "claude-sonnet-4-20250514";
    /// Default max output tokens per round
    pub const LLM_MAX_TOKENS: u32 = 20_000;
    /// Default Anthropic API base URL
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
    /// Anthropic API version header value
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
    /// Default Garmin Connect API base URL
    pub const GARMIN_API_BASE_URL: &str = "https://connectapi.garmin.com";
    /// Default cap on model rounds per user turn
    pub const MAX_TOOL_ROUNDS: usize = 10;
    /// Default cap on continuation turns per chat
    pub const MAX_CONTINUATIONS: usize = 10;
    /// Default page size for the remote workout listing
    pub const REMOTE_LIST_LIMIT: u32 = 20;
    /// HTTP timeout for collaborator requests, in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 120;
}

/// Fixed conversation text
pub mod messages {
    /// User message synthesized when an answer looks unfinished
    pub const CONTINUE_PROMPT: &str = "continue";
    /// Content returned by `retrieve_proposed_workouts` on an empty registry
    pub const NO_WORKOUTS_YET: &str = "No workouts have been created yet.";
    /// Stored in place of a model reply with no content blocks
    pub const EMPTY_MODEL_REPLY: &str = "(no response)";
}
