// ABOUTME: Environment-based configuration for the language model, Garmin client, and loop bounds
// ABOUTME: Optional numeric values that fail to parse fall back to defaults with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::str::FromStr;

use tracing::{info, warn};

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Language model settings
#[derive(Clone)]
pub struct LlmConfig {
    /// API key, absent when the variable is unset
    pub api_key: Option<String>,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Max output tokens per model round
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Load from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var(env_config::ANTHROPIC_API_KEY),
            base_url: non_empty_var(env_config::ANTHROPIC_BASE_URL)
                .unwrap_or_else(|| defaults::ANTHROPIC_BASE_URL.to_owned()),
            model: non_empty_var(env_config::LLM_MODEL)
                .unwrap_or_else(|| defaults::LLM_MODEL.to_owned()),
            max_tokens: parse_or_default(env_config::LLM_MAX_TOKENS, defaults::LLM_MAX_TOKENS),
        }
    }

    /// API key, or a configuration error naming the missing variable
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `ANTHROPIC_API_KEY` is not set.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{} environment variable not set", env_config::ANTHROPIC_API_KEY),
            )
        })
    }
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Garmin Connect settings
#[derive(Clone)]
pub struct GarminConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Bearer token; remote tools report an error when absent
    pub access_token: Option<String>,
}

impl GarminConfig {
    /// Load from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var(env_config::GARMIN_API_BASE_URL)
                .unwrap_or_else(|| defaults::GARMIN_API_BASE_URL.to_owned()),
            access_token: non_empty_var(env_config::GARMIN_ACCESS_TOKEN),
        }
    }
}

impl Debug for GarminConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GarminConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Upper bounds on the conversation loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopLimits {
    /// Model rounds per user turn
    pub max_tool_rounds: usize,
    /// Synthesized continuation turns per chat
    pub max_continuations: usize,
}

impl Default for LoopLimits {
    fn default() -> Self {
        Self {
            max_tool_rounds: defaults::MAX_TOOL_ROUNDS,
            max_continuations: defaults::MAX_CONTINUATIONS,
        }
    }
}

impl LoopLimits {
    /// Load from environment; zero is treated as unset
    #[must_use]
    pub fn from_env() -> Self {
        let positive = |var: &str, default: usize| match parse_or_default(var, default) {
            0 => {
                warn!(var, default, "Loop limit must be positive, using default");
                default
            }
            value => value,
        };

        Self {
            max_tool_rounds: positive(env_config::MAX_TOOL_ROUNDS, defaults::MAX_TOOL_ROUNDS),
            max_continuations: positive(
                env_config::MAX_CONTINUATIONS,
                defaults::MAX_CONTINUATIONS,
            ),
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Language model settings
    pub llm: LlmConfig,
    /// Garmin Connect settings
    pub garmin: GarminConfig,
    /// Loop bounds
    pub limits: LoopLimits,
}

impl PlannerConfig {
    /// Load the full configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            llm: LlmConfig::from_env(),
            garmin: GarminConfig::from_env(),
            limits: LoopLimits::from_env(),
        };

        info!(
            model = %config.llm.model,
            max_tokens = config.llm.max_tokens,
            garmin.configured = config.garmin.access_token.is_some(),
            max_tool_rounds = config.limits.max_tool_rounds,
            max_continuations = config.limits.max_continuations,
            "Planner configuration loaded"
        );
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + Debug,
{
    match non_empty_var(name) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, ?default, "Unparseable value, using default");
            default
        }),
    }
}
