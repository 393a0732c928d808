// ABOUTME: Anthropic Messages API implementation of the LanguageModel collaborator
// ABOUTME: Sends history, system policy, and tool catalogue; parses text and tool_use blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Anthropic Provider
//!
//! Non-streaming client for `POST {base_url}/messages`. Conversation history
//! serializes directly to the request body; response blocks other than
//! `text` and `tool_use` are ignored.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::{
    ContentBlock, ConversationMessage, LanguageModel, LlmResponse, StopReason, TokenUsage,
    ToolSchema,
};
use crate::config::LlmConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult, ErrorCode};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ConversationMessage],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolSchema],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    stop_reason: Option<String>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Messages API client
pub struct AnthropicProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a provider with default endpoint, model and token limit
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            api_key: api_key.into(),
            client: build_client()?,
            base_url: defaults::ANTHROPIC_BASE_URL.to_owned(),
            model: defaults::LLM_MODEL.to_owned(),
            max_tokens: defaults::LLM_MAX_TOKENS,
        })
    }

    /// Create a provider from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no API key is configured.
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key)?
            .with_base_url(&config.base_url)
            .with_model(&config.model)
            .with_max_tokens(config.max_tokens))
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-round output token limit
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    /// Map API error status to an error code
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<ErrorEnvelope>(response_text)
            .map_or_else(|_| response_text.to_owned(), |envelope| envelope.error.message);

        let code = match status {
            401 | 403 => ErrorCode::ExternalAuthFailed,
            429 => ErrorCode::ExternalRateLimited,
            500..=599 => ErrorCode::ExternalServiceUnavailable,
            _ => ErrorCode::ExternalServiceError,
        };
        AppError::new(code, format!("Anthropic API error ({status}): {message}"))
    }

    fn convert_response(response: MessagesResponse) -> LlmResponse {
        let content = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(ContentBlock::Text { text }),
                ResponseBlock::ToolUse { id, name, input } => {
                    Some(ContentBlock::ToolUse { id, name, input })
                }
                ResponseBlock::Unsupported => None,
            })
            .collect();

        LlmResponse {
            content,
            stop_reason: response
                .stop_reason
                .as_deref()
                .map_or(StopReason::EndTurn, StopReason::from_wire),
            usage: response.usage.map(|usage| TokenUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            }),
        }
    }
}

fn build_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))
}

#[async_trait]
impl LanguageModel for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(
        skip(self, history, system_policy, tools),
        fields(model = %self.model, messages = history.len())
    )]
    async fn send(
        &self,
        history: &[ConversationMessage],
        system_policy: &str,
        tools: &[ToolSchema],
    ) -> AppResult<LlmResponse> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: system_policy,
            messages: history,
            tools,
        };

        debug!(tools = tools.len(), "Sending request to Anthropic API");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", defaults::ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("HTTP request failed: {e}"),
                )
                .with_source(e)
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Anthropic API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let parsed: MessagesResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Anthropic response");
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse Anthropic response: {e}"),
            )
        })?;

        Ok(Self::convert_response(parsed))
    }
}

impl Debug for AnthropicProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnthropicProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let history = vec![ConversationMessage::user_text("Easy 5K please")];
        let tools = vec![ToolSchema {
            name: "retrieve_proposed_workouts".into(),
            description: "List workouts".into(),
            input_schema: json!({"type": "object", "properties": {}}),
        }];
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 20_000,
            system: "be brief",
            messages: &history,
            tools: &tools,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["tools"][0]["input_schema"]["type"], "object");
        assert_eq!(body["max_tokens"], 20_000);
    }

    #[test]
    fn test_response_parsing_skips_unknown_blocks() {
        let raw = json!({
            "id": "msg_01",
            "content": [
                {"type": "thinking", "thinking": "hmm", "signature": "x"},
                {"type": "text", "text": "Creating it now."},
                {"type": "tool_use", "id": "toolu_01", "name": "create_workouts", "input": {"workouts": []}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 12, "output_tokens": 34}
        });

        let parsed: MessagesResponse = serde_json::from_value(raw).unwrap();
        let response = AnthropicProvider::convert_response(parsed);

        assert_eq!(response.content.len(), 2);
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.tool_invocations()[0].id, "toolu_01");
        assert_eq!(response.usage.unwrap().output_tokens, 34);
    }

    #[test]
    fn test_error_status_mapping() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#;
        let error = AnthropicProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert!(error.message.contains("slow down"));

        let error = AnthropicProvider::map_api_error(529, "overloaded");
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    }
}
