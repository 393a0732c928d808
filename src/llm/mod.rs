// ABOUTME: Language model collaborator abstraction for the tool-calling workout conversation
// ABOUTME: Defines conversation messages, content blocks, tool schemas, and the LanguageModel trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Language Model Collaborator
//!
//! The orchestrator talks to a language model through the [`LanguageModel`]
//! trait. A request carries the full conversation history, a fixed system
//! policy and the tool schema catalogue; a response carries an ordered list
//! of content blocks (free text and tool invocations) plus a stop reason.
//!
//! Message and content block types serialize directly to the Anthropic
//! Messages wire shape, so history can be sent without translation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_workout_planner::llm::{ConversationMessage, LanguageModel};
//! use pierre_workout_planner::llm::prompts::WORKOUT_PLANNER_SYSTEM_PROMPT;
//!
//! async fn example(model: &dyn LanguageModel) {
//!     let history = vec![ConversationMessage::user_text("Build me an easy 5K")];
//!     let response = model.send(&history, WORKOUT_PLANNER_SYSTEM_PROMPT, &[]).await;
//! }
//! ```

mod anthropic;
pub mod prompts;

pub use anthropic::AnthropicProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppResult;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input, including tool results
    User,
    /// Model output
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One block of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Free text
    Text {
        /// Text content
        text: String,
    },
    /// Tool invocation emitted by the model
    ToolUse {
        /// Invocation id, echoed back by the matching tool result
        id: String,
        /// Tool name
        name: String,
        /// Tool arguments
        input: Value,
    },
    /// Tool output returned to the model
    ToolResult {
        /// Id of the invocation this answers
        tool_use_id: String,
        /// Text content of the result
        content: String,
        /// Whether the tool failed
        #[serde(default)]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Text block
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A single message in the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
}

impl ConversationMessage {
    /// User message with a single text block
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Assistant message with the given blocks
    #[must_use]
    pub const fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
        }
    }

    /// Combined tool-result turn, one block per invocation
    #[must_use]
    pub fn tool_results(results: Vec<ToolResultRecord>) -> Self {
        Self {
            role: MessageRole::User,
            content: results.into_iter().map(ContentBlock::from).collect(),
        }
    }

    /// Concatenated text blocks
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Outcome of one tool invocation, as fed back to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultRecord {
    /// Id of the invocation
    pub tool_call_id: String,
    /// Result text
    pub content: String,
    /// Whether the tool failed
    pub is_error: bool,
}

impl From<ToolResultRecord> for ContentBlock {
    fn from(record: ToolResultRecord) -> Self {
        Self::ToolResult {
            tool_use_id: record.tool_call_id,
            content: record.content,
            is_error: record.is_error,
        }
    }
}

// ============================================================================
// Tool Catalogue
// ============================================================================

/// Tool definition advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Description for model consumption
    pub description: String,
    /// JSON Schema of the arguments
    pub input_schema: Value,
}

/// A structured action request emitted by the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    /// Invocation id
    pub id: String,
    /// Tool name
    pub name: String,
    /// Tool arguments
    pub input: Value,
}

// ============================================================================
// Response Types
// ============================================================================

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Natural end of the answer
    EndTurn,
    /// The model wants tool results before continuing
    ToolUse,
    /// Output token limit reached
    MaxTokens,
    /// A stop sequence matched
    StopSequence,
    /// Anything else the API reports
    Other(String),
}

impl StopReason {
    /// Parse the wire value
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "end_turn" => Self::EndTurn,
            "tool_use" => Self::ToolUse,
            "max_tokens" => Self::MaxTokens,
            "stop_sequence" => Self::StopSequence,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EndTurn => "end_turn",
            Self::ToolUse => "tool_use",
            Self::MaxTokens => "max_tokens",
            Self::StopSequence => "stop_sequence",
            Self::Other(other) => other,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Input tokens
    pub input_tokens: u32,
    /// Output tokens
    pub output_tokens: u32,
}

/// Response from one model round
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// Ordered content blocks (text and tool invocations)
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    pub stop_reason: StopReason,
    /// Token usage when reported
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// Free-text parts in emission order
    #[must_use]
    pub fn text_parts(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tool invocations in emission order
    #[must_use]
    pub fn tool_invocations(&self) -> Vec<ToolInvocation> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolInvocation {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Collaborator Trait
// ============================================================================

/// Language model collaborator
///
/// One call per round. Implementations must not retain state between calls;
/// the orchestrator owns the history.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    /// Model identifier in use
    fn model(&self) -> &str;

    /// Send the full history with the system policy and tool catalogue
    ///
    /// # Errors
    ///
    /// Returns `AppError` for transport failures or unusable responses. These
    /// are the only failures that abort a conversation turn.
    async fn send(
        &self,
        history: &[ConversationMessage],
        system_policy: &str,
        tools: &[ToolSchema],
    ) -> AppResult<LlmResponse>;
}
