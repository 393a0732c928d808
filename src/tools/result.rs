// ABOUTME: ToolResult returned by tool handlers before it is paired with an invocation id
// ABOUTME: Carries text content for the model and an error flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::llm::ToolResultRecord;

/// Output of one tool handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Text returned to the model
    pub content: String,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Successful text result
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: false,
        }
    }

    /// Error text result
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
        }
    }

    /// Pair with the invocation id it answers
    #[must_use]
    pub fn into_record(self, tool_call_id: impl Into<String>) -> ToolResultRecord {
        ToolResultRecord {
            tool_call_id: tool_call_id.into(),
            content: self.content,
            is_error: self.is_error,
        }
    }
}
