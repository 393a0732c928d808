// ABOUTME: Tool-specific error types raised while dispatching model tool invocations
// ABOUTME: Rendered back to the model as error content, never surfaced to the caller of a turn
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! A `ToolError` never aborts a conversation turn. The dispatch table turns
//! it into a tool result with `is_error` set so the model can correct its
//! request.

use thiserror::Error;

/// Rejection of a single tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The model invoked a name absent from the dispatch table
    #[error("Error: Unknown tool '{tool}'")]
    NotFound {
        /// Requested tool name
        tool: String,
    },

    /// An argument is present but unusable
    #[error("Error: Invalid parameter '{parameter}' for tool '{tool}': {reason}")]
    InvalidParameter {
        /// Tool name
        tool: String,
        /// Argument name
        parameter: String,
        /// What is wrong with it
        reason: String,
    },

    /// A required argument is absent or null
    #[error("Error: Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingParameter {
        /// Tool name
        tool: String,
        /// Argument name
        parameter: String,
    },
}

impl ToolError {
    /// Unknown tool name
    #[must_use]
    pub fn not_found(tool: impl Into<String>) -> Self {
        Self::NotFound { tool: tool.into() }
    }

    /// Unusable argument
    #[must_use]
    pub fn invalid_parameter(
        tool: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool: tool.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Absent argument
    #[must_use]
    pub fn missing_parameter(tool: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool: tool.into(),
            parameter: parameter.into(),
        }
    }

    /// Tool the rejected invocation targeted
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool }
            | Self::InvalidParameter { tool, .. }
            | Self::MissingParameter { tool, .. } => tool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_address_the_model() {
        let error = ToolError::invalid_parameter("create_workouts", "workouts", "must be an array");
        assert_eq!(
            error.to_string(),
            "Error: Invalid parameter 'workouts' for tool 'create_workouts': must be an array"
        );
        assert_eq!(error.tool_name(), "create_workouts");
    }
}
