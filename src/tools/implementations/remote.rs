// ABOUTME: Remote workout tools: retrieve_remote_workouts and retrieve_remote_workout_details
// ABOUTME: Delegate to the WorkoutProvider and render provider failures as error content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::error;

use crate::constants::{defaults, tool_names};
use crate::tools::context::ToolContext;
use crate::tools::errors::ToolError;
use crate::tools::result::ToolResult;
use crate::tools::traits::{ToolCapabilities, WorkoutTool};

/// Read an optional non-negative integer argument
fn optional_u32(tool: &str, args: &Value, key: &str) -> Result<Option<u32>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|number| u32::try_from(number).ok())
            .map(Some)
            .ok_or_else(|| {
                ToolError::invalid_parameter(tool, key, "must be a non-negative integer")
            }),
    }
}

/// Workout ids arrive as numbers or numeric strings
fn workout_id(tool: &str, args: &Value) -> Result<u64, ToolError> {
    match args.get("workout_id") {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, "workout_id")),
        Some(Value::Number(number)) => number.as_u64().ok_or_else(|| {
            ToolError::invalid_parameter(tool, "workout_id", "must be a positive integer")
        }),
        Some(Value::String(text)) => text.trim().parse().map_err(|_| {
            ToolError::invalid_parameter(tool, "workout_id", format!("'{text}' is not a number"))
        }),
        Some(_) => Err(ToolError::invalid_parameter(
            tool,
            "workout_id",
            "must be a positive integer",
        )),
    }
}

// ============================================================================
// retrieve_remote_workouts
// ============================================================================

/// Lists workouts saved on the remote platform
pub struct RetrieveRemoteWorkoutsTool;

#[async_trait]
impl WorkoutTool for RetrieveRemoteWorkoutsTool {
    fn name(&self) -> &'static str {
        tool_names::RETRIEVE_REMOTE_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "Retrieve the list of workouts already saved on the athlete's Garmin Connect account, \
         newest first."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "start": {
                    "type": "integer",
                    "description": "Index of the first workout to return (default 0)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of workouts to return (default 20)"
                }
            }
        })
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::REQUIRES_PROVIDER
    }

    async fn execute(
        &self,
        args: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let start = optional_u32(self.name(), &args, "start")?.unwrap_or(0);
        let limit = optional_u32(self.name(), &args, "limit")?
            .unwrap_or(defaults::REMOTE_LIST_LIMIT);

        match ctx.provider.list_workouts(start, limit).await {
            Ok(overviews) if overviews.is_empty() => Ok(ToolResult::text(format!(
                "No workouts found on {}.",
                ctx.provider.name()
            ))),
            Ok(overviews) => {
                let lines: Vec<String> = overviews
                    .iter()
                    .map(|overview| format!("- {overview}"))
                    .collect();
                Ok(ToolResult::text(format!(
                    "{} workouts on {}:\n{}",
                    overviews.len(),
                    ctx.provider.name(),
                    lines.join("\n")
                )))
            }
            Err(e) => {
                error!(error = %e, "Failed to list remote workouts");
                Ok(ToolResult::error(format!(
                    "Error retrieving remote workouts: {e}"
                )))
            }
        }
    }
}

// ============================================================================
// retrieve_remote_workout_details
// ============================================================================

/// Fetches and summarises one remote workout
pub struct RetrieveRemoteWorkoutDetailsTool;

#[async_trait]
impl WorkoutTool for RetrieveRemoteWorkoutDetailsTool {
    fn name(&self) -> &'static str {
        tool_names::RETRIEVE_REMOTE_WORKOUT_DETAILS
    }

    fn description(&self) -> &'static str {
        "Retrieve the full step structure of one workout saved on the athlete's Garmin Connect \
         account."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workout_id": {
                    "type": "integer",
                    "description": "Id of the workout, as listed by retrieve_remote_workouts"
                }
            },
            "required": ["workout_id"]
        })
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::REQUIRES_PROVIDER
    }

    async fn execute(
        &self,
        args: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let id = workout_id(self.name(), &args)?;

        match ctx.provider.get_workout(id).await {
            Ok(workout) => Ok(ToolResult::text(format!("Workout {id}:\n{workout}"))),
            Err(e) => {
                error!(workout_id = id, error = %e, "Failed to fetch remote workout");
                Ok(ToolResult::error(format!(
                    "Error retrieving workout {id}: {e}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_id_accepts_numeric_strings() {
        let tool = tool_names::RETRIEVE_REMOTE_WORKOUT_DETAILS;
        assert_eq!(workout_id(tool, &json!({"workout_id": 812_345})).unwrap(), 812_345);
        assert_eq!(workout_id(tool, &json!({"workout_id": " 42 "})).unwrap(), 42);
        assert_eq!(
            workout_id(tool, &json!({})).unwrap_err(),
            ToolError::missing_parameter(tool, "workout_id")
        );
        assert!(workout_id(tool, &json!({"workout_id": "abc"})).is_err());
    }

    #[test]
    fn test_optional_u32_rejects_negative() {
        let tool = tool_names::RETRIEVE_REMOTE_WORKOUTS;
        assert_eq!(optional_u32(tool, &json!({"limit": 5}), "limit").unwrap(), Some(5));
        assert_eq!(optional_u32(tool, &json!({}), "limit").unwrap(), None);
        assert!(optional_u32(tool, &json!({"limit": -1}), "limit").is_err());
    }
}
