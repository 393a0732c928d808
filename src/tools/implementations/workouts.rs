// ABOUTME: Session workout tools: create_workouts and retrieve_proposed_workouts
// ABOUTME: Validates each requested workout independently and enforces unique names via the registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_workouts::{
    CadenceTarget, EndCondition, HeartRateZoneTarget, IntensityTarget, PaceZoneTarget, StepType,
    Workout, WorkoutStep,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::constants::{messages, tool_names};
use crate::tools::context::ToolContext;
use crate::tools::errors::ToolError;
use crate::tools::result::ToolResult;
use crate::tools::traits::{ToolCapabilities, WorkoutTool};

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Deserialize)]
struct WorkoutRequest {
    workout_name: String,
    steps: Vec<StepRequest>,
}

#[derive(Debug, Deserialize)]
struct StepRequest {
    step_type: String,
    duration_minutes: f64,
    target_type: String,
    #[serde(default)]
    zone_number: Option<i64>,
    #[serde(default)]
    target_lower_bound: Option<f64>,
    #[serde(default)]
    target_upper_bound: Option<f64>,
}

impl StepRequest {
    fn step_type(&self) -> Result<StepType, String> {
        StepType::from_key(&self.step_type)
            .filter(|step_type| *step_type != StepType::Other)
            .ok_or_else(|| format!("unknown step_type '{}'", self.step_type))
    }

    fn bounds(&self) -> Result<(f64, f64), String> {
        match (self.target_lower_bound, self.target_upper_bound) {
            (Some(lower), Some(upper)) => Ok((lower, upper)),
            _ => Err(format!(
                "target_type '{}' needs target_lower_bound and target_upper_bound",
                self.target_type
            )),
        }
    }

    fn intensity(&self) -> Result<IntensityTarget, String> {
        let target = match self.target_type.as_str() {
            "no_target" => IntensityTarget::NoTarget,
            "heart_rate_zone" => {
                let zone = self
                    .zone_number
                    .ok_or_else(|| "target_type 'heart_rate_zone' needs zone_number".to_owned())?;
                IntensityTarget::HeartRateZone(
                    HeartRateZoneTarget::new(zone).map_err(|e| e.to_string())?,
                )
            }
            "cadence_range" => {
                let (lower, upper) = self.bounds()?;
                IntensityTarget::Cadence(
                    CadenceTarget::new(lower, upper).map_err(|e| e.to_string())?,
                )
            }
            "pace_range" => {
                let (slow_mph, fast_mph) = self.bounds()?;
                IntensityTarget::PaceZone(
                    PaceZoneTarget::from_mph(slow_mph, fast_mph).map_err(|e| e.to_string())?,
                )
            }
            other => return Err(format!("unknown target_type '{other}'")),
        };
        Ok(target)
    }
}

impl WorkoutRequest {
    fn into_workout(self) -> Result<Workout, String> {
        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let position = index + 1;
            let built = step.step_type().and_then(|step_type| {
                let end_condition =
                    EndCondition::time_minutes(step.duration_minutes).map_err(|e| e.to_string())?;
                let step_order = u32::try_from(position).map_err(|e| e.to_string())?;
                WorkoutStep::new(step_order, step_type, end_condition, step.intensity()?)
                    .map_err(|e| e.to_string())
            });
            steps.push(built.map_err(|reason| format!("step {position}: {reason}"))?);
        }
        Workout::running(self.workout_name, steps).map_err(|e| e.to_string())
    }
}

/// Label for a rejected item: its name when one can be read
fn item_label(item: &Value, index: usize) -> String {
    item.get("workout_name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map_or_else(|| format!("workout #{}", index + 1), str::to_owned)
}

fn render_workouts(workouts: &[Workout]) -> String {
    workouts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// create_workouts
// ============================================================================

/// Builds workouts from the model's structured description
pub struct CreateWorkoutsTool;

#[async_trait]
impl WorkoutTool for CreateWorkoutsTool {
    fn name(&self) -> &'static str {
        tool_names::CREATE_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "Create one or more structured running workouts with warmup, intervals, and cooldown. \
         Workouts with higher intensities (e.g. zone 4 or 5 heart rate) should start with a \
         1 mile warmup and cooldown. Steady runs and long runs should be a single interval \
         throughout."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workouts": {
                    "type": "array",
                    "description": "Workouts to create",
                    "items": {
                        "type": "object",
                        "properties": {
                            "workout_name": {
                                "type": "string",
                                "description": "Name of the workout. Must be unique. Never include week information; describe the workout instead."
                            },
                            "steps": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "step_type": {
                                            "type": "string",
                                            "enum": ["warmup", "interval", "recovery", "cooldown", "rest"]
                                        },
                                        "duration_minutes": {
                                            "type": "number",
                                            "description": "Duration of the step in minutes"
                                        },
                                        "target_type": {
                                            "type": "string",
                                            "enum": ["no_target", "heart_rate_zone", "cadence_range", "pace_range"]
                                        },
                                        "zone_number": {
                                            "type": "integer",
                                            "description": "Heart rate zone 1-5 for heart_rate_zone targets"
                                        },
                                        "target_lower_bound": {
                                            "type": "number",
                                            "description": "Lower bound of the target range. MPH for pace, steps per minute for cadence."
                                        },
                                        "target_upper_bound": {
                                            "type": "number",
                                            "description": "Upper bound of the target range. MPH for pace, steps per minute for cadence."
                                        }
                                    },
                                    "required": ["step_type", "duration_minutes", "target_type"]
                                }
                            }
                        },
                        "required": ["workout_name", "steps"]
                    }
                }
            },
            "required": ["workouts"]
        })
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA
    }

    async fn execute(
        &self,
        args: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let items = match args.get("workouts") {
            None | Some(Value::Null) => {
                return Err(ToolError::missing_parameter(self.name(), "workouts"))
            }
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(ToolError::invalid_parameter(
                    self.name(),
                    "workouts",
                    "must contain at least one workout",
                ))
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ToolError::invalid_parameter(
                    self.name(),
                    "workouts",
                    "must be an array",
                ))
            }
        };

        let mut candidates = Vec::with_capacity(items.len());
        let mut rejected = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let built = serde_json::from_value::<WorkoutRequest>(item.clone())
                .map_err(|e| e.to_string())
                .and_then(WorkoutRequest::into_workout);
            match built {
                Ok(workout) => candidates.push(workout),
                Err(reason) => {
                    let label = item_label(item, index);
                    warn!(workout = %label, reason = %reason, "Rejected invalid workout");
                    rejected.push(format!("- {label}: {reason}"));
                }
            }
        }

        let outcome = ctx.registry.insert_batch(candidates);
        ctx.record_created(&outcome.accepted);

        let mut sections = Vec::new();
        if !outcome.accepted.is_empty() {
            sections.push(format!(
                "Created {} workouts:\n\n{}",
                outcome.accepted.len(),
                render_workouts(&outcome.accepted)
            ));
        }
        if outcome.has_duplicates() {
            warn!(duplicates = ?outcome.duplicates, "Duplicate workout names");
            sections.push(format!(
                "Error: Workout names must be unique. The following names already exist: {}",
                outcome.duplicates.join(", ")
            ));
        }
        if !rejected.is_empty() {
            sections.push(format!(
                "Error: {} workouts were invalid and were not created:\n{}",
                rejected.len(),
                rejected.join("\n")
            ));
        }

        info!(
            accepted = outcome.accepted.len(),
            duplicates = outcome.duplicates.len(),
            rejected = rejected.len(),
            "Processed create_workouts"
        );

        let content = sections.join("\n\n");
        if outcome.has_duplicates() || !rejected.is_empty() {
            Ok(ToolResult::error(content))
        } else {
            Ok(ToolResult::text(content))
        }
    }
}

// ============================================================================
// retrieve_proposed_workouts
// ============================================================================

/// Summarises every workout created in this session
pub struct RetrieveProposedWorkoutsTool;

#[async_trait]
impl WorkoutTool for RetrieveProposedWorkoutsTool {
    fn name(&self) -> &'static str {
        tool_names::RETRIEVE_PROPOSED_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "Retrieve all previously created workouts. Returns a summary of all workouts that have \
         been created in this session."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(
        &self,
        _args: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let workouts = ctx.registry.get_all();
        if workouts.is_empty() {
            return Ok(ToolResult::text(messages::NO_WORKOUTS_YET));
        }
        Ok(ToolResult::text(format!(
            "{} created total.\n\n{}",
            workouts.len(),
            render_workouts(&workouts)
        )))
    }
}
