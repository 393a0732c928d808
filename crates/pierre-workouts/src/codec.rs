// ABOUTME: Bidirectional mapping between the workout model and the Garmin Connect workout JSON
// ABOUTME: Encoding omits absent optional fields; decoding is permissive and never fails on drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Garmin Workout Codec
//!
//! [`encode_workout`] produces the JSON body accepted by the Garmin
//! workout-service. [`decode_workout`] reads workouts returned by that service
//! and tolerates schema drift: unknown step types become [`StepType::Other`],
//! unknown or incomplete targets become [`IntensityTarget::NoTarget`], unknown
//! end conditions become [`EndConditionType::LapButton`], and a missing
//! `endConditionValue` reads as `0.0`.
//!
//! Server-assigned fields such as `stepId` are written on encode (mirroring
//! `stepOrder`) and ignored on decode.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::{EXECUTABLE_STEP_DTO, UNTITLED_WORKOUT};
use crate::intensity::{IntensityTarget, TargetFragment, TargetType};
use crate::model::{
    EndCondition, EndConditionType, SportType, StepType, Workout, WorkoutSegment, WorkoutStep,
};

// ============================================================================
// Wire Types (encode)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireWorkout<'a> {
    sport_type: WireSportType,
    sub_sport_type: Option<&'a str>,
    workout_name: &'a str,
    estimated_distance_unit: WireDistanceUnit,
    workout_segments: Vec<WireSegment>,
    avg_training_speed: u32,
    estimated_duration_in_secs: u32,
    estimated_distance_in_meters: u32,
    estimate_type: Option<&'a str>,
    is_wheelchair: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireSportType {
    sport_type_id: u32,
    sport_type_key: &'static str,
    display_order: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireDistanceUnit {
    unit_key: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireSegment {
    segment_order: u32,
    sport_type: WireSportType,
    workout_steps: Vec<WireStep>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireStep {
    step_id: u32,
    step_order: u32,
    step_type: WireStepType,
    #[serde(rename = "type")]
    dto_type: &'static str,
    end_condition: WireEndCondition,
    end_condition_value: f64,
    target_type: WireTargetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_value_one: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_value_two: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_value_unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone_number: Option<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireStepType {
    step_type_id: u32,
    step_type_key: &'static str,
    display_order: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireEndCondition {
    condition_type_id: u32,
    condition_type_key: &'static str,
    display_order: u32,
    displayable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTargetType {
    workout_target_type_id: u32,
    workout_target_type_key: &'static str,
    display_order: u32,
}

impl From<SportType> for WireSportType {
    fn from(sport: SportType) -> Self {
        Self {
            sport_type_id: sport.id(),
            sport_type_key: sport.key(),
            display_order: sport.display_order(),
        }
    }
}

impl From<&WorkoutStep> for WireStep {
    fn from(step: &WorkoutStep) -> Self {
        let end_condition = step.end_condition();
        let condition_type = end_condition.condition_type();
        let fragment = step.intensity().wire_fragment();

        Self {
            step_id: step.step_order(),
            step_order: step.step_order(),
            step_type: WireStepType {
                step_type_id: step.step_type().id(),
                step_type_key: step.step_type().key(),
                display_order: step.step_type().display_order(),
            },
            dto_type: EXECUTABLE_STEP_DTO,
            end_condition: WireEndCondition {
                condition_type_id: condition_type.id(),
                condition_type_key: condition_type.key(),
                display_order: condition_type.display_order(),
                displayable: end_condition.displayable(),
            },
            end_condition_value: end_condition.value(),
            target_type: WireTargetType {
                workout_target_type_id: fragment.target_type.id(),
                workout_target_type_key: fragment.target_type.key(),
                display_order: fragment.target_type.display_order(),
            },
            target_value_one: fragment.value_one,
            target_value_two: fragment.value_two,
            // None of the supported targets carries a unit
            target_value_unit: None,
            zone_number: fragment.zone_number,
        }
    }
}

impl From<&WorkoutSegment> for WireSegment {
    fn from(segment: &WorkoutSegment) -> Self {
        Self {
            segment_order: segment.segment_order(),
            sport_type: segment.sport_type().into(),
            workout_steps: segment.steps().iter().map(WireStep::from).collect(),
        }
    }
}

/// Encode a workout as the Garmin Connect workout JSON body
///
/// # Errors
///
/// Returns the serialization error if the body cannot be represented as JSON.
pub fn encode_workout(workout: &Workout) -> Result<Value, serde_json::Error> {
    let wire = WireWorkout {
        sport_type: SportType::Running.into(),
        sub_sport_type: None,
        workout_name: workout.name(),
        estimated_distance_unit: WireDistanceUnit { unit_key: None },
        workout_segments: workout.segments().iter().map(WireSegment::from).collect(),
        // Garmin computes these server-side
        avg_training_speed: 0,
        estimated_duration_in_secs: 0,
        estimated_distance_in_meters: 0,
        estimate_type: None,
        is_wheelchair: false,
    };
    serde_json::to_value(&wire)
}

// ============================================================================
// Decode
// ============================================================================

/// Decode a Garmin Connect workout JSON document
///
/// Never fails: unrecognized or missing fields fall back to defaults.
#[must_use]
pub fn decode_workout(value: &Value) -> Workout {
    let name = value
        .get("workoutName")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNTITLED_WORKOUT);

    let segments = value
        .get("workoutSegments")
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .enumerate()
                .map(|(index, segment)| decode_segment(index, segment))
                .collect()
        })
        .unwrap_or_default();

    Workout::from_decoded(name.to_owned(), segments)
}

fn decode_segment(index: usize, segment: &Value) -> WorkoutSegment {
    let segment_order = read_u32(segment, "segmentOrder").unwrap_or_else(|| position(index));

    if let Some(key) = segment
        .get("sportType")
        .and_then(|sport| sport.get("sportTypeKey"))
        .and_then(Value::as_str)
    {
        if key != SportType::Running.key() {
            debug!(sport_type = key, "Decoding non-running segment as running");
        }
    }

    let mut steps: Vec<WorkoutStep> = segment
        .get("workoutSteps")
        .and_then(Value::as_array)
        .map(|steps| {
            steps
                .iter()
                .enumerate()
                .filter_map(|(index, step)| decode_step(index, step))
                .collect()
        })
        .unwrap_or_default();

    normalize_step_orders(segment_order, &mut steps);
    WorkoutSegment::from_decoded(segment_order, SportType::Running, steps)
}

fn decode_step(index: usize, step: &Value) -> Option<WorkoutStep> {
    match step.get("type").and_then(Value::as_str) {
        Some(EXECUTABLE_STEP_DTO) | None => {}
        Some(other) => {
            debug!(step_type = other, "Skipping non-executable workout step");
            return None;
        }
    }

    let step_order = read_u32(step, "stepOrder")
        .filter(|order| *order > 0)
        .unwrap_or_else(|| position(index));

    let step_type = step
        .get("stepType")
        .and_then(|step_type| step_type.get("stepTypeKey"))
        .and_then(Value::as_str)
        .and_then(StepType::from_key)
        .unwrap_or(StepType::Other);

    Some(WorkoutStep::from_decoded(
        step_order,
        step_type,
        decode_end_condition(step),
        decode_intensity(step),
    ))
}

fn decode_end_condition(step: &Value) -> EndCondition {
    let condition = step.get("endCondition");
    let condition_type = condition
        .and_then(|condition| condition.get("conditionTypeKey"))
        .and_then(Value::as_str)
        .and_then(EndConditionType::from_key)
        .unwrap_or(EndConditionType::LapButton);
    let displayable = condition
        .and_then(|condition| condition.get("displayable"))
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let value = match step.get("endConditionValue").and_then(Value::as_f64) {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!(value, "Invalid end condition value, defaulting to 0");
            0.0
        }
        None => 0.0,
    };

    EndCondition::from_decoded(condition_type, value).with_displayable(displayable)
}

fn decode_intensity(step: &Value) -> IntensityTarget {
    let target = step.get("targetType");
    let target_type = target
        .and_then(|target| target.get("workoutTargetTypeKey"))
        .and_then(Value::as_str)
        .and_then(TargetType::from_key)
        .or_else(|| {
            target
                .and_then(|target| target.get("workoutTargetTypeId"))
                .and_then(Value::as_u64)
                .and_then(TargetType::from_id)
        });

    let Some(target_type) = target_type else {
        return IntensityTarget::NoTarget;
    };

    let fragment = TargetFragment {
        target_type,
        value_one: step.get("targetValueOne").and_then(Value::as_f64),
        value_two: step.get("targetValueTwo").and_then(Value::as_f64),
        zone_number: step
            .get("zoneNumber")
            .and_then(Value::as_u64)
            .and_then(|zone| u8::try_from(zone).ok()),
    };

    match IntensityTarget::from_wire_fragment(&fragment) {
        Ok(Some(intensity)) => intensity,
        Ok(None) => {
            debug!(target = target_type.key(), "Target values missing, using no target");
            IntensityTarget::NoTarget
        }
        Err(err) => {
            warn!(
                target = target_type.key(),
                error = %err,
                "Invalid target values, using no target"
            );
            IntensityTarget::NoTarget
        }
    }
}

/// Restore unique ascending step orders when the remote payload violates them
fn normalize_step_orders(segment_order: u32, steps: &mut [WorkoutStep]) {
    let ascending = steps
        .windows(2)
        .all(|pair| pair[0].step_order() < pair[1].step_order());
    if ascending {
        return;
    }

    warn!(segment_order, "Remote step orders not ascending, renumbering");
    steps.sort_by_key(WorkoutStep::step_order);
    for (index, step) in steps.iter_mut().enumerate() {
        *step = WorkoutStep::from_decoded(
            position(index),
            step.step_type(),
            *step.end_condition(),
            *step.intensity(),
        );
    }
}

fn read_u32(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|number| u32::try_from(number).ok())
}

fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
