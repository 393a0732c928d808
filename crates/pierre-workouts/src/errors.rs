// ABOUTME: Validation error type raised when constructing intensity targets, steps, and workouts
// ABOUTME: Each variant aborts only the construction of the single workout that carries it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised while building workout model values.
///
/// Construction of a workout fails as a whole when any of its parts fail;
/// callers building several workouts report these per workout and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Cadence lower bound must be strictly below the upper bound
    #[error("cadence lower bound {lower} must be less than upper bound {upper}")]
    InvalidCadenceRange {
        /// Lower bound in steps per minute
        lower: f64,
        /// Upper bound in steps per minute
        upper: f64,
    },

    /// Pace bounds are stored as speeds, so the lower bound must be the larger number
    #[error("pace lower bound {lower} m/s must be greater than upper bound {upper} m/s, and both positive")]
    InvalidPaceRange {
        /// Lower bound (faster speed) in meters per second
        lower: f64,
        /// Upper bound (slower speed) in meters per second
        upper: f64,
    },

    /// Heart rate zone outside 1..=5
    #[error("heart rate zone {zone} is outside the supported range 1-5")]
    InvalidHeartRateZone {
        /// Requested zone number
        zone: i64,
    },

    /// A bound was NaN or infinite
    #[error("{field} must be a finite number")]
    NonFiniteValue {
        /// Name of the offending field
        field: &'static str,
    },

    /// End condition values cannot be negative
    #[error("end condition value {value} must not be negative")]
    NegativeEndConditionValue {
        /// Offending value
        value: f64,
    },

    /// Step order must start at one
    #[error("step order {step_order} must be a positive integer")]
    NonPositiveStepOrder {
        /// Offending order
        step_order: u32,
    },

    /// Step orders must be unique and ascending within a segment
    #[error("step order {step_order} in segment {segment_order} does not follow {previous}")]
    StepOrderNotAscending {
        /// Segment the step belongs to
        segment_order: u32,
        /// Order of the preceding step
        previous: u32,
        /// Offending order
        step_order: u32,
    },

    /// Workout names are the registry key and cannot be blank
    #[error("workout name must not be empty")]
    EmptyWorkoutName,

    /// A workout with no steps cannot be executed on a device
    #[error("workout '{name}' has no steps")]
    EmptyWorkout {
        /// Workout name
        name: String,
    },
}

impl ValidationError {
    /// Fail with `NonFiniteValue` unless `value` is finite
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteValue` for NaN or infinite input.
    pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFiniteValue { field })
        }
    }
}
