// ABOUTME: Workout aggregate model (Workout, WorkoutSegment, WorkoutStep, EndCondition)
// ABOUTME: Constructors enforce step ordering and value invariants; Display renders readable summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Model
//!
//! `Workout` → `WorkoutSegment` → `WorkoutStep`, each step carrying an
//! [`EndCondition`] and an [`IntensityTarget`]. All invariants are checked in
//! the constructors, so a value of these types is always encodable.

use std::fmt::{self, Display, Formatter};

use crate::constants::{end_condition, sport_type, step_type, METERS_PER_MILE, SECONDS_PER_MINUTE};
use crate::errors::ValidationError;
use crate::intensity::IntensityTarget;

/// Sport of a workout segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SportType {
    /// Running (the only sport the planner builds)
    #[default]
    Running,
}

impl SportType {
    /// Numeric id on the wire
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Running => sport_type::RUNNING_ID,
        }
    }

    /// String key on the wire
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Running => sport_type::RUNNING_KEY,
        }
    }

    /// Display order on the wire
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }
}

/// Role of a step within a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    /// Warmup
    Warmup,
    /// Main work interval
    Interval,
    /// Active recovery between intervals
    Recovery,
    /// Cooldown
    Cooldown,
    /// Standing rest
    Rest,
    /// Anything the remote schema knows that the planner does not
    Other,
}

impl StepType {
    /// Numeric id on the wire
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Warmup => step_type::WARMUP_ID,
            Self::Cooldown => step_type::COOLDOWN_ID,
            Self::Interval => step_type::INTERVAL_ID,
            Self::Recovery => step_type::RECOVERY_ID,
            Self::Rest => step_type::REST_ID,
            Self::Other => step_type::OTHER_ID,
        }
    }

    /// String key on the wire
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Interval => "interval",
            Self::Recovery => "recovery",
            Self::Cooldown => "cooldown",
            Self::Rest => "rest",
            Self::Other => "other",
        }
    }

    /// Display order on the wire (mirrors the id)
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }

    /// Look up a step type by key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "warmup" => Some(Self::Warmup),
            "interval" => Some(Self::Interval),
            "recovery" => Some(Self::Recovery),
            "cooldown" => Some(Self::Cooldown),
            "rest" => Some(Self::Rest),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for StepType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a step ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndConditionType {
    /// Athlete presses the lap button
    LapButton,
    /// Elapsed seconds
    Time,
    /// Meters covered
    Distance,
    /// Calories burned
    Calories,
}

impl EndConditionType {
    /// Numeric id on the wire
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::LapButton => end_condition::LAP_BUTTON_ID,
            Self::Time => end_condition::TIME_ID,
            Self::Distance => end_condition::DISTANCE_ID,
            Self::Calories => end_condition::CALORIES_ID,
        }
    }

    /// String key on the wire
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LapButton => end_condition::LAP_BUTTON_KEY,
            Self::Time => end_condition::TIME_KEY,
            Self::Distance => end_condition::DISTANCE_KEY,
            Self::Calories => end_condition::CALORIES_KEY,
        }
    }

    /// Display order on the wire (mirrors the id)
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }

    /// Look up an end condition type by key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            end_condition::LAP_BUTTON_KEY => Some(Self::LapButton),
            end_condition::TIME_KEY => Some(Self::Time),
            end_condition::DISTANCE_KEY => Some(Self::Distance),
            end_condition::CALORIES_KEY => Some(Self::Calories),
            _ => None,
        }
    }
}

/// End condition of a step
///
/// `value` is seconds for time, meters for distance and lap button, and
/// kilocalories for calories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndCondition {
    condition_type: EndConditionType,
    value: f64,
    displayable: bool,
}

impl EndCondition {
    /// Create an end condition (displayable by default)
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when `value` is not finite or is negative.
    pub fn new(condition_type: EndConditionType, value: f64) -> Result<Self, ValidationError> {
        let value = ValidationError::ensure_finite("end condition value", value)?;
        if value < 0.0 {
            return Err(ValidationError::NegativeEndConditionValue { value });
        }
        Ok(Self {
            condition_type,
            value,
            displayable: true,
        })
    }

    /// Codec-only constructor; the caller has already clamped `value`
    pub(crate) const fn from_decoded(condition_type: EndConditionType, value: f64) -> Self {
        Self {
            condition_type,
            value,
            displayable: true,
        }
    }

    /// Time-based end condition from a duration in minutes
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when `minutes` is not finite or is negative.
    pub fn time_minutes(minutes: f64) -> Result<Self, ValidationError> {
        Self::new(EndConditionType::Time, minutes * SECONDS_PER_MINUTE)
    }

    /// Override the displayable flag
    #[must_use]
    pub const fn with_displayable(mut self, displayable: bool) -> Self {
        self.displayable = displayable;
        self
    }

    /// Condition type
    #[must_use]
    pub const fn condition_type(&self) -> EndConditionType {
        self.condition_type
    }

    /// Raw value in the condition's unit
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Whether the device shows the condition
    #[must_use]
    pub const fn displayable(&self) -> bool {
        self.displayable
    }
}

impl Display for EndCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.condition_type {
            EndConditionType::Time => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let seconds = self.value.round() as u64;
                write!(f, "{}:{:02}", seconds / 60, seconds % 60)
            }
            EndConditionType::Distance => write!(f, "{:.2} mi", self.value / METERS_PER_MILE),
            EndConditionType::Calories => write!(f, "{:.0} kcal", self.value),
            EndConditionType::LapButton => write!(f, "until lap button"),
        }
    }
}

/// A single executable step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutStep {
    step_order: u32,
    step_type: StepType,
    end_condition: EndCondition,
    intensity: IntensityTarget,
}

impl WorkoutStep {
    /// Create a step
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveStepOrder` when `step_order` is zero.
    pub fn new(
        step_order: u32,
        step_type: StepType,
        end_condition: EndCondition,
        intensity: IntensityTarget,
    ) -> Result<Self, ValidationError> {
        if step_order == 0 {
            return Err(ValidationError::NonPositiveStepOrder { step_order });
        }
        Ok(Self {
            step_order,
            step_type,
            end_condition,
            intensity,
        })
    }

    pub(crate) const fn from_decoded(
        step_order: u32,
        step_type: StepType,
        end_condition: EndCondition,
        intensity: IntensityTarget,
    ) -> Self {
        Self {
            step_order,
            step_type,
            end_condition,
            intensity,
        }
    }

    /// Position of the step within its segment (starting at 1)
    #[must_use]
    pub const fn step_order(&self) -> u32 {
        self.step_order
    }

    /// Step role
    #[must_use]
    pub const fn step_type(&self) -> StepType {
        self.step_type
    }

    /// End condition
    #[must_use]
    pub const fn end_condition(&self) -> &EndCondition {
        &self.end_condition
    }

    /// Intensity target
    #[must_use]
    pub const fn intensity(&self) -> &IntensityTarget {
        &self.intensity
    }
}

impl Display for WorkoutStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {} @ {}",
            self.step_order, self.step_type, self.end_condition, self.intensity
        )
    }
}

/// Ordered run of steps for one sport
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSegment {
    segment_order: u32,
    sport_type: SportType,
    steps: Vec<WorkoutStep>,
}

impl WorkoutSegment {
    /// Create a segment
    ///
    /// # Errors
    ///
    /// Returns `StepOrderNotAscending` when step orders repeat or go backwards.
    pub fn new(
        segment_order: u32,
        sport_type: SportType,
        steps: Vec<WorkoutStep>,
    ) -> Result<Self, ValidationError> {
        for pair in steps.windows(2) {
            if pair[1].step_order <= pair[0].step_order {
                return Err(ValidationError::StepOrderNotAscending {
                    segment_order,
                    previous: pair[0].step_order,
                    step_order: pair[1].step_order,
                });
            }
        }
        Ok(Self {
            segment_order,
            sport_type,
            steps,
        })
    }

    /// Steps must already be renumbered into ascending order
    pub(crate) const fn from_decoded(
        segment_order: u32,
        sport_type: SportType,
        steps: Vec<WorkoutStep>,
    ) -> Self {
        Self {
            segment_order,
            sport_type,
            steps,
        }
    }

    /// Position of the segment within the workout
    #[must_use]
    pub const fn segment_order(&self) -> u32 {
        self.segment_order
    }

    /// Sport of the segment
    #[must_use]
    pub const fn sport_type(&self) -> SportType {
        self.sport_type
    }

    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> &[WorkoutStep] {
        &self.steps
    }
}

/// A named workout, the unit stored in the registry and uploaded to Garmin
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    name: String,
    segments: Vec<WorkoutSegment>,
}

impl Workout {
    /// Create a workout
    ///
    /// # Errors
    ///
    /// Returns `EmptyWorkoutName` when the name is blank and `EmptyWorkout`
    /// when no segment carries a step.
    pub fn new(
        name: impl Into<String>,
        segments: Vec<WorkoutSegment>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyWorkoutName);
        }
        if segments.iter().all(|segment| segment.steps.is_empty()) {
            return Err(ValidationError::EmptyWorkout { name });
        }
        Ok(Self { name, segments })
    }

    pub(crate) const fn from_decoded(name: String, segments: Vec<WorkoutSegment>) -> Self {
        Self { name, segments }
    }

    /// Single-segment running workout
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a blank name, no steps, or misordered steps.
    pub fn running(
        name: impl Into<String>,
        steps: Vec<WorkoutStep>,
    ) -> Result<Self, ValidationError> {
        let segment = WorkoutSegment::new(1, SportType::Running, steps)?;
        Self::new(name, vec![segment])
    }

    /// Workout name (registry key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments in execution order
    #[must_use]
    pub fn segments(&self) -> &[WorkoutSegment] {
        &self.segments
    }

    /// Total number of steps across all segments
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.steps.len()).sum()
    }

    /// Sum of all time-based end conditions in seconds (`0.0` when none)
    #[must_use]
    pub fn timed_duration_secs(&self) -> f64 {
        self.segments
            .iter()
            .flat_map(|segment| segment.steps.iter())
            .filter(|step| step.end_condition.condition_type == EndConditionType::Time)
            .fold(0.0, |total, step| total + step.end_condition.value)
    }
}

impl Display for Workout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let minutes = (self.timed_duration_secs() / SECONDS_PER_MINUTE).round();
        write!(
            f,
            "{} ({} steps, {minutes:.0} min timed)",
            self.name,
            self.step_count()
        )?;
        for step in self.segments.iter().flat_map(|segment| segment.steps.iter()) {
            write!(f, "\n  {step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(order: u32, step_type: StepType, minutes: f64) -> WorkoutStep {
        WorkoutStep::new(
            order,
            step_type,
            EndCondition::time_minutes(minutes).unwrap(),
            IntensityTarget::NoTarget,
        )
        .unwrap()
    }

    #[test]
    fn test_segment_rejects_repeated_step_order() {
        let steps = vec![timed(1, StepType::Warmup, 10.0), timed(1, StepType::Cooldown, 5.0)];
        let err = WorkoutSegment::new(1, SportType::Running, steps).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StepOrderNotAscending {
                segment_order: 1,
                previous: 1,
                step_order: 1,
            }
        );
    }

    #[test]
    fn test_workout_display_lists_steps() {
        let workout = Workout::running(
            "Easy 5K",
            vec![timed(1, StepType::Warmup, 10.0), timed(2, StepType::Cooldown, 5.0)],
        )
        .unwrap();

        let rendered = workout.to_string();
        assert!(rendered.starts_with("Easy 5K (2 steps, 15 min timed)"));
        assert!(rendered.contains("1. warmup 10:00 @ no target"));
        assert!(rendered.contains("2. cooldown 5:00 @ no target"));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            Workout::running("   ", Vec::new()).unwrap_err(),
            ValidationError::EmptyWorkoutName
        );
    }

    #[test]
    fn test_workout_without_steps_rejected() {
        assert_eq!(
            Workout::running("Nothing", Vec::new()).unwrap_err(),
            ValidationError::EmptyWorkout {
                name: "Nothing".to_owned()
            }
        );
    }

    #[test]
    fn test_untimed_workout_reports_zero_minutes() {
        let lap = WorkoutStep::new(
            1,
            StepType::Interval,
            EndCondition::new(EndConditionType::LapButton, 0.0).unwrap(),
            IntensityTarget::NoTarget,
        )
        .unwrap();
        let workout = Workout::running("Fartlek", vec![lap]).unwrap();

        assert!(workout.timed_duration_secs().is_sign_positive());
        assert!(workout.to_string().starts_with("Fartlek (1 steps, 0 min timed)"));
    }
}
