// ABOUTME: Structured workout model and Garmin Connect wire codec for the Pierre workout planner
// ABOUTME: Foundation crate with intensity targets, workout aggregates, codec, and the session registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workouts
//!
//! Synchronous foundation crate for structured running workouts. Nothing in
//! here performs I/O; the conversation layer and remote providers build on
//! top of these types.
//!
//! ## Modules
//!
//! - **intensity**: Closed set of intensity targets with bound validation
//! - **model**: `Workout` → `WorkoutSegment` → `WorkoutStep` aggregate
//! - **codec**: Encode/decode against the Garmin Connect workout JSON schema
//! - **overview**: Summary records returned by the remote workout listing
//! - **registry**: Name-keyed, append-only store of proposed workouts
//! - **constants**: Wire identifiers and unit conversion factors

/// Wire identifiers and unit conversion factors
pub mod constants;

/// Validation errors raised while constructing workouts
pub mod errors;

/// Intensity targets (no target, cadence, heart rate zone, pace zone)
pub mod intensity;

/// Workout aggregate model
pub mod model;

/// Garmin Connect workout wire codec
pub mod codec;

/// Remote workout overview records
pub mod overview;

/// Session-scoped workout registry with name uniqueness
pub mod registry;

pub use codec::{decode_workout, encode_workout};
pub use errors::ValidationError;
pub use intensity::{
    CadenceTarget, HeartRateZoneTarget, IntensityTarget, PaceZoneTarget, TargetFragment,
    TargetType,
};
pub use model::{
    EndCondition, EndConditionType, SportType, StepType, Workout, WorkoutSegment, WorkoutStep,
};
pub use overview::WorkoutOverview;
pub use registry::{InsertOutcome, WorkoutRegistry};
