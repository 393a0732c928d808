// ABOUTME: Tool implementations exposed to the workout planning model
// ABOUTME: Session workout tools and remote Garmin workout lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `create_workouts` / `retrieve_proposed_workouts` operate on the session
//!   workout registry
//! - `retrieve_remote_workouts` / `retrieve_remote_workout_details` delegate
//!   to the remote fitness platform

mod remote;
mod workouts;

pub use remote::{RetrieveRemoteWorkoutDetailsTool, RetrieveRemoteWorkoutsTool};
pub use workouts::{CreateWorkoutsTool, RetrieveProposedWorkoutsTool};
