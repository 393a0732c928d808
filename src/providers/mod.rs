// ABOUTME: Remote fitness platform collaborator used by the workout tools and uploads
// ABOUTME: Defines the WorkoutProvider trait and the Garmin Connect workout-service client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Providers
//!
//! The conversation layer never builds HTTP requests itself. It receives a
//! [`WorkoutProvider`] at construction time and calls it for remote listings,
//! remote details and uploads.

/// Provider error type
pub mod errors;

mod garmin;

pub use errors::{ProviderError, ProviderResult};
pub use garmin::GarminConnectClient;

use async_trait::async_trait;
use pierre_workouts::{Workout, WorkoutOverview};
use serde_json::Value;

/// Remote fitness platform that stores structured workouts
#[async_trait]
pub trait WorkoutProvider: Send + Sync {
    /// Provider name for logs and error messages
    fn name(&self) -> &'static str;

    /// List saved workouts, newest first
    async fn list_workouts(&self, start: u32, limit: u32) -> ProviderResult<Vec<WorkoutOverview>>;

    /// Fetch one saved workout and decode it
    async fn get_workout(&self, workout_id: u64) -> ProviderResult<Workout>;

    /// Upload an encoded workout and return the platform's response body
    async fn upload_workout(&self, wire: &Value) -> ProviderResult<Value>;
}
