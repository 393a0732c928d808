// ABOUTME: Per-round execution context handed to tool handlers
// ABOUTME: Borrows the session workout registry and the remote provider, collects created workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_workouts::{Workout, WorkoutRegistry};

use crate::providers::WorkoutProvider;

/// Shared state for the tool invocations of one model round
///
/// Invocations run one after another against the same context, so a later
/// invocation sees registry changes made by an earlier one.
pub struct ToolContext<'a> {
    /// Session workout registry
    pub registry: &'a mut WorkoutRegistry,
    /// Remote fitness platform
    pub provider: &'a dyn WorkoutProvider,
    created: Vec<Workout>,
}

impl<'a> ToolContext<'a> {
    /// Build a context over session state
    #[must_use]
    pub fn new(registry: &'a mut WorkoutRegistry, provider: &'a dyn WorkoutProvider) -> Self {
        Self {
            registry,
            provider,
            created: Vec::new(),
        }
    }

    /// Record workouts accepted into the registry during this round
    pub fn record_created(&mut self, workouts: &[Workout]) {
        self.created.extend_from_slice(workouts);
    }

    /// Workouts recorded so far, in creation order
    #[must_use]
    pub fn created(&self) -> &[Workout] {
        &self.created
    }

    /// Consume the context and return the recorded workouts
    #[must_use]
    pub fn into_created(self) -> Vec<Workout> {
        self.created
    }
}
