// ABOUTME: System policy for the workout planning conversation loaded at compile time
// ABOUTME: Tells the model to structure workouts through tools and keep workout names unique
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Workout planner system policy sent with every model round
pub const WORKOUT_PLANNER_SYSTEM_PROMPT: &str = include_str!("workout_planner_system.md");

