// ABOUTME: Configuration module for the workout planner, loaded from environment variables
// ABOUTME: Groups language model, Garmin Connect, and conversation loop settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the workout planner
//!
//! Configuration is environment-only. Unset or unparseable optional values
//! fall back to the defaults in [`crate::constants::defaults`].

/// Environment-driven planner configuration
pub mod environment;

pub use environment::{GarminConfig, LlmConfig, LoopLimits, PlannerConfig};
