// ABOUTME: Main library entry point for the Pierre workout planner
// ABOUTME: Tool-calling conversation that turns running workout requests into Garmin workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Planner
//!
//! A conversation orchestrator that lets a language model build structured
//! running workouts through tool calls, keeps them in a session registry
//! with unique names, and uploads them to Garmin Connect on request.
//!
//! ## Architecture
//!
//! - **`pierre_workouts`** (workspace crate): intensity targets, the workout
//!   aggregate, the Garmin wire codec and the workout registry
//! - **llm**: the language model collaborator and the Anthropic client
//! - **providers**: the remote fitness collaborator and the Garmin client
//! - **tools**: the tool dispatch table and its four tools
//! - **conversation**: the orchestrator state machine and continuation heuristic
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_workout_planner::config::PlannerConfig;
//! use pierre_workout_planner::conversation::Orchestrator;
//! use pierre_workout_planner::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PlannerConfig::from_env();
//!     let mut orchestrator = Orchestrator::from_config(&config)?;
//!
//!     let chat = orchestrator.chat("An easy 5K with a short warmup").await?;
//!     println!("{}", chat.summary);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Conversation orchestrator and continuation heuristic
pub mod conversation;

/// Unified error handling
pub mod errors;

/// Language model collaborator
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Remote fitness platform collaborator
pub mod providers;

/// Tool dispatch table
pub mod tools;

pub use pierre_workouts;
