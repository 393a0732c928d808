// ABOUTME: Tool dispatch table for the workout planning conversation
// ABOUTME: Tool trait, capability flags, per-round context, results, errors, and implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Tools
//!
//! - `traits`: [`WorkoutTool`] and [`ToolCapabilities`]
//! - `registry`: [`ToolRegistry`], the name → handler dispatch table
//! - `context`: [`ToolContext`] over the session registry and remote provider
//! - `result` / `errors`: handler outcomes
//! - `implementations`: the four built-in tools

/// Per-round tool execution context
pub mod context;
/// Tool error types
pub mod errors;
/// Built-in tool implementations
pub mod implementations;
/// Tool dispatch table
pub mod registry;
/// Tool result type
pub mod result;
/// Tool trait and capability flags
pub mod traits;

pub use context::ToolContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{ToolCapabilities, WorkoutTool};
