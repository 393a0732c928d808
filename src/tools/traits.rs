// ABOUTME: Defines the WorkoutTool trait and ToolCapabilities flags for the dispatch table
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Tool Trait and Capabilities
//!
//! Every tool the model can call implements [`WorkoutTool`]:
//! - metadata (name, description, input schema) advertised to the model
//! - capability flags used for logging and discovery
//! - async execution against the session [`ToolContext`]

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use super::context::ToolContext;
use super::errors::ToolError;
use super::result::ToolResult;
use crate::llm::ToolSchema;

bitflags! {
    /// Capabilities that tools declare
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads session or remote data
        const READS_DATA = 0b0000_0001;
        /// Tool mutates the workout registry
        const WRITES_DATA = 0b0000_0010;
        /// Tool calls the remote fitness platform
        const REQUIRES_PROVIDER = 0b0000_0100;
    }
}

impl ToolCapabilities {
    /// Check if tool calls the remote fitness platform
    #[must_use]
    pub const fn requires_provider(self) -> bool {
        self.contains(Self::REQUIRES_PROVIDER)
    }

    /// Lowercase flag names for logging, or `none`
    #[must_use]
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "none".to_owned();
        }
        self.iter_names()
            .map(|(name, _)| name.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A tool the language model can invoke
///
/// Handlers report recoverable problems either as an error [`ToolResult`]
/// (when they have useful content for the model) or as a [`ToolError`]
/// (rendered by the dispatch table). Neither aborts the turn.
#[async_trait]
pub trait WorkoutTool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &'static str;

    /// Description for model consumption
    fn description(&self) -> &'static str;

    /// JSON Schema of the arguments
    fn input_schema(&self) -> Value;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute with the invocation arguments
    async fn execute(
        &self,
        args: Value,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolResult, ToolError>;

    /// Schema advertised to the model
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            input_schema: self.input_schema(),
        }
    }
}
