// ABOUTME: Tool dispatch table mapping tool names to handlers for the workout conversation
// ABOUTME: Advertises tool schemas and turns each invocation into exactly one tool result record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Central dispatch table for workout tools, providing:
//! - Tool registration and lookup
//! - Schema generation for the model's tool catalogue
//! - Dispatch that always yields a result record, even for unknown tools or
//!   failing handlers, so every tool invocation is answered

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::context::ToolContext;
use super::errors::ToolError;
use super::implementations::{
    CreateWorkoutsTool, RetrieveProposedWorkoutsTool, RetrieveRemoteWorkoutDetailsTool,
    RetrieveRemoteWorkoutsTool,
};
use super::result::ToolResult;
use super::traits::WorkoutTool;
use crate::llm::{ToolInvocation, ToolResultRecord, ToolSchema};
use crate::logging::AppLogger;

/// Name-keyed table of tools available to the model
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn WorkoutTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with the four workout tools
    #[must_use]
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CreateWorkoutsTool));
        registry.register(Arc::new(RetrieveProposedWorkoutsTool));
        registry.register(Arc::new(RetrieveRemoteWorkoutsTool));
        registry.register(Arc::new(RetrieveRemoteWorkoutDetailsTool));
        registry
    }

    /// Register a tool
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn WorkoutTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!(tool.name = %name, "Tool already registered, keeping the first");
            return false;
        }

        debug!(
            tool.name = %name,
            capabilities = %tool.capabilities().describe(),
            "Registered tool"
        );
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn WorkoutTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool catalogue sorted by name
    #[must_use]
    pub fn all_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|tool| tool.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute one invocation and pair the outcome with its id
    ///
    /// Unknown tools and handler errors become error records. This never
    /// fails.
    pub async fn dispatch(
        &self,
        invocation: &ToolInvocation,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResultRecord {
        let started = Instant::now();

        let result = if let Some(tool) = self.tools.get(&invocation.name) {
            debug!(
                tool.name = %invocation.name,
                tool.call_id = %invocation.id,
                "Dispatching tool call"
            );
            match tool.execute(invocation.input.clone(), ctx).await {
                Ok(result) => result,
                Err(error) => {
                    warn!(tool.name = %error.tool_name(), error = %error, "Tool call rejected");
                    ToolResult::error(error.to_string())
                }
            }
        } else {
            warn!(tool.name = %invocation.name, "Model invoked an unknown tool");
            ToolResult::error(ToolError::not_found(&invocation.name).to_string())
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_tool_call(
            &invocation.name,
            &invocation.id,
            result.is_error,
            duration_ms,
        );
        result.into_record(&invocation.id)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_default_tools()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ToolRegistry")
            .field("tools", &names)
            .finish()
    }
}
