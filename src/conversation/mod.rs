// ABOUTME: Tool-calling conversation layer for the workout planner
// ABOUTME: Orchestrator state machine, cancellation, and the replaceable continuation heuristic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Continuation heuristic
pub mod continuation;
/// Orchestrator state machine
pub mod orchestrator;

pub use continuation::{
    ContinuationHeuristic, PhraseContinuationHeuristic, DEFAULT_CONTINUATION_PHRASES,
    DEFAULT_SEQUENCE_UNITS,
};
pub use orchestrator::{
    summarize_created, CancellationFlag, ChatSummary, Orchestrator, TurnOutcome, TurnState,
    TurnStatus,
};
