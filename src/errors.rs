// ABOUTME: Unified application error type with stable error codes for the workout planner
// ABOUTME: Only model transport failures, configuration problems and cancellation escape a turn
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError` pairs a stable [`ErrorCode`] with a message and an optional
//! source. Tool handlers never hand `AppError` back to the conversation; they
//! turn failures into error tool results. The caller of a turn only sees
//! language-model failures, cancellation and configuration problems, plus
//! upload failures from [`crate::conversation::Orchestrator::upload_workout`].

use std::error::Error as StdError;
use std::fmt;

use pierre_workouts::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes, serialized in `SCREAMING_SNAKE_CASE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation
    InvalidInput,
    /// Named resource does not exist
    ResourceNotFound,
    /// Remote service answered with an error
    ExternalServiceError,
    /// Remote service could not be reached
    ExternalServiceUnavailable,
    /// Remote service rejected the credentials
    ExternalAuthFailed,
    /// Remote service throttled the request
    ExternalRateLimited,
    /// The caller cancelled the turn
    Cancelled,
    /// Required configuration value missing
    ConfigMissing,
    /// Unexpected internal failure
    InternalError,
    /// JSON encoding or decoding failed
    SerializationError,
}

impl ErrorCode {
    /// Short human-readable category
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service returned an error",
            Self::ExternalServiceUnavailable => "An external service is unavailable",
            Self::ExternalAuthFailed => "Authentication with an external service failed",
            Self::ExternalRateLimited => "An external service rate limit was reached",
            Self::Cancelled => "The operation was cancelled",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization failed",
        }
    }
}

/// Crate-level error returned to callers of the orchestrator
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// `{resource} not found`
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Unexpected internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Turn cancelled by the caller
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Cancelled, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result alias using `AppError`
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::new(ErrorCode::InvalidInput, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description() {
        let error = AppError::cancelled("stopped before round 3");
        assert_eq!(
            error.to_string(),
            "The operation was cancelled: stopped before round 3"
        );
    }

    #[test]
    fn test_validation_error_maps_to_invalid_input() {
        let error = AppError::from(ValidationError::EmptyWorkoutName);
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_error_code_wire_names() {
        let json = serde_json::to_string(&ErrorCode::ExternalRateLimited).unwrap();
        assert_eq!(json, "\"EXTERNAL_RATE_LIMITED\"");
    }
}
