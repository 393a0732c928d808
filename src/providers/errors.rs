// ABOUTME: Error type for remote fitness platform calls made on behalf of workout tools
// ABOUTME: Distinguishes transport, HTTP status, parse, credential, and not-found failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::errors::{AppError, ErrorCode};

/// Failures talking to the remote fitness platform
///
/// Tool handlers render these as error content for the model. Only
/// user-driven actions such as uploads convert them into [`AppError`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never produced a response
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider name
        provider: &'static str,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status code
    #[error("{provider} API returned {status}: {body}")]
    Status {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("{provider} response could not be parsed: {reason}")]
    Parse {
        /// Provider name
        provider: &'static str,
        /// Parser message
        reason: String,
    },

    /// No token configured for the provider
    #[error("{provider} credentials are not configured")]
    MissingCredentials {
        /// Provider name
        provider: &'static str,
    },

    /// Requested resource does not exist
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// Resource kind
        resource: &'static str,
        /// Requested identifier
        id: String,
    },
}

impl ProviderError {
    /// Error code reported when this failure reaches a caller
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::Status { status: 401 | 403, .. } | Self::MissingCredentials { .. } => {
                ErrorCode::ExternalAuthFailed
            }
            Self::Status { status: 429, .. } => ErrorCode::ExternalRateLimited,
            Self::Status { .. } | Self::Parse { .. } => ErrorCode::ExternalServiceError,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        Self::new(code, message).with_source(error)
    }
}

/// Result alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;
