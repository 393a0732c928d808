// ABOUTME: Garmin Connect workout-service client implementing the WorkoutProvider trait
// ABOUTME: Lists, fetches, and uploads workouts with a pre-issued bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use pierre_workouts::{decode_workout, Workout, WorkoutOverview};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::errors::{ProviderError, ProviderResult};
use super::WorkoutProvider;
use crate::config::GarminConfig;
use crate::constants::defaults;

const PROVIDER: &str = "Garmin";
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Garmin Connect workout-service client
pub struct GarminConnectClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl GarminConnectClient {
    /// Create a client for the given API base and token
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            access_token,
        })
    }

    /// Create a client from loaded configuration
    ///
    /// A missing token is not an error here; each call reports it instead so
    /// the conversation can carry on without remote access.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &GarminConfig) -> ProviderResult<Self> {
        Self::new(&config.base_url, config.access_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> ProviderResult<RequestBuilder> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })?;
        Ok(request.bearer_auth(token))
    }

    async fn send_json(&self, request: RequestBuilder) -> ProviderResult<Value> {
        let response = self
            .authorized(request)?
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        if !status.is_success() {
            error!(status = %status, "Garmin API error");
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        if body.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
            provider: PROVIDER,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl WorkoutProvider for GarminConnectClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip(self))]
    async fn list_workouts(&self, start: u32, limit: u32) -> ProviderResult<Vec<WorkoutOverview>> {
        let request = self
            .client
            .get(self.url("/workout-service/workouts"))
            .query(&[("start", start), ("limit", limit)]);
        let body = self.send_json(request).await?;

        if !body.is_array() {
            return Err(ProviderError::Parse {
                provider: PROVIDER,
                reason: "expected a JSON array of workouts".to_owned(),
            });
        }

        let overviews = WorkoutOverview::list_from_value(&body);
        debug!(count = overviews.len(), "Listed remote workouts");
        Ok(overviews)
    }

    #[instrument(skip(self))]
    async fn get_workout(&self, workout_id: u64) -> ProviderResult<Workout> {
        let request = self
            .client
            .get(self.url(&format!("/workout-service/workout/{workout_id}")));
        let body = match self.send_json(request).await {
            Err(ProviderError::Status { status: 404, .. }) => {
                return Err(ProviderError::NotFound {
                    resource: "workout",
                    id: workout_id.to_string(),
                })
            }
            other => other?,
        };

        if !body.is_object() {
            return Err(ProviderError::Parse {
                provider: PROVIDER,
                reason: format!("workout {workout_id} response was not an object"),
            });
        }
        Ok(decode_workout(&body))
    }

    #[instrument(skip(self, wire))]
    async fn upload_workout(&self, wire: &Value) -> ProviderResult<Value> {
        let request = self
            .client
            .post(self.url("/workout-service/workout"))
            .json(wire);
        let response = self.send_json(request).await?;
        info!(
            workout_id = ?response.get("workoutId"),
            "Uploaded workout to Garmin Connect"
        );
        Ok(response)
    }
}

impl Debug for GarminConnectClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GarminConnectClient")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}
