// ABOUTME: Summary entry for a workout stored on Garmin Connect, as returned by the listing endpoint
// ABOUTME: Decoding reads only the fields the planner shows and ignores everything else
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::UNTITLED_WORKOUT;

/// One row of the remote workout listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutOverview {
    /// Remote workout id, used to fetch the full workout
    pub workout_id: Option<u64>,
    /// Remote owner id
    pub owner_id: Option<u64>,
    /// Workout name
    pub workout_name: String,
    /// Sport key such as `running`
    pub sport_type_key: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Creation timestamp as sent by the remote
    pub created_date: Option<String>,
    /// Last update timestamp as sent by the remote
    pub update_date: Option<String>,
    /// Remote duration estimate
    pub estimated_duration_secs: Option<u64>,
    /// Remote distance estimate
    pub estimated_distance_meters: Option<f64>,
}

impl WorkoutOverview {
    /// Read an overview from one element of the listing response
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            workout_id: value.get("workoutId").and_then(Value::as_u64),
            owner_id: value.get("ownerId").and_then(Value::as_u64),
            workout_name: text("workoutName")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_WORKOUT.to_owned()),
            sport_type_key: value
                .get("sportType")
                .and_then(|sport| sport.get("sportTypeKey"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            description: text("description"),
            created_date: text("createdDate"),
            update_date: text("updateDate"),
            estimated_duration_secs: value.get("estimatedDurationInSecs").and_then(Value::as_u64),
            estimated_distance_meters: value
                .get("estimatedDistanceInMeters")
                .and_then(Value::as_f64),
        }
    }

    /// Read every element of a listing response; a non-array yields nothing
    #[must_use]
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

impl Display for WorkoutOverview {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.workout_name)?;
        if let Some(id) = self.workout_id {
            write!(f, " [id {id}]")?;
        }
        if let Some(sport) = &self.sport_type_key {
            write!(f, " {sport}")?;
        }
        if let Some(secs) = self.estimated_duration_secs {
            write!(f, " ~{} min", secs / 60)?;
        }
        if let Some(created) = &self.created_date {
            write!(f, " created {created}")?;
        }
        Ok(())
    }
}
