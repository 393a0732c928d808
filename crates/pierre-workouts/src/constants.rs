// ABOUTME: Fixed identifiers from the Garmin Connect workout schema and unit conversion factors
// ABOUTME: These values are part of the external contract and must match the remote API exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Meters per second in one mile per hour
pub const MPS_PER_MPH: f64 = 0.44704;

/// Seconds per minute, used when converting tool durations to end condition values
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Meters per statute mile, used when rendering distance end conditions
pub const METERS_PER_MILE: f64 = 1609.344;

/// Step DTO type for executable (non-repeat) steps
pub const EXECUTABLE_STEP_DTO: &str = "ExecutableStepDTO";

/// Workout name used when the remote payload carries none
pub const UNTITLED_WORKOUT: &str = "Untitled Workout";

/// Lowest valid heart rate zone number
pub const MIN_HEART_RATE_ZONE: u8 = 1;

/// Highest valid heart rate zone number
pub const MAX_HEART_RATE_ZONE: u8 = 5;

/// Sport type identifiers
pub mod sport_type {
    /// Running sport type id
    pub const RUNNING_ID: u32 = 1;
    /// Running sport type key
    pub const RUNNING_KEY: &str = "running";
}

/// Step type identifiers (display order equals the id on the wire)
pub mod step_type {
    /// Warmup step id
    pub const WARMUP_ID: u32 = 1;
    /// Cooldown step id
    pub const COOLDOWN_ID: u32 = 2;
    /// Interval step id
    pub const INTERVAL_ID: u32 = 3;
    /// Recovery step id
    pub const RECOVERY_ID: u32 = 4;
    /// Rest step id
    pub const REST_ID: u32 = 5;
    /// Fallback step id
    pub const OTHER_ID: u32 = 7;
}

/// End condition identifiers
pub mod end_condition {
    /// Lap button press
    pub const LAP_BUTTON_ID: u32 = 1;
    /// Elapsed time in seconds
    pub const TIME_ID: u32 = 2;
    /// Distance in meters
    pub const DISTANCE_ID: u32 = 3;
    /// Calories burned
    pub const CALORIES_ID: u32 = 4;

    /// Lap button key
    pub const LAP_BUTTON_KEY: &str = "lap.button";
    /// Time key
    pub const TIME_KEY: &str = "time";
    /// Distance key
    pub const DISTANCE_KEY: &str = "distance";
    /// Calories key
    pub const CALORIES_KEY: &str = "calories";
}

/// Workout target type identifiers
pub mod target_type {
    /// No intensity target
    pub const NO_TARGET_ID: u32 = 1;
    /// Cadence range in steps per minute
    pub const CADENCE_ID: u32 = 3;
    /// Heart rate zone
    pub const HEART_RATE_ZONE_ID: u32 = 4;
    /// Pace zone expressed as speed in meters per second
    pub const PACE_ZONE_ID: u32 = 6;

    /// No target key
    pub const NO_TARGET_KEY: &str = "no.target";
    /// Cadence key
    pub const CADENCE_KEY: &str = "cadence";
    /// Heart rate zone key
    pub const HEART_RATE_ZONE_KEY: &str = "heart.rate.zone";
    /// Pace zone key
    pub const PACE_ZONE_KEY: &str = "pace.zone";
}
