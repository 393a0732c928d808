// ABOUTME: Closed set of workout intensity targets with construction-time bound validation
// ABOUTME: Each variant produces its own Garmin target fragment; pace bounds are inverted speeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intensity Targets
//!
//! A step's intensity is one of four variants. The codec never probes for
//! optional attributes; it asks the variant for its [`TargetFragment`] and
//! emits exactly the fields the fragment carries.
//!
//! ## Pace inversion
//!
//! Garmin stores pace zones as speeds in meters per second. The bound that
//! users think of as the "lower" pace (the faster one) is the numerically
//! larger speed, so [`PaceZoneTarget`] requires `lower_bound > upper_bound`.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::constants::{
    target_type, MAX_HEART_RATE_ZONE, METERS_PER_MILE, MIN_HEART_RATE_ZONE, MPS_PER_MPH,
};
use crate::errors::ValidationError;

/// Target type discriminant as known to the remote schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// No intensity target
    NoTarget,
    /// Cadence range
    Cadence,
    /// Heart rate zone
    HeartRateZone,
    /// Pace (speed) zone
    PaceZone,
}

impl TargetType {
    /// Numeric id on the wire
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::NoTarget => target_type::NO_TARGET_ID,
            Self::Cadence => target_type::CADENCE_ID,
            Self::HeartRateZone => target_type::HEART_RATE_ZONE_ID,
            Self::PaceZone => target_type::PACE_ZONE_ID,
        }
    }

    /// String key on the wire
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NoTarget => target_type::NO_TARGET_KEY,
            Self::Cadence => target_type::CADENCE_KEY,
            Self::HeartRateZone => target_type::HEART_RATE_ZONE_KEY,
            Self::PaceZone => target_type::PACE_ZONE_KEY,
        }
    }

    /// Display order on the wire (mirrors the id)
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }

    /// Look up a target type by its wire key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            target_type::NO_TARGET_KEY => Some(Self::NoTarget),
            target_type::CADENCE_KEY => Some(Self::Cadence),
            target_type::HEART_RATE_ZONE_KEY => Some(Self::HeartRateZone),
            target_type::PACE_ZONE_KEY => Some(Self::PaceZone),
            _ => None,
        }
    }

    /// Look up a target type by its wire id
    #[must_use]
    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::NoTarget),
            3 => Some(Self::Cadence),
            4 => Some(Self::HeartRateZone),
            6 => Some(Self::PaceZone),
            _ => None,
        }
    }
}

/// Target sub-object and companion step fields produced by one intensity variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFragment {
    /// Target type discriminant
    pub target_type: TargetType,
    /// `targetValueOne` when the variant carries one
    pub value_one: Option<f64>,
    /// `targetValueTwo` when the variant carries one
    pub value_two: Option<f64>,
    /// `zoneNumber` when the variant carries one
    pub zone_number: Option<u8>,
}

impl TargetFragment {
    const fn bare(target_type: TargetType) -> Self {
        Self {
            target_type,
            value_one: None,
            value_two: None,
            zone_number: None,
        }
    }
}

/// Cadence range in steps per minute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CadenceTarget {
    lower_bound: f64,
    upper_bound: f64,
}

impl CadenceTarget {
    /// Create a cadence range
    ///
    /// # Errors
    ///
    /// Returns `InvalidCadenceRange` unless `lower_bound < upper_bound`.
    pub fn new(lower_bound: f64, upper_bound: f64) -> Result<Self, ValidationError> {
        let lower = ValidationError::ensure_finite("cadence lower bound", lower_bound)?;
        let upper = ValidationError::ensure_finite("cadence upper bound", upper_bound)?;
        if lower >= upper {
            return Err(ValidationError::InvalidCadenceRange { lower, upper });
        }
        Ok(Self {
            lower_bound: lower,
            upper_bound: upper,
        })
    }

    /// Lower cadence bound (steps/min)
    #[must_use]
    pub const fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Upper cadence bound (steps/min)
    #[must_use]
    pub const fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Wire fragment: `targetValueOne` = lower, `targetValueTwo` = upper
    #[must_use]
    pub const fn wire_fragment(&self) -> TargetFragment {
        TargetFragment {
            target_type: TargetType::Cadence,
            value_one: Some(self.lower_bound),
            value_two: Some(self.upper_bound),
            zone_number: None,
        }
    }
}

/// Heart rate zone between 1 and 5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRateZoneTarget {
    zone_number: u8,
}

impl HeartRateZoneTarget {
    /// Create a heart rate zone target
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeartRateZone` when the zone is outside 1..=5.
    pub fn new(zone_number: i64) -> Result<Self, ValidationError> {
        match u8::try_from(zone_number) {
            Ok(zone) if (MIN_HEART_RATE_ZONE..=MAX_HEART_RATE_ZONE).contains(&zone) => Ok(Self {
                zone_number: zone,
            }),
            _ => Err(ValidationError::InvalidHeartRateZone {
                zone: zone_number,
            }),
        }
    }

    /// Zone number
    #[must_use]
    pub const fn zone_number(&self) -> u8 {
        self.zone_number
    }

    /// Wire fragment: only `zoneNumber`
    #[must_use]
    pub const fn wire_fragment(&self) -> TargetFragment {
        TargetFragment {
            target_type: TargetType::HeartRateZone,
            value_one: None,
            value_two: None,
            zone_number: Some(self.zone_number),
        }
    }
}

/// Pace zone stored as speeds in meters per second
///
/// `lower_bound` is the faster speed and `upper_bound` the slower one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceZoneTarget {
    lower_bound: f64,
    upper_bound: f64,
}

impl PaceZoneTarget {
    /// Create a pace zone from speeds in meters per second
    ///
    /// # Errors
    ///
    /// Returns `InvalidPaceRange` unless `lower_bound > upper_bound > 0`.
    pub fn new(lower_bound: f64, upper_bound: f64) -> Result<Self, ValidationError> {
        let lower = ValidationError::ensure_finite("pace lower bound", lower_bound)?;
        let upper = ValidationError::ensure_finite("pace upper bound", upper_bound)?;
        if lower <= upper || upper <= 0.0 {
            return Err(ValidationError::InvalidPaceRange { lower, upper });
        }
        Ok(Self {
            lower_bound: lower,
            upper_bound: upper,
        })
    }

    /// Create a pace zone from a speed range in miles per hour
    ///
    /// `slow_mph` is the smaller speed and `fast_mph` the larger. After
    /// conversion the slower speed becomes `upper_bound` and the faster
    /// speed becomes `lower_bound`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPaceRange` unless `0 < slow_mph < fast_mph`.
    pub fn from_mph(slow_mph: f64, fast_mph: f64) -> Result<Self, ValidationError> {
        let slow = ValidationError::ensure_finite("pace lower bound", slow_mph)?;
        let fast = ValidationError::ensure_finite("pace upper bound", fast_mph)?;
        Self::new(fast * MPS_PER_MPH, slow * MPS_PER_MPH)
    }

    /// Faster speed bound (m/s)
    #[must_use]
    pub const fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Slower speed bound (m/s)
    #[must_use]
    pub const fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Wire fragment: `targetValueOne` = slower speed, `targetValueTwo` = faster speed
    #[must_use]
    pub const fn wire_fragment(&self) -> TargetFragment {
        TargetFragment {
            target_type: TargetType::PaceZone,
            value_one: Some(self.upper_bound),
            value_two: Some(self.lower_bound),
            zone_number: None,
        }
    }
}

/// Intensity of a single workout step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IntensityTarget {
    /// Run by feel
    #[default]
    NoTarget,
    /// Cadence range
    Cadence(CadenceTarget),
    /// Heart rate zone
    HeartRateZone(HeartRateZoneTarget),
    /// Pace zone
    PaceZone(PaceZoneTarget),
}

impl IntensityTarget {
    /// Discriminant of this target
    #[must_use]
    pub const fn target_type(&self) -> TargetType {
        match self {
            Self::NoTarget => TargetType::NoTarget,
            Self::Cadence(_) => TargetType::Cadence,
            Self::HeartRateZone(_) => TargetType::HeartRateZone,
            Self::PaceZone(_) => TargetType::PaceZone,
        }
    }

    /// Target sub-object and optional step fields for the wire format
    #[must_use]
    pub const fn wire_fragment(&self) -> TargetFragment {
        match self {
            Self::NoTarget => TargetFragment::bare(TargetType::NoTarget),
            Self::Cadence(target) => target.wire_fragment(),
            Self::HeartRateZone(target) => target.wire_fragment(),
            Self::PaceZone(target) => target.wire_fragment(),
        }
    }

    /// Rebuild a target from a wire fragment
    ///
    /// Returns `Ok(None)` when the fragment lacks the values its type needs.
    ///
    /// # Errors
    ///
    /// Returns the variant's `ValidationError` when the values violate its bounds.
    pub fn from_wire_fragment(fragment: &TargetFragment) -> Result<Option<Self>, ValidationError> {
        let target = match fragment.target_type {
            TargetType::NoTarget => Some(Self::NoTarget),
            TargetType::Cadence => match (fragment.value_one, fragment.value_two) {
                (Some(lower), Some(upper)) => {
                    Some(Self::Cadence(CadenceTarget::new(lower, upper)?))
                }
                _ => None,
            },
            TargetType::HeartRateZone => match fragment.zone_number {
                Some(zone) => Some(Self::HeartRateZone(HeartRateZoneTarget::new(i64::from(
                    zone,
                ))?)),
                None => None,
            },
            TargetType::PaceZone => match (fragment.value_one, fragment.value_two) {
                (Some(slow), Some(fast)) => Some(Self::PaceZone(PaceZoneTarget::new(fast, slow)?)),
                _ => None,
            },
        };
        Ok(target)
    }
}

impl Display for IntensityTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget => write!(f, "no target"),
            Self::Cadence(target) => write!(
                f,
                "cadence {:.0}-{:.0} spm",
                target.lower_bound(),
                target.upper_bound()
            ),
            Self::HeartRateZone(target) => write!(f, "heart rate zone {}", target.zone_number()),
            Self::PaceZone(target) => write!(
                f,
                "pace {}-{} /mi",
                format_pace(target.lower_bound()),
                format_pace(target.upper_bound())
            ),
        }
    }
}

/// Render a speed in m/s as minutes:seconds per mile
fn format_pace(meters_per_second: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_seconds = (METERS_PER_MILE / meters_per_second).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
