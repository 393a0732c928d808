// ABOUTME: Session-scoped, name-keyed store of constructed workouts with uniqueness enforcement
// ABOUTME: Batch inserts accept every non-duplicate candidate and report duplicates by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Registry
//!
//! Entries are append-only. A name, once inserted, is never overwritten for
//! the lifetime of the registry. Insertion order is preserved so summaries
//! enumerate workouts in the order they were proposed.

use std::collections::HashMap;

use tracing::debug;

use crate::model::Workout;

/// Result of [`WorkoutRegistry::insert_batch`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertOutcome {
    /// Workouts inserted by this batch, in batch order
    pub accepted: Vec<Workout>,
    /// Names rejected because they were already taken, in batch order
    pub duplicates: Vec<String>,
}

impl InsertOutcome {
    /// Whether any candidate was rejected as a duplicate
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Name-keyed workout store owned by one conversation session
#[derive(Debug, Clone, Default)]
pub struct WorkoutRegistry {
    workouts: Vec<Workout>,
    index: HashMap<String, usize>,
}

impl WorkoutRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every candidate whose name is not yet taken
    ///
    /// Names already present, including names inserted earlier in the same
    /// batch, are reported in `duplicates` and leave the registry untouched.
    pub fn insert_batch(&mut self, candidates: Vec<Workout>) -> InsertOutcome {
        let mut outcome = InsertOutcome::default();

        for workout in candidates {
            if self.index.contains_key(workout.name()) {
                debug!(name = workout.name(), "Rejected duplicate workout name");
                outcome.duplicates.push(workout.name().to_owned());
                continue;
            }
            self.index
                .insert(workout.name().to_owned(), self.workouts.len());
            self.workouts.push(workout.clone());
            outcome.accepted.push(workout);
        }

        debug!(
            accepted = outcome.accepted.len(),
            duplicates = outcome.duplicates.len(),
            total = self.workouts.len(),
            "Workout batch inserted"
        );
        outcome
    }

    /// Snapshot of all workouts in insertion order
    #[must_use]
    pub fn get_all(&self) -> Vec<Workout> {
        self.workouts.clone()
    }

    /// Look up a workout by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Workout> {
        self.index.get(name).and_then(|&slot| self.workouts.get(slot))
    }

    /// Whether a name is taken
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in insertion order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.workouts.iter().map(Workout::name).collect()
    }

    /// Number of stored workouts
    #[must_use]
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
