// ABOUTME: Continuation heuristic deciding whether a finished turn reads as an unfinished answer
// ABOUTME: Matches stock phrases and multi-part sequences that stop after their first unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Continuation Heuristic
//!
//! String matching against model prose is approximate. The orchestrator only
//! depends on the [`ContinuationHeuristic`] trait, so the default
//! [`PhraseContinuationHeuristic`] can be tuned (phrases and sequence units)
//! or replaced.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

/// Phrases that announce more content is coming
pub const DEFAULT_CONTINUATION_PHRASES: &[&str] = &[
    "I'll continue",
    "I'll finish",
    "Let me continue",
    "I'll provide",
    "Next,",
    "continuing with",
    "moving on to",
    "Part 2",
    "Part 3",
];

/// Sequence units checked for a first entry with no follow-up
pub const DEFAULT_SEQUENCE_UNITS: &[&str] = &["week"];

/// A word followed by a small number, such as "Week 1" or "phase 2"
static SEQUENCE_UNIT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]+)\s+(\d{1,3})\b").ok());

/// Decides whether a completed turn needs a synthesized follow-up
pub trait ContinuationHeuristic: Send + Sync {
    /// The signal that matched, or `None` when the answer looks complete
    fn continuation_signal(&self, text: &str) -> Option<String>;

    /// Whether the answer looks unfinished
    fn needs_continuation(&self, text: &str) -> bool {
        self.continuation_signal(text).is_some()
    }
}

/// Default heuristic: stock phrases plus truncated multi-part sequences
#[derive(Debug, Clone)]
pub struct PhraseContinuationHeuristic {
    phrases: Vec<String>,
    sequence_units: BTreeSet<String>,
}

impl PhraseContinuationHeuristic {
    /// Heuristic with the default phrase list
    #[must_use]
    pub fn new() -> Self {
        Self::with_phrases(DEFAULT_CONTINUATION_PHRASES.iter().copied())
    }

    /// Heuristic with a custom phrase list (matched case-insensitively)
    #[must_use]
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|phrase| normalize(phrase.as_ref()))
                .filter(|phrase| !phrase.is_empty())
                .collect(),
            sequence_units: DEFAULT_SEQUENCE_UNITS.iter().copied().map(normalize).collect(),
        }
    }

    /// Replace the sequence units (matched case-insensitively)
    #[must_use]
    pub fn with_sequence_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sequence_units = units
            .into_iter()
            .map(|unit| normalize(unit.as_ref().trim()))
            .filter(|unit| !unit.is_empty())
            .collect();
        self
    }

    fn matching_phrase(&self, normalized: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| normalized.contains(phrase.as_str()))
            .map(String::as_str)
    }
}

impl Default for PhraseContinuationHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ContinuationHeuristic for PhraseContinuationHeuristic {
    fn continuation_signal(&self, text: &str) -> Option<String> {
        if let Some(unit) = truncated_sequence(text, &self.sequence_units) {
            return Some(format!("{unit} 1 without {unit} 2"));
        }
        let normalized = normalize(text);
        self.matching_phrase(&normalized)
            .map(|phrase| format!("phrase '{phrase}'"))
    }
}

/// Lowercase and straighten typographic apostrophes
fn normalize(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'").to_lowercase()
}

/// First unit whose sequence mentions 1 but neither 2 nor 3
fn truncated_sequence(text: &str, units: &BTreeSet<String>) -> Option<String> {
    let pattern = SEQUENCE_UNIT_PATTERN.as_ref()?;

    let mut seen: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
    for captures in pattern.captures_iter(text) {
        let (Some(unit), Some(number)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let unit = unit.as_str().to_lowercase();
        if !units.contains(&unit) {
            continue;
        }
        if let Ok(number) = number.as_str().parse::<u32>() {
            seen.entry(unit).or_default().insert(number);
        }
    }

    seen.into_iter()
        .find(|(_, numbers)| {
            numbers.contains(&1) && !numbers.contains(&2) && !numbers.contains(&3)
        })
        .map(|(unit, _)| unit)
}
