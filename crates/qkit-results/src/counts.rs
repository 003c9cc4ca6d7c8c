//! Outcome tables.
//!
//! Keys are raw outcome bitstrings as reported by a simulator: one
//! character per classical bit, registers separated by spaces, the
//! last-declared register first and, inside each register, the highest
//! bit first.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts: outcome bitstring to number of occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from an iterator of (bitstring, count) pairs.
    /// Duplicate bitstrings are accumulated (summed), consistent with `insert()`.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add `count` occurrences of a bitstring, saturating at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.counts.entry(bitstring.into()).or_default();
        *entry = entry.saturating_add(count);
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Get the total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().fold(0, |acc, &v| acc.saturating_add(v))
    }

    /// Get the most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter().max_by_key(|&(_, count)| count)
    }

    /// Get probabilities for each bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Get sorted counts (by count descending, then bitstring).
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Get the number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
