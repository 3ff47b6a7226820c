//! Frequency counting with deterministic ranking.
//!
//! An explicit count map paired with an insertion-order list, so that
//! `most_common` ties always break toward the first-seen key and output
//! stays reproducible under test.

use std::collections::HashMap;

/// A string-keyed occurrence counter with stable ranking.
#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    counts: HashMap<String, u64>,
    /// Keys in first-insertion order; entries are dropped on `remove`.
    order: Vec<String>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.order.push(key.to_string());
            }
        }
    }

    /// Occurrence count for `key`, 0 when absent.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Drop `key` entirely. A no-op when the key was never counted.
    pub fn remove(&mut self, key: &str) {
        if self.counts.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The `n` highest-count keys, descending, ties broken by insertion
    /// order (stable sort over the insertion-ordered list).
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .order
            .iter()
            .map(|k| (k.clone(), self.counts[k]))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}
