//! Execution results: measurement counts and metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Measurement counts keyed by bitstring.
///
/// Iteration follows insertion order, which makes everything downstream of
/// a result deterministic: the decoder's ranked scan breaks probability
/// ties by the order the backend first reported each bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// (bitstring, count) pairs in first-appearance order.
    entries: Vec<(String, u64)>,
}

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add occurrences of a bitstring, accumulating onto any existing count.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let bitstring = bitstring.into();
        match self.entries.iter_mut().find(|(b, _)| *b == bitstring) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((bitstring, count)),
        }
    }

    /// Get the count for a bitstring (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.entries
            .iter()
            .find(|(b, _)| b == bitstring)
            .map_or(0, |(_, c)| *c)
    }

    /// Total number of observed shots.
    ///
    /// May be below the requested shot count if the backend dropped shots;
    /// probabilities are always normalized by this observed total.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.entries
            .iter()
            .max_by_key(|(_, c)| *c)
            .map(|(b, c)| (b.as_str(), *c))
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(b, c)| (b.as_str(), *c))
    }

    /// Iterate over (bitstring, probability) pairs in insertion order.
    ///
    /// Probabilities over all observed bitstrings sum to 1 (within
    /// floating-point tolerance). Empty counts yield nothing.
    pub fn probabilities(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let total = self.total().max(1) as f64;
        self.entries
            .iter()
            .map(move |(b, c)| (b.as_str(), *c as f64 / total))
    }
}

impl From<HashMap<String, u64>> for Counts {
    /// Build from an unordered map; entries are ordered by bitstring for
    /// determinism.
    fn from(map: HashMap<String, u64>) -> Self {
        let mut entries: Vec<_> = map.into_iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        Self { entries }
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// The complete result of one circuit execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("00", 3);
        counts.insert("11", 1);
        counts.insert("00", 2);

        assert_eq!(counts.get("00"), 5);
        assert_eq!(counts.get("11"), 1);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut counts = Counts::new();
        counts.insert("10", 1);
        counts.insert("01", 1);
        counts.insert("00", 1);

        let order: Vec<_> = counts.iter().map(|(b, _)| b.to_string()).collect();
        assert_eq!(order, vec!["10", "01", "00"]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut counts = Counts::new();
        counts.insert("0000", 2048);
        counts.insert("1000", 2048);

        let sum: f64 = counts.probabilities().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((counts.probabilities().next().unwrap().1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.insert("0000", 10);
        counts.insert("1000", 30);
        assert_eq!(counts.most_frequent(), Some(("1000", 30)));
    }

    #[test]
    fn test_from_hashmap_is_deterministic() {
        let mut map = HashMap::new();
        map.insert("11".to_string(), 1u64);
        map.insert("00".to_string(), 2u64);
        let counts = Counts::from(map);

        let order: Vec<_> = counts.iter().map(|(b, _)| b.to_string()).collect();
        assert_eq!(order, vec!["00", "11"]);
    }
}
