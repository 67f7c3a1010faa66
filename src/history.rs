//! Capped spin-outcome history
//!
//! Keeps the last N results, newest first, with simple statistics over
//! them. Storage is the caller's concern; the JSON helpers exist so a
//! host can stash the history wherever it keeps its other state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sim::SegmentHit;

/// Default number of spins to keep
pub const MAX_HISTORY: usize = 10;

/// A single recorded outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRecord {
    pub label: String,
    /// 0xRRGGBB
    pub color: u32,
    /// Winning segment index
    pub index: usize,
    /// Unix timestamp (ms), supplied by the caller
    pub timestamp_ms: f64,
}

/// Per-label statistics over the retained history
#[derive(Debug, Clone, Default)]
pub struct SpinStats {
    pub total_spins: usize,
    pub label_counts: HashMap<String, usize>,
    /// (label, count) of the most frequent outcome, if any
    pub most_common: Option<(String, usize)>,
    pub least_common: Option<(String, usize)>,
}

/// Capped record of past outcomes, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinHistory {
    entries: Vec<SpinRecord>,
    capacity: usize,
}

impl Default for SpinHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record an outcome at the front, trimming to the cap.
    pub fn record(&mut self, hit: &SegmentHit<'_>, timestamp_ms: f64) {
        self.entries.insert(
            0,
            SpinRecord {
                label: hit.label.to_string(),
                color: hit.color,
                index: hit.index,
                timestamp_ms,
            },
        );
        self.entries.truncate(self.capacity);
    }

    /// Retained outcomes, newest first
    pub fn entries(&self) -> &[SpinRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Aggregate the retained outcomes.
    pub fn statistics(&self) -> SpinStats {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.label.clone()).or_insert(0) += 1;
        }

        let most_common = counts
            .iter()
            .max_by_key(|&(_, &count)| count)
            .map(|(label, &count)| (label.clone(), count));
        let least_common = counts
            .iter()
            .min_by_key(|&(_, &count)| count)
            .map(|(label, &count)| (label.clone(), count));

        SpinStats {
            total_spins: self.entries.len(),
            label_counts: counts,
            most_common,
            least_common,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(index: usize, label: &'static str) -> SegmentHit<'static> {
        SegmentHit {
            index,
            label,
            color: 0xFF00FF,
        }
    }

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let mut history = SpinHistory::with_capacity(3);
        for i in 0..5 {
            history.record(&hit(i, "Prize"), i as f64 * 1000.0);
        }

        assert_eq!(history.len(), 3);
        // Newest (index 4) at the front, oldest retained is index 2
        assert_eq!(history.entries()[0].index, 4);
        assert_eq!(history.entries()[2].index, 2);
    }

    #[test]
    fn test_statistics_counts_labels() {
        let mut history = SpinHistory::new();
        history.record(&hit(0, "Vampire"), 1.0);
        history.record(&hit(0, "Vampire"), 2.0);
        history.record(&hit(3, "Ghost"), 3.0);

        let stats = history.statistics();
        assert_eq!(stats.total_spins, 3);
        assert_eq!(stats.label_counts["Vampire"], 2);
        assert_eq!(stats.label_counts["Ghost"], 1);
        assert_eq!(stats.most_common, Some(("Vampire".to_string(), 2)));
        assert_eq!(stats.least_common, Some(("Ghost".to_string(), 1)));
    }

    #[test]
    fn test_empty_statistics() {
        let history = SpinHistory::new();
        let stats = history.statistics();
        assert_eq!(stats.total_spins, 0);
        assert!(stats.most_common.is_none());
        assert!(stats.least_common.is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = SpinHistory::new();
        history.record(&hit(1, "Witch"), 5.0);
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }
}
