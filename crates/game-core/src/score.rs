use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The complete set of metric deltas produced by resolving one decision
/// option. Duplicate metric names within an option are summed before the
/// batch is built, so a batch holds at most one entry per metric.
pub type ImpactBatch = BTreeMap<String, f64>;

/// Named per-metric running totals for a session (or a player lifetime).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    totals: BTreeMap<String, f64>,
}

impl ScoreVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one impact batch as a single atomic operation.
    pub fn apply_batch(&mut self, batch: &ImpactBatch) {
        for (metric, delta) in batch {
            *self.totals.entry(metric.clone()).or_insert(0.0) += delta;
        }
    }

    /// Add to a single metric.
    pub fn add(&mut self, metric: &str, delta: f64) {
        *self.totals.entry(metric.to_string()).or_insert(0.0) += delta;
    }

    pub fn get(&self, metric: &str) -> f64 {
        self.totals.get(metric).copied().unwrap_or(0.0)
    }

    /// Sum across all metrics, used by scoring rules that reduce a session
    /// to a single scalar.
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.totals.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_applies_atomically() {
        let mut score = ScoreVector::new();
        let mut batch = ImpactBatch::new();
        batch.insert("revenue".to_string(), 8.0);
        batch.insert("morale".to_string(), -2.0);

        score.apply_batch(&batch);
        assert_eq!(score.get("revenue"), 8.0);
        assert_eq!(score.get("morale"), -2.0);
        assert_eq!(score.get("untouched"), 0.0);
        assert_eq!(score.total(), 6.0);
    }

    #[test]
    fn repeated_batches_accumulate() {
        let mut score = ScoreVector::new();
        let mut batch = ImpactBatch::new();
        batch.insert("cash".to_string(), 2.5);

        score.apply_batch(&batch);
        score.apply_batch(&batch);
        assert_eq!(score.get("cash"), 5.0);
    }
}
