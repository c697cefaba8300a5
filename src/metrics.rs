use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Process-wide per-species prediction counters.
///
/// An explicitly owned, injectable registry rather than a hidden
/// global: the service takes one at construction, tests own their own.
/// Entries are created lazily on the first increment of a label, never
/// removed, and only ever grow.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counts: Mutex<HashMap<String, u64>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically adds 1 to the counter for `label`, creating the
    /// entry with value 1 if absent. Exactly one net +1 per call, no
    /// matter how many callers race.
    pub fn increment(&self, label: &str) {
        let mut counts = self.lock();
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Current count for one label (0 if never observed).
    pub fn count(&self, label: &str) -> u64 {
        self.lock().get(label).copied().unwrap_or(0)
    }

    /// A consistent point-in-time view of all counters, ordered by
    /// label for stable exposition. Does not reset anything.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.lock()
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        // A poisoned lock means a panic mid-increment; the map itself
        // is still a valid counter state.
        self.counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn entries_are_created_lazily() {
        let registry = MetricsRegistry::new();
        assert!(registry.snapshot().is_empty());
        assert_eq!(registry.count("setosa"), 0);

        registry.increment("setosa");
        assert_eq!(registry.count("setosa"), 1);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn counts_accumulate_per_label() {
        let registry = MetricsRegistry::new();
        registry.increment("setosa");
        registry.increment("virginica");
        registry.increment("virginica");

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.get("setosa"), Some(&1));
        assert_eq!(snapshot.get("virginica"), Some(&2));
    }

    #[test]
    fn snapshot_is_ordered_by_label() {
        let registry = MetricsRegistry::new();
        registry.increment("virginica");
        registry.increment("setosa");
        registry.increment("versicolor");

        let labels: Vec<_> = registry.snapshot().into_keys().collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn concurrent_increments_lose_no_updates() {
        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    registry.increment("virginica");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.count("virginica"), 1000);
        // No ghost entries from racing creations.
        assert_eq!(registry.snapshot().len(), 1);
    }
}
