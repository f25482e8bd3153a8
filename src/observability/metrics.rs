//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase, reset only on process start
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the analysis engine
///
/// All counters use Relaxed ordering; exact cross-counter consistency is
/// not required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Analyses that returned an alternative set
    analyses_completed: AtomicU64,
    /// Analyses that returned an error
    analyses_failed: AtomicU64,
    /// Re-plan requests issued
    probes_issued: AtomicU64,
    /// Probes that produced a new distinct plan
    alternatives_accepted: AtomicU64,
    /// Probes that produced an already-known plan
    alternatives_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment completed analyses
    pub fn increment_analyses_completed(&self) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment failed analyses
    pub fn increment_analyses_failed(&self) {
        self.analyses_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment probes issued
    pub fn increment_probes(&self) {
        self.probes_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment accepted alternatives
    pub fn increment_accepted(&self) {
        self.alternatives_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected alternatives
    pub fn increment_rejected(&self) {
        self.alternatives_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            analyses_failed: self.analyses_failed.load(Ordering::Relaxed),
            probes_issued: self.probes_issued.load(Ordering::Relaxed),
            alternatives_accepted: self.alternatives_accepted.load(Ordering::Relaxed),
            alternatives_rejected: self.alternatives_rejected.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub analyses_completed: u64,
    pub analyses_failed: u64,
    pub probes_issued: u64,
    pub alternatives_accepted: u64,
    pub alternatives_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.analyses_completed, 0);
        assert_eq!(snapshot.probes_issued, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();
        registry.increment_analyses_completed();
        registry.increment_analyses_failed();
        registry.increment_probes();
        registry.increment_probes();
        registry.increment_accepted();
        registry.increment_rejected();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.analyses_completed, 1);
        assert_eq!(snapshot.analyses_failed, 1);
        assert_eq!(snapshot.probes_issued, 2);
        assert_eq!(snapshot.alternatives_accepted, 1);
        assert_eq!(snapshot.alternatives_rejected, 1);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.increment_probes();
        let json = registry.to_json();
        assert_eq!(json["probes_issued"], 1);
        assert_eq!(json["analyses_failed"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_probes();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().probes_issued, 1000);
    }
}
