//! Operator-visible counters for the cache layer.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters updated by the cached repository.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    degraded: AtomicU64,
    conflicts: AtomicU64,
    lease_overruns: AtomicU64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// A cache operation failed after (or instead of) a successful store operation.
    pub fn record_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// An update held its lock for longer than the lock TTL.
    pub fn record_lease_overrun(&self) {
        self.lease_overruns.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> CacheMetricsSnapshot {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheMetricsSnapshot {
            hits,
            misses,
            degraded: self.degraded.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            lease_overruns: self.lease_overruns.load(Ordering::Relaxed),
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
        }
    }
}

/// Serializable view of [`CacheMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub degraded: u64,
    pub conflicts: u64,
    pub lease_overruns: u64,
    /// Hits over hits plus misses, 0.0 before the first lookup.
    pub hit_rate: f64,
}
