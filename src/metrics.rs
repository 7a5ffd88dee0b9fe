//! Operation counters for the forgetting map.
//!
//! Relaxed atomic counters updated on the hot paths and read through a
//! plain-old-data snapshot. Not a pluggable observability layer; callers
//! that want richer telemetry sample [`MapMetricsSnapshot`] themselves.

use std::sync::atomic::{AtomicU64, Ordering};

/// Internal operation counters.
#[derive(Debug, Default)]
pub struct MapMetrics {
    inserts: AtomicU64,
    updates: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    fallback_evictions: AtomicU64,
}

impl MapMetrics {
    /// Record an `add` that created a new association.
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an `add` that replaced an existing value.
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a `find` that returned a value.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a `find` that returned nothing.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one evicted association.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction round that purged the whole tied candidate set.
    pub fn record_fallback_eviction(&self) {
        self.fallback_evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the current counter values.
    pub fn snapshot(&self) -> MapMetricsSnapshot {
        MapMetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            fallback_evictions: self.fallback_evictions.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of map operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapMetricsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub fallback_evictions: u64,
}
