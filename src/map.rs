//! # Forgetting Map
//!
//! A bounded associative map that holds at most `capacity` key→value
//! associations and forgets the least-used one when a new association would
//! exceed the bound. "Least used" is frequency-primary with a recency
//! tie-break: the victim is the entry with the lowest lookup count, and
//! among tied counts the one that has gone longest without being touched.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                       ForgettingMap<K, V>                        │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  store: Mutex<RecencyStore<K, V>>                        │   │
//!   │   │                                                          │   │
//!   │   │  head ─► [mru] ◄──► ... ◄──► [lru] ◄── tail              │   │
//!   │   │  values live here as Arc<V>                              │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  counts: AccessCounts<K>  (sharded RwLock counter map)   │   │
//!   │   │  key → lookup count, including keys never stored         │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   │                                                                  │
//!   │   capacity: usize   metrics: MapMetrics                          │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Flow
//!
//! ```text
//!   add(key, value)                         (store mutex held throughout)
//!        │
//!        ▼
//!   insert-or-update; promote key to most recent
//!        │
//!        ▼
//!   while len > capacity:
//!        pick victims (min count, least-recent tie-break, fallback purge)
//!        remove each victim from store and counts
//!        │
//!        ▼
//!   track key at count 0 if it has no count yet
//! ```
//!
//! The count for a brand-new key is initialized only *after* the eviction
//! loop, so an untracked key can never be chosen as its own victim in the
//! `add` that introduces it. A key that already carries a count from earlier
//! lookups gets no such grace.
//!
//! ## Core Operations
//!
//! | Method                | Complexity | Description                           |
//! |-----------------------|------------|---------------------------------------|
//! | `try_with_capacity(n)`| O(1)       | Fallible constructor, rejects 0       |
//! | `add(k, v)`           | O(n)*      | Insert/update, may trigger eviction   |
//! | `find(&k)`            | O(1)       | Lookup; bumps count and recency       |
//! | `len()`               | O(1)       | Current number of associations        |
//! | `keys()`              | O(n)       | Snapshot, least→most recently touched |
//! | `access_count(&k)`    | O(1)       | Lookup count (0 if never seen)        |
//!
//! *`add` is O(1) until the bound is hit; an eviction round scans the counts
//! and the order once each, both bounded by the current size.
//!
//! ## Concurrency Contract
//!
//! - The store (values + order) sits behind one exclusive mutex. The whole
//!   insert-then-evict sequence of `add` runs inside a single critical
//!   section, so the map is never observable over capacity.
//! - The counts are sharded and separately locked. A `find` increments the
//!   count *before* taking the store mutex; the increment itself is atomic
//!   per key, but the increment/touch pair is not atomic with respect to a
//!   concurrent `add`'s eviction decision. No ordering is guaranteed
//!   between the two structures across threads; this looseness is part of
//!   the contract, not an oversight.
//! - Lock order is store mutex → count shard lock, never the reverse, and
//!   no lock is re-entered. `find` takes the two locks in the opposite
//!   *sequence* but never holds them simultaneously.
//!
//! ## Example Usage
//!
//! ```
//! use forgetmap::ForgettingMap;
//!
//! let map = ForgettingMap::new(3);
//! map.add(10, "ten");
//! map.add(20, "twenty");
//! map.add(30, "thirty");
//!
//! // Lookups raise the count and refresh recency.
//! assert_eq!(map.find(&20).as_deref(), Some(&"twenty"));
//! assert_eq!(map.find(&30).as_deref(), Some(&"thirty"));
//!
//! // 10 has the lowest count, so it is forgotten first.
//! map.add(40, "forty");
//! assert_eq!(map.find(&10), None);
//! assert_eq!(map.len(), 3);
//! ```
//!
//! ## Known Quirk
//!
//! `find` on a key that was never added still creates a tracked count for
//! it (see [`ForgettingMap::find`]). Sustained misses on distinct keys grow
//! the count map without bound; entries are only reclaimed when a phantom
//! key holds the minimum count during an eviction round.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ds::AccessCounts;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::metrics::{MapMetrics, MapMetricsSnapshot};
use crate::policy::least_used::{Selection, select_victims};
use crate::store::RecencyStore;
use crate::traits::{AccessOrdered, CoreMap, FrequencyTracked};

/// Bounded associative map with least-used eviction.
///
/// See the [module documentation](self) for the eviction policy and the
/// concurrency contract.
pub struct ForgettingMap<K, V> {
    store: Mutex<RecencyStore<K, V>>,
    counts: AccessCounts<K>,
    capacity: usize,
    metrics: MapMetrics,
}

impl<K, V> ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a map that retains at most `capacity` associations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero; a zero bound would
    /// make every `add` evict its own insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use forgetmap::ForgettingMap;
    ///
    /// let map = ForgettingMap::<u64, String>::try_with_capacity(100).unwrap();
    /// assert_eq!(map.capacity(), 100);
    /// assert!(ForgettingMap::<u64, String>::try_with_capacity(0).is_err());
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            store: Mutex::new(RecencyStore::with_capacity(capacity)),
            counts: AccessCounts::new(),
            capacity,
            metrics: MapMetrics::default(),
        })
    }

    /// Creates a map that retains at most `capacity` associations.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle the error
    /// instead.
    pub fn new(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).expect("capacity must be greater than zero")
    }

    /// Associates `key` with `value`.
    ///
    /// An existing association keeps its access count and has its value
    /// replaced; either way the key becomes the most recently touched. If
    /// the map then holds more than `capacity` associations, least-used
    /// entries are forgotten until it does not.
    ///
    /// Always returns `true`. The result is reserved for future signaling
    /// (for example insert vs. replace); callers must not branch on it.
    pub fn add(&self, key: K, value: V) -> bool {
        let tracked_key = key.clone();
        let value = Arc::new(value);

        let mut store = self.store.lock();
        if store.insert_or_update(key, value).is_some() {
            self.metrics.record_update();
        } else {
            self.metrics.record_insert();
        }

        while store.len() > self.capacity {
            let selection = select_victims(&self.counts, store.keys_lru_first());
            match selection {
                Selection::LeastRecent(victim) => {
                    self.forget(&mut store, &victim);
                },
                Selection::Fallback(victims) => {
                    // Purges counts tracked for keys that are no longer (or
                    // were never) stored; the store may not shrink, so the
                    // loop runs again with the phantom minimum gone.
                    self.metrics.record_fallback_eviction();
                    for victim in &victims {
                        self.forget(&mut store, victim);
                    }
                },
                Selection::None => break,
            }
        }

        // Initialized after eviction: the key being added only joins the
        // candidate pool once it survives its own insertion.
        self.counts.track_zero(&tracked_key);
        true
    }

    /// Looks up the value associated with `key`.
    ///
    /// A hit promotes the key to most recently touched and returns a clone
    /// of the shared value handle. Hit or miss, the key's access count is
    /// incremented, created at 1 if it has never been seen; misses therefore
    /// leave a tracked count behind for keys that were never added, and
    /// sustained misses on distinct keys grow the count map without bound.
    pub fn find(&self, key: &K) -> Option<Arc<V>> {
        self.counts.increment(key);

        let mut store = self.store.lock();
        match store.get(key) {
            Some(value) => {
                self.metrics.record_hit();
                Some(value)
            },
            None => {
                self.metrics.record_miss();
                None
            },
        }
    }

    /// Returns the current number of associations.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns `true` if the map holds no associations.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns the maximum number of associations retained at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current keys, least-recently to most-recently touched.
    ///
    /// The vector is a snapshot taken under the store lock; re-call after
    /// mutations to observe the new order.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys_lru_first().cloned().collect()
    }

    /// Returns how many times `key` has been looked up (0 if never).
    ///
    /// Includes phantom counts for keys that were only ever probed by
    /// [`find`](Self::find) and never added.
    pub fn access_count(&self, key: &K) -> u64 {
        self.counts.get(key)
    }

    /// Snapshots the map's operation counters.
    pub fn metrics(&self) -> MapMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn forget(&self, store: &mut RecencyStore<K, V>, victim: &K) {
        if store.remove(victim).is_some() {
            self.metrics.record_eviction();
        }
        self.counts.remove(victim);
    }

    /// Validates cross-structure invariants. Test and debug builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let store = self.store.lock();
        store.check_invariants()?;
        if store.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "store holds {} entries over capacity {}",
                store.len(),
                self.capacity
            )));
        }
        for key in store.keys_lru_first() {
            if !self.counts.contains(key) {
                return Err(InvariantError::new("stored key has no tracked count"));
            }
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.lock();
        f.debug_struct("ForgettingMap")
            .field("len", &store.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a forgetting map with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> CoreMap<K, V> for ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn add(&self, key: K, value: V) -> bool {
        ForgettingMap::add(self, key, value)
    }

    fn find(&self, key: &K) -> Option<Arc<V>> {
        ForgettingMap::find(self, key)
    }

    fn len(&self) -> usize {
        ForgettingMap::len(self)
    }

    fn capacity(&self) -> usize {
        ForgettingMap::capacity(self)
    }
}

impl<K, V> AccessOrdered<K> for ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn keys(&self) -> Vec<K> {
        ForgettingMap::keys(self)
    }
}

impl<K, V> FrequencyTracked<K> for ForgettingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn access_count(&self, key: &K) -> u64 {
        ForgettingMap::access_count(self, key)
    }
}
