//! Sharded concurrent access-count map.
//!
//! Tracks how many times each key has been looked up. Purely a counter map:
//! no ordering semantics, no eviction logic of its own.
//!
//! ## Architecture
//!
//! ```text
//!   AccessCounts<K>
//!   ┌──────────────────────────────────────────────────────┐
//!   │  selector: ShardSelector (seeded, deterministic)     │
//!   │                                                      │
//!   │  shards: Vec<RwLock<FxHashMap<K, u64>>>              │
//!   │  ┌──────────┬──────────┬──────────┬──────────┐       │
//!   │  │ shard 0  │ shard 1  │ shard 2  │ shard 3  │  ...  │
//!   │  │ {a:2}    │ {b:0}    │ {c:1}    │ {d:5}    │       │
//!   │  └──────────┴──────────┴──────────┴──────────┘       │
//!   └──────────────────────────────────────────────────────┘
//! ```
//!
//! Per-key read-and-increment is atomic: it runs under one shard's write
//! lock. Cross-shard scans (`min_count`, `keys_with_count`) take shard read
//! locks one at a time and therefore observe each shard at a slightly
//! different instant; callers that need a stable view serialize externally.
//! Shard locks never acquire any other lock.

use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::shard::ShardSelector;

/// Default shard count; enough to spread uncontended increments.
pub const DEFAULT_SHARDS: usize = 8;

/// Concurrency-safe per-key access counters.
///
/// # Example
///
/// ```
/// use forgetmap::ds::AccessCounts;
///
/// let counts: AccessCounts<&str> = AccessCounts::new();
/// assert_eq!(counts.get(&"page"), 0);
/// assert_eq!(counts.increment(&"page"), 1);
/// assert_eq!(counts.increment(&"page"), 2);
/// counts.remove(&"page");
/// assert_eq!(counts.get(&"page"), 0);
/// ```
#[derive(Debug)]
pub struct AccessCounts<K> {
    shards: Vec<RwLock<FxHashMap<K, u64>>>,
    selector: ShardSelector,
}

impl<K> AccessCounts<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a count map with [`DEFAULT_SHARDS`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS, 0)
    }

    /// Creates a count map with an explicit shard count and hash seed.
    pub fn with_shards(shards: usize, seed: u64) -> Self {
        let selector = ShardSelector::new(shards, seed);
        let mut shards = Vec::with_capacity(selector.shard_count());
        for _ in 0..selector.shard_count() {
            shards.push(RwLock::new(FxHashMap::default()));
        }
        Self { shards, selector }
    }

    fn shard(&self, key: &K) -> &RwLock<FxHashMap<K, u64>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Returns the count for `key`, or 0 if the key is untracked.
    pub fn get(&self, key: &K) -> u64 {
        self.shard(key).read().get(key).copied().unwrap_or(0)
    }

    /// Returns `true` if `key` has a tracked count.
    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).read().contains_key(key)
    }

    /// Increments the count for `key`, creating it at 1 if absent.
    ///
    /// The read-and-increment runs under the shard write lock, so two
    /// concurrent increments on the same key never lose an update.
    pub fn increment(&self, key: &K) -> u64 {
        let mut shard = self.shard(key).write();
        let count = shard.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Starts tracking `key` at 0 if it has no count yet; keeps an existing
    /// count untouched.
    pub fn track_zero(&self, key: &K) {
        let mut shard = self.shard(key).write();
        shard.entry(key.clone()).or_insert(0);
    }

    /// Stops tracking `key`, returning its last count. No-op if untracked.
    pub fn remove(&self, key: &K) -> Option<u64> {
        self.shard(key).write().remove(key)
    }

    /// Returns the minimum count over all tracked keys, or `None` if no key
    /// is tracked. Linear scan over every shard.
    pub fn min_count(&self) -> Option<u64> {
        let mut min: Option<u64> = None;
        for shard in &self.shards {
            for &count in shard.read().values() {
                min = Some(match min {
                    Some(current) if current <= count => current,
                    _ => count,
                });
            }
        }
        min
    }

    /// Returns every tracked key whose count equals `count`. Linear filter
    /// scan over every shard.
    pub fn keys_with_count(&self, count: u64) -> Vec<K> {
        let mut keys = Vec::new();
        for shard in &self.shards {
            for (key, &tracked) in shard.read().iter() {
                if tracked == count {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Returns `true` if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Drops every tracked count.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }
}

impl<K> Default for AccessCounts<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
