//! # Forgetting Map Trait Seams
//!
//! Public trait surface for the forgetting map. The map is a single data
//! structure, so the hierarchy is small: one core trait for the universal
//! operations and two narrow traits for the order and frequency views.
//!
//! | Trait              | Purpose                                    |
//! |--------------------|--------------------------------------------|
//! | `CoreMap`          | add / find / len / capacity                |
//! | `AccessOrdered`    | recency-ordered key snapshot               |
//! | `FrequencyTracked` | per-key access count read                  |
//!
//! All methods take `&self`: implementors are internally synchronized and
//! safe to share across threads (see [`ForgettingMap`](crate::map::ForgettingMap)).
//! This mirrors the interior-mutability convention of concurrent stores
//! rather than the `&mut self` convention of single-threaded cache cores.
//!
//! ## Example Usage
//!
//! ```
//! use forgetmap::ForgettingMap;
//! use forgetmap::traits::{AccessOrdered, CoreMap};
//!
//! fn warm<M: CoreMap<u64, String>>(map: &M, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         map.add(*key, value.clone());
//!     }
//! }
//!
//! let map = ForgettingMap::new(10);
//! warm(&map, &[(1, "one".to_string()), (2, "two".to_string())]);
//! assert_eq!(map.len(), 2);
//! assert_eq!(AccessOrdered::keys(&map), vec![1, 2]);
//! ```

use std::sync::Arc;

/// Core operations every forgetting map supports.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash + Clone`)
/// - `V`: Value type
pub trait CoreMap<K, V> {
    /// Associates `key` with `value`, evicting the least-used entry if the
    /// map is over capacity afterwards.
    ///
    /// Always returns `true`; the result is reserved for future signaling
    /// (for example distinguishing insert from replace).
    fn add(&self, key: K, value: V) -> bool;

    /// Looks up the value for `key`, bumping its access count and recency.
    ///
    /// The count is bumped even when the key is absent from the map.
    fn find(&self, key: &K) -> Option<Arc<V>>;

    /// Returns the current number of associations.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no associations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of associations retained at once.
    fn capacity(&self) -> usize;
}

/// Maps that expose their access order.
pub trait AccessOrdered<K> {
    /// Returns the current keys ordered least-recently to most-recently
    /// touched. The snapshot is taken at call time; later mutations are not
    /// reflected in a previously returned vector.
    fn keys(&self) -> Vec<K>;
}

/// Maps that track per-key access frequency.
pub trait FrequencyTracked<K> {
    /// Returns the number of times `key` has been looked up, or 0 if the
    /// key has never been seen. Keys only ever probed by `find` (and never
    /// added) still report their miss count.
    fn access_count(&self, key: &K) -> u64;
}
