//! Least-used victim selection.
//!
//! Frequency-primary, recency-secondary: the victim is the entry with the
//! lowest access count, and among tied counts the one that has gone longest
//! without being touched. Distinct from pure LRU (which ignores counts) and
//! pure LFU (which breaks ties arbitrarily or by insertion order).
//!
//! Selection flow
//! ──────────────
//!
//!   1. min ← lowest count among all tracked keys (linear scan)
//!   2. candidates ← every key whose count equals min
//!   3. walk the access order least-recent first; the first key that is a
//!      candidate is the single victim
//!   4. fallback: no ordered key is a candidate (the minimum is held only
//!      by keys tracked but no longer stored) → the whole candidate set is
//!      purged instead
//!
//! Both scans are O(current size); acceptable given the bounded capacity.
//! The fallback exists to keep the count map and the store convergent when
//! lookups have tracked keys that were never added; a purge round removes
//! no stored entry, so the caller loops until the store is back under
//! capacity.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::ds::AccessCounts;

/// Outcome of one victim-selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<K> {
    /// Nothing is tracked; there is no victim to pick.
    None,
    /// The least-recently-touched key among the minimum-count candidates.
    LeastRecent(K),
    /// No candidate appears in the access order; the whole tied set is
    /// purged.
    Fallback(Vec<K>),
}

/// Picks the victim(s) for one eviction round.
///
/// `order_lru_first` must yield the stored keys from least-recent to
/// most-recent. The caller removes each returned key from both the store
/// and the counts.
pub fn select_victims<'a, K, I>(counts: &AccessCounts<K>, order_lru_first: I) -> Selection<K>
where
    K: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let min = match counts.min_count() {
        Some(min) => min,
        None => return Selection::None,
    };
    let candidates: FxHashSet<K> = counts.keys_with_count(min).into_iter().collect();

    for key in order_lru_first {
        if candidates.contains(key) {
            return Selection::LeastRecent(key.clone());
        }
    }

    Selection::Fallback(candidates.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_tracked_selects_nothing() {
        let counts: AccessCounts<u64> = AccessCounts::new();
        let order: Vec<u64> = vec![1, 2, 3];
        assert_eq!(select_victims(&counts, order.iter()), Selection::None);
    }

    #[test]
    fn lowest_count_wins() {
        let counts: AccessCounts<u64> = AccessCounts::new();
        counts.track_zero(&1);
        counts.increment(&2);
        counts.increment(&3);

        let order = vec![3, 2, 1];
        assert_eq!(
            select_victims(&counts, order.iter()),
            Selection::LeastRecent(1)
        );
    }

    #[test]
    fn recency_breaks_count_ties() {
        let counts: AccessCounts<u64> = AccessCounts::new();
        counts.increment(&1);
        counts.increment(&2);
        counts.increment(&3);
        counts.increment(&3);

        // 1 and 2 tie at count 1; 2 is least recent.
        let order = vec![2, 1, 3];
        assert_eq!(
            select_victims(&counts, order.iter()),
            Selection::LeastRecent(2)
        );
    }

    #[test]
    fn unstored_minimum_falls_back_to_full_purge() {
        let counts: AccessCounts<u64> = AccessCounts::new();
        counts.increment(&7); // tracked, never stored
        counts.increment(&1);
        counts.increment(&1);

        let order = vec![1];
        match select_victims(&counts, order.iter()) {
            Selection::Fallback(keys) => assert_eq!(keys, vec![7]),
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn fallback_returns_every_tied_key() {
        let counts: AccessCounts<u64> = AccessCounts::new();
        counts.increment(&7);
        counts.increment(&8);
        counts.increment(&1);
        counts.increment(&1);

        let order = vec![1];
        match select_victims(&counts, order.iter()) {
            Selection::Fallback(mut keys) => {
                keys.sort_unstable();
                assert_eq!(keys, vec![7, 8]);
            },
            other => panic!("expected fallback, got {:?}", other),
        }
    }
}
