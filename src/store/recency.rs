//! Recency-ordered key/value store.
//!
//! Holds one entry per key and keeps the keys in access order: every insert,
//! update, or touch moves the key to the most-recent end. The order is an
//! intrusive doubly linked list threaded through an inline slot vector, with
//! a hash index from key to slot, so insert/touch/remove are O(1) amortized.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────┐   ┌─────────────────────────────────────┐
//!   │ index: FxHashMap<K,usize> │   │ slots: Vec<Slot<K, V>> + free_list  │
//!   │                           │   │                                     │
//!   │  ┌─────────┬─────────┐    │   │  ┌─────┬──────────────────────────┐ │
//!   │  │   Key   │  slot   │    │   │  │ idx │ entry, prev, next        │ │
//!   │  ├─────────┼─────────┤    │   │  ├─────┼──────────────────────────┤ │
//!   │  │  "a"    │    0    │────┼───┼─►│  0  │ ("a", v), None, Some(1)  │ │
//!   │  │  "b"    │    1    │────┼───┼─►│  1  │ ("b", v), Some(0), None  │ │
//!   │  └─────────┴─────────┘    │   │  └─────┴──────────────────────────┘ │
//!   └───────────────────────────┘   └─────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [1] ◄── tail
//!   (most recent)      (least recent)
//! ```
//!
//! Eviction scans want the least-recent end first; [`RecencyStore::keys_lru_first`]
//! walks the list from the tail via `prev` links.
//!
//! Values are held as `Arc<V>` so lookups can hand out a handle clone and the
//! caller can release any outer lock before reading the value.
//!
//! Not thread-safe on its own; [`ForgettingMap`](crate::map::ForgettingMap)
//! wraps it in a mutex.

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

#[derive(Debug)]
struct Slot<K, V> {
    entry: Option<Entry<K, V>>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Key/value store ordered by access recency (head = most recent).
#[derive(Debug)]
pub struct RecencyStore<K, V> {
    index: FxHashMap<K, usize>,
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> RecencyStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts `key` at the most-recent position, or replaces its value and
    /// moves it there. Returns the previous value handle on replacement.
    pub fn insert_or_update(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        if let Some(&idx) = self.index.get(&key) {
            let entry = self.slots[idx].entry.as_mut().expect("store entry missing");
            let previous = std::mem::replace(&mut entry.value, value);
            if self.head != Some(idx) {
                self.detach(idx);
                self.attach_front(idx);
            }
            return Some(previous);
        }

        let entry = Entry {
            key: key.clone(),
            value,
        };
        let idx = self.allocate_slot(entry);
        self.attach_front(idx);
        self.index.insert(key, idx);
        None
    }

    /// Moves `key` to the most-recent position without changing its value.
    /// Returns `false` (no-op) if the key is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => return false,
        };
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
        true
    }

    /// Looks up `key`, moving it to the most-recent position on a hit.
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let idx = *self.index.get(key)?;
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
        let entry = self.slots[idx].entry.as_ref().expect("store entry missing");
        Some(Arc::clone(&entry.value))
    }

    /// Looks up `key` without changing the access order.
    pub fn peek(&self, key: &K) -> Option<&Arc<V>> {
        let idx = *self.index.get(key)?;
        self.slots[idx].entry.as_ref().map(|entry| &entry.value)
    }

    /// Removes the entry for `key`. Idempotent: absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let idx = self.index.remove(key)?;
        self.detach(idx);
        let entry = self.slots[idx].entry.take().expect("store entry missing");
        self.free_list.push(idx);
        Some(entry.value)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates the keys from least-recently to most-recently touched.
    pub fn keys_lru_first(&self) -> KeysLruFirst<'_, K, V> {
        KeysLruFirst {
            store: self,
            current: self.tail,
        }
    }

    fn allocate_slot(&mut self, entry: Entry<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Slot {
                entry: Some(entry),
                prev: None,
                next: None,
            };
            idx
        } else {
            self.slots.push(Slot {
                entry: Some(entry),
                prev: None,
                next: None,
            });
            self.slots.len() - 1
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next)
        };

        match prev {
            Some(prev_idx) => self.slots[prev_idx].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_idx) => self.slots[next_idx].prev = prev,
            None => self.tail = prev,
        }

        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.slots[idx].prev = None;
        self.slots[idx].next = old_head;
        match old_head {
            Some(head_idx) => self.slots[head_idx].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Validates index/list consistency. Test and debug builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("half-empty list endpoints"));
            }
            if !self.index.is_empty() {
                return Err(InvariantError::new("index populated but list empty"));
            }
            return Ok(());
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;

        while let Some(idx) = current {
            if !seen.insert(idx) {
                return Err(InvariantError::new(format!("cycle through slot {idx}")));
            }
            let slot = &self.slots[idx];
            if slot.prev != prev {
                return Err(InvariantError::new(format!(
                    "asymmetric links at slot {idx}"
                )));
            }
            let entry = slot
                .entry
                .as_ref()
                .ok_or_else(|| InvariantError::new(format!("vacant slot {idx} in list")))?;
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == idx => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "index does not map slot {idx} back to itself"
                    )));
                },
            }

            prev = Some(idx);
            current = slot.next;
            count += 1;
            if count > self.index.len() {
                return Err(InvariantError::new("list longer than index"));
            }
        }

        if self.tail != prev {
            return Err(InvariantError::new("tail does not terminate the list"));
        }
        if count != self.index.len() {
            return Err(InvariantError::new(format!(
                "list holds {count} entries, index holds {}",
                self.index.len()
            )));
        }
        Ok(())
    }
}

/// Iterator over keys from least-recent to most-recent.
pub struct KeysLruFirst<'a, K, V> {
    store: &'a RecencyStore<K, V>,
    current: Option<usize>,
}

impl<'a, K, V> Iterator for KeysLruFirst<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let slot = &self.store.slots[idx];
        self.current = slot.prev;
        let entry = slot.entry.as_ref().expect("store entry missing");
        Some(&entry.key)
    }
}
