//! Bounded least-recently-used memo table.
//!
//! Entries carry a monotonically increasing access stamp; a `BTreeMap` keyed
//! by stamp yields the oldest entry in `O(log n)`. Inserting into a full cache
//! evicts exactly one entry, the one touched least recently.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: usize,
    stamp: u64,
    entries: HashMap<K, (V, u64)>,
    recency: BTreeMap<u64, K>,
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    /// A cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            stamp: 0,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_stamp(&mut self) -> u64 {
        self.stamp += 1;
        self.stamp
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let stamp = self.next_stamp();
        let (value, old) = self.entries.get_mut(key)?;
        self.recency.remove(&*old);
        *old = stamp;
        self.recency.insert(stamp, key.clone());
        Some(value.clone())
    }

    /// Insert or replace `key`, evicting the least recently used entry if full.
    pub fn insert(&mut self, key: K, value: V) {
        let stamp = self.next_stamp();
        if let Some((_, old)) = self.entries.remove(&key) {
            self.recency.remove(&old);
        } else if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.recency.pop_first() {
                self.entries.remove(&oldest);
            }
        }
        self.recency.insert(stamp, key.clone());
        self.entries.insert(key, (value, stamp));
    }

    /// Return the cached value or compute and store it.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, compute: F) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}
