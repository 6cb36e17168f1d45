//! Least-recently-used cache with O(1) lookup and insertion.
//!
//! The same eviction discipline a bounded cache of expensive-to-recompute
//! entries wants: every hit refreshes the entry, and inserting into a full
//! cache evicts whichever entry has gone longest without one.
//!
//! Layout: a hash index over a slab of entries threaded into a doubly
//! linked recency list. Most-recently-used at the head, eviction victim at
//! the tail.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::error::{Error, Result};

struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Counters describing cache behavior so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruStats {
    /// Lookups that found a live entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries pushed out to make room.
    pub evictions: u64,
}

/// A fixed-capacity map that evicts the least recently used entry on
/// overflow. `get` and `put` are O(1).
pub struct LruCache<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
    stats: LruStats,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// Zero capacity is rejected: such a cache could never hold anything.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("lru capacity must be nonzero"));
        }
        Ok(Self {
            index: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
            stats: LruStats::default(),
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Behavior counters.
    pub fn stats(&self) -> LruStats {
        self.stats
    }

    /// Look up a key and mark it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(slot) => {
                self.stats.hits += 1;
                self.move_to_head(slot);
                Some(&self.entry(slot).value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Look up a key without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entry(slot).value)
    }

    /// Insert or update. An update refreshes recency and returns the old
    /// value; an insert into a full cache evicts the least recently used
    /// entry first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.index.get(&key).copied() {
            let old = std::mem::replace(&mut self.entry_mut(slot).value, value);
            self.move_to_head(slot);
            return Some(old);
        }

        if self.index.len() == self.capacity {
            let victim = self.tail.expect("full cache has a tail");
            let evicted_key = self.entry(victim).key.clone();
            trace!(capacity = self.capacity, "evicting lru entry");
            self.remove_slot(victim);
            self.index.remove(&evicted_key);
            self.stats.evictions += 1;
        }

        let slot = self.alloc(key.clone(), value);
        self.link_at_head(slot);
        self.index.insert(key, slot);
        None
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        Some(self.remove_slot(slot))
    }

    /// Remove and return the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let victim = self.tail?;
        let key = self.entry(victim).key.clone();
        self.index.remove(&key);
        let value = self.remove_slot(victim);
        Some((key, value))
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.index.len());
        let mut current = self.head;
        while let Some(slot) = current {
            let entry = self.entry(slot);
            out.push(&entry.key);
            current = entry.next;
        }
        out
    }

    fn entry(&self, slot: usize) -> &Entry<K, V> {
        self.entries[slot].as_ref().expect("slot is live")
    }

    fn entry_mut(&mut self, slot: usize) -> &mut Entry<K, V> {
        self.entries[slot].as_mut().expect("slot is live")
    }

    fn alloc(&mut self, key: K, value: V) -> usize {
        let entry = Some(Entry {
            key,
            value,
            prev: None,
            next: None,
        });
        match self.free.pop() {
            Some(slot) => {
                self.entries[slot] = entry;
                slot
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        }
    }

    fn link_at_head(&mut self, slot: usize) {
        self.entry_mut(slot).prev = None;
        self.entry_mut(slot).next = self.head;
        if let Some(old_head) = self.head {
            self.entry_mut(old_head).prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let entry = self.entry(slot);
            (entry.prev, entry.next)
        };
        match prev {
            Some(p) => self.entry_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entry_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn move_to_head(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.link_at_head(slot);
    }

    fn remove_slot(&mut self, slot: usize) -> V {
        self.unlink(slot);
        self.free.push(slot);
        self.entries[slot].take().expect("slot is live").value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_put_get() {
        let mut cache = LruCache::new(2).unwrap();
        assert_eq!(cache.put(1, "a"), None);
        assert_eq!(cache.put(2, "b"), None);
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_eviction_order() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1); // 2 is now the lru
        cache.put(3, "c");
        assert_eq!(cache.peek(&2), None);
        assert_eq!(cache.peek(&1), Some(&"a"));
        assert_eq!(cache.peek(&3), Some(&"c"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_update_refreshes_recency() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.put(1, 11), Some(10));
        cache.put(3, 30);
        // 2 was lru after 1 was rewritten.
        assert_eq!(cache.peek(&2), None);
        assert_eq!(cache.peek(&1), Some(&11));
    }

    #[test]
    fn test_peek_does_not_refresh() {
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.peek(&1);
        cache.put(3, "c");
        assert_eq!(cache.peek(&1), None);
    }

    #[test]
    fn test_remove_and_pop_lru() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.pop_lru(), Some((1, "a")));
        assert_eq!(cache.pop_lru(), Some((3, "c")));
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            LruCache::<u32, u32>::new(0),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_keys_by_recency() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, ());
        cache.put(2, ());
        cache.put(3, ());
        cache.get(&1);
        assert_eq!(cache.keys_by_recency(), vec![&1, &3, &2]);
    }

    #[test]
    fn test_matches_reference_model() {
        // Randomized ops against a naive Vec-based model.
        let mut rng = StdRng::seed_from_u64(0xCA);
        let mut cache = LruCache::new(8).unwrap();
        let mut model: Vec<(u8, u32)> = Vec::new(); // most recent first

        for _ in 0..5_000 {
            let key = rng.gen_range(0u8..32);
            if rng.gen_bool(0.5) {
                let value = rng.gen::<u32>();
                cache.put(key, value);
                model.retain(|(k, _)| *k != key);
                model.insert(0, (key, value));
                model.truncate(8);
            } else {
                let expected = model.iter().position(|(k, _)| *k == key);
                match expected {
                    Some(pos) => {
                        let entry = model.remove(pos);
                        assert_eq!(cache.get(&key), Some(&entry.1));
                        model.insert(0, entry);
                    }
                    None => assert_eq!(cache.get(&key), None),
                }
            }
            assert_eq!(cache.len(), model.len());
        }
    }
}
