//! Hash map with separate chaining.
//!
//! The workshop's page table: the same shape as the logical-block to
//! physical-block mapping a paged KV cache keeps, where the whole point is
//! O(1) average lookup. Collisions go into per-bucket chains; crossing a
//! 0.75 load factor doubles the bucket array and rehashes everything.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use serde::Serialize;
use tracing::debug;

const DEFAULT_BUCKETS: usize = 8;
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Rehash counters for demos and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainMapStats {
    /// Number of times the bucket array was rebuilt.
    pub rehashes: u64,
}

/// A chained hash map, generic over the hasher like the std map.
#[derive(Debug)]
pub struct ChainMap<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hasher: S,
    stats: ChainMapStats,
}

impl<K: Hash + Eq, V> ChainMap<K, V> {
    /// Create a map with the default bucket count.
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKETS)
    }

    /// Create a map with a specific initial bucket count (minimum 1).
    ///
    /// Small counts are useful for forcing collisions and rehashes in tests.
    pub fn with_bucket_count(count: usize) -> Self {
        Self::with_bucket_count_and_hasher(count, RandomState::new())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainMap<K, V, S> {
    /// Create a map with a specific bucket count and hasher.
    pub fn with_bucket_count_and_hasher(count: usize, hasher: S) -> Self {
        let count = count.max(1);
        Self {
            buckets: (0..count).map(|_| Vec::new()).collect(),
            len: 0,
            hasher,
            stats: ChainMapStats::default(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket, on average.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Rehash counters.
    pub fn stats(&self) -> ChainMapStats {
        self.stats
    }

    /// Insert a key/value pair, returning the displaced value if the key was
    /// already present. Average O(1).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key, self.buckets.len());
        let chain = &mut self.buckets[index];

        for entry in chain.iter_mut() {
            if entry.0 == key {
                return Some(std::mem::replace(&mut entry.1, value));
            }
        }

        chain.push((key, value));
        self.len += 1;

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash();
        }
        None
    }

    /// Look up a value by key. Average O(1).
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.bucket_index(key, self.buckets.len());
        self.buckets[index]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a value mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key, self.buckets.len());
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key, self.buckets.len());
        let chain = &mut self.buckets[index];
        let pos = chain.iter().position(|(k, _)| k == key)?;
        self.len -= 1;
        Some(chain.swap_remove(pos).1)
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (k, v)))
    }

    /// Length of the longest chain, the worst-case probe cost right now.
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        (self.hasher.hash_one(key) % bucket_count as u64) as usize
    }

    fn rehash(&mut self) {
        let new_count = self.buckets.len() * 2;
        debug!(
            from = self.buckets.len(),
            to = new_count,
            entries = self.len,
            "rehashing"
        );

        let mut new_buckets: Vec<Vec<(K, V)>> = (0..new_count).map(|_| Vec::new()).collect();
        for chain in self.buckets.drain(..) {
            for (key, value) in chain {
                let index = (self.hasher.hash_one(&key) % new_count as u64) as usize;
                new_buckets[index].push((key, value));
            }
        }
        self.buckets = new_buckets;
        self.stats.rehashes += 1;
    }
}

impl<K: Hash + Eq, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut map = ChainMap::new();
        assert_eq!(map.insert("block_0", 17), None);
        assert_eq!(map.insert("block_1", 23), None);
        assert_eq!(map.get(&"block_0"), Some(&17));
        assert_eq!(map.insert("block_0", 42), Some(17));
        assert_eq!(map.len(), 2);
        assert_eq!(map.remove(&"block_0"), Some(42));
        assert_eq!(map.remove(&"block_0"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_single_bucket_forces_chaining() {
        let mut map = ChainMap::with_bucket_count(1);
        map.insert(1u32, "a");
        map.insert(2, "b");
        // Two entries in one bucket crosses the 0.75 load factor, so the
        // map rehashes; both entries must survive.
        assert!(map.bucket_count() > 1);
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.get(&2), Some(&"b"));
        assert!(map.stats().rehashes >= 1);
    }

    #[test]
    fn test_rehash_preserves_all_entries() {
        let mut map = ChainMap::with_bucket_count(4);
        for i in 0..1000u32 {
            map.insert(i, i * 10);
        }
        assert_eq!(map.len(), 1000);
        assert!(map.load_factor() <= MAX_LOAD_FACTOR);
        for i in 0..1000u32 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainMap::new();
        map.insert("k", 1);
        *map.get_mut(&"k").unwrap() += 9;
        assert_eq!(map.get(&"k"), Some(&10));
        assert_eq!(map.get_mut(&"missing"), None);
    }

    #[test]
    fn test_iter_sees_everything_once() {
        let mut map = ChainMap::with_bucket_count(2);
        for i in 0..50u32 {
            map.insert(i, ());
        }
        let mut keys: Vec<u32> = map.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_insert_then_remove_all_is_empty() {
        let mut map = ChainMap::new();
        for i in 0..100u32 {
            map.insert(i, i);
        }
        for i in 0..100u32 {
            assert_eq!(map.remove(&i), Some(i));
        }
        assert!(map.is_empty());
    }
}
