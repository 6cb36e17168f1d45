//! Fenwick tree (binary indexed tree).
//!
//! Prefix sums with O(log n) point updates, driven entirely by lowbit
//! arithmetic (`i & i.wrapping_neg()`). The public API is 0-based; the
//! classic 1-based indexing lives only inside.

use crate::error::{Error, Result};

/// A Fenwick tree over `i64` values.
pub struct FenwickTree {
    // tree[0] is unused; tree[i] covers lowbit(i) positions ending at i.
    tree: Vec<i64>,
}

impl FenwickTree {
    /// Create a tree of `len` zeroed positions.
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    /// Build a tree from initial values in O(n).
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = vec![0i64; values.len() + 1];
        for (i, &v) in values.iter().enumerate() {
            let i = i + 1;
            tree[i] += v;
            let parent = i + lowbit(i);
            if parent < tree.len() {
                tree[parent] += tree[i];
            }
        }
        Self { tree }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Whether the tree has no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add `delta` to position `index`. O(log n).
    pub fn update(&mut self, index: usize, delta: i64) -> Result<()> {
        if index >= self.len() {
            return Err(Error::index_out_of_bounds(index, self.len()));
        }
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += lowbit(i);
        }
        Ok(())
    }

    /// Sum of positions `0..=index`. O(log n).
    pub fn prefix_sum(&self, index: usize) -> Result<i64> {
        if index >= self.len() {
            return Err(Error::index_out_of_bounds(index, self.len()));
        }
        let mut sum = 0;
        let mut i = index + 1;
        while i > 0 {
            sum += self.tree[i];
            i -= lowbit(i);
        }
        Ok(sum)
    }

    /// Sum of positions `left..=right`. O(log n).
    pub fn range_sum(&self, left: usize, right: usize) -> Result<i64> {
        if left > right {
            return Err(Error::invalid_argument(format!(
                "range sum with left {left} > right {right}"
            )));
        }
        let total = self.prefix_sum(right)?;
        let before = if left == 0 {
            0
        } else {
            self.prefix_sum(left - 1)?
        };
        Ok(total - before)
    }

    /// Current value at a single position. O(log n).
    pub fn value_at(&self, index: usize) -> Result<i64> {
        self.range_sum(index, index)
    }
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_lowbit() {
        assert_eq!(lowbit(1), 1);
        assert_eq!(lowbit(6), 2);
        assert_eq!(lowbit(8), 8);
        assert_eq!(lowbit(12), 4);
    }

    #[test]
    fn test_update_and_prefix_sum() {
        let mut fen = FenwickTree::new(8);
        fen.update(0, 3).unwrap();
        fen.update(3, 5).unwrap();
        fen.update(7, 2).unwrap();
        assert_eq!(fen.prefix_sum(0).unwrap(), 3);
        assert_eq!(fen.prefix_sum(2).unwrap(), 3);
        assert_eq!(fen.prefix_sum(3).unwrap(), 8);
        assert_eq!(fen.prefix_sum(7).unwrap(), 10);
    }

    #[test]
    fn test_from_values_matches_updates() {
        let values = [4, -1, 0, 7, 3, 3, -9, 2, 5];
        let built = FenwickTree::from_values(&values);
        let mut incremental = FenwickTree::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            incremental.update(i, v).unwrap();
        }
        for i in 0..values.len() {
            assert_eq!(
                built.prefix_sum(i).unwrap(),
                incremental.prefix_sum(i).unwrap()
            );
        }
    }

    #[test]
    fn test_range_sum() {
        let fen = FenwickTree::from_values(&[1, 2, 3, 4, 5]);
        assert_eq!(fen.range_sum(1, 3).unwrap(), 9);
        assert_eq!(fen.range_sum(0, 4).unwrap(), 15);
        assert_eq!(fen.range_sum(2, 2).unwrap(), 3);
        assert!(fen.range_sum(3, 2).is_err());
        assert!(fen.range_sum(0, 5).is_err());
    }

    #[test]
    fn test_value_at_after_updates() {
        let mut fen = FenwickTree::from_values(&[10, 20, 30]);
        fen.update(1, -5).unwrap();
        assert_eq!(fen.value_at(1).unwrap(), 15);
        assert_eq!(fen.value_at(0).unwrap(), 10);
    }

    #[test]
    fn test_randomized_against_naive() {
        let mut rng = StdRng::seed_from_u64(0xF3);
        let len = 64;
        let mut naive = vec![0i64; len];
        let mut fen = FenwickTree::new(len);

        for _ in 0..1000 {
            let i = rng.gen_range(0..len);
            let delta = rng.gen_range(-100..=100);
            naive[i] += delta;
            fen.update(i, delta).unwrap();

            let l = rng.gen_range(0..len);
            let r = rng.gen_range(l..len);
            let expected: i64 = naive[l..=r].iter().sum();
            assert_eq!(fen.range_sum(l, r).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let mut fen = FenwickTree::new(4);
        assert!(fen.update(4, 1).is_err());
        assert!(fen.prefix_sum(4).is_err());
    }
}
