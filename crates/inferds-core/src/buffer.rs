//! Growable contiguous buffer.
//!
//! The workshop's stand-in for the storage behind a KV cache or a flat
//! tensor: elements live in one contiguous allocation, growth doubles the
//! capacity, and `strided` walks the buffer the way a tensor view walks a
//! dimension.

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};

/// Reallocation counters, exposed so demos can show the amortized-growth
/// behavior instead of asserting it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowBufStats {
    /// Number of capacity-doubling reallocations.
    pub grows: u64,
    /// Number of capacity-halving shrinks.
    pub shrinks: u64,
}

/// A dynamic array with explicit growth policy.
///
/// Capacity grows 0 → 1 → 2x on append and halves when the length drops
/// below a quarter of capacity. Accessors
/// that can fail return [`Result`]; `Index`/`IndexMut` panic like the std
/// containers do.
#[derive(Debug, Clone)]
pub struct GrowBuf<T> {
    data: Vec<T>,
    /// Policy capacity. `data` is kept reserved to exactly this many slots.
    cap: usize,
    stats: GrowBufStats,
}

impl<T> GrowBuf<T> {
    /// Create an empty buffer with no allocation.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            cap: 0,
            stats: GrowBufStats::default(),
        }
    }

    /// Create an empty buffer with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cap: capacity,
            stats: GrowBufStats::default(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current policy capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Reallocation counters.
    pub fn stats(&self) -> GrowBufStats {
        self.stats
    }

    /// Append an element, doubling capacity when full. Amortized O(1).
    pub fn push(&mut self, value: T) {
        if self.data.len() == self.cap {
            let new_cap = if self.cap == 0 { 1 } else { self.cap * 2 };
            self.grow_to(new_cap);
        }
        self.data.push(value);
    }

    /// Remove and return the last element.
    ///
    /// Shrinks capacity to half once the length falls below a quarter of it.
    pub fn pop(&mut self) -> Result<T> {
        let value = self.data.pop().ok_or(Error::empty("GrowBuf"))?;
        if self.cap > 0 && self.data.len() < self.cap / 4 {
            let new_cap = self.cap / 2;
            trace!(from = self.cap, to = new_cap, "shrinking buffer");
            self.data.shrink_to(new_cap);
            self.cap = new_cap;
            self.stats.shrinks += 1;
        }
        Ok(value)
    }

    /// Bounds-checked element access.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.data
            .get(index)
            .ok_or(Error::index_out_of_bounds(index, self.data.len()))
    }

    /// Bounds-checked mutable element access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(Error::index_out_of_bounds(index, len))
    }

    /// Insert an element at `index`, shifting everything after it. O(n).
    ///
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.data.len() {
            return Err(Error::index_out_of_bounds(index, self.data.len()));
        }
        if self.data.len() == self.cap {
            let new_cap = if self.cap == 0 { 1 } else { self.cap * 2 };
            self.grow_to(new_cap);
        }
        self.data.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail. O(n).
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.data.len() {
            return Err(Error::index_out_of_bounds(index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// View the elements as a contiguous slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn grow_to(&mut self, new_cap: usize) {
        trace!(from = self.cap, to = new_cap, "growing buffer");
        self.data.reserve_exact(new_cap - self.data.len());
        self.cap = new_cap;
        self.stats.grows += 1;
    }
}

impl<T: Clone> GrowBuf<T> {
    /// Walk the buffer from `start_index` in steps of `stride`, collecting
    /// every element visited.
    ///
    /// A positive stride walks toward the end, a negative stride toward the
    /// start (stopping cleanly at index 0, never underflowing). A
    /// stride of zero is rejected.
    pub fn strided(&self, start_index: usize, stride: isize) -> Result<Vec<T>> {
        if start_index >= self.data.len() {
            return Err(Error::index_out_of_bounds(start_index, self.data.len()));
        }
        if stride == 0 {
            return Err(Error::invalid_argument("stride cannot be zero"));
        }

        let mut result = Vec::new();
        let mut current = start_index;

        if stride > 0 {
            let step = stride as usize;
            while current < self.data.len() {
                result.push(self.data[current].clone());
                current += step;
            }
        } else {
            let step = stride.unsigned_abs();
            loop {
                result.push(self.data[current].clone());
                if step > current {
                    break;
                }
                current -= step;
            }
        }

        Ok(result)
    }
}

impl<T> Default for GrowBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<usize> for GrowBuf<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> std::ops::IndexMut<usize> for GrowBuf<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> FromIterator<T> for GrowBuf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Self::new();
        for value in iter {
            buf.push(value);
        }
        buf
    }
}

impl<'a, T> IntoIterator for &'a GrowBuf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_doubles_capacity() {
        let mut buf = GrowBuf::new();
        let mut caps = Vec::new();
        for i in 0..9 {
            buf.push(i);
            caps.push(buf.capacity());
        }
        assert_eq!(caps, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(buf.stats().grows, 5);
    }

    #[test]
    fn test_pop_shrinks_below_quarter() {
        let mut buf: GrowBuf<i32> = (0..16).collect();
        assert_eq!(buf.capacity(), 16);

        // Popping down to 4 leaves len == cap / 4, no shrink yet.
        for _ in 0..12 {
            buf.pop().unwrap();
        }
        assert_eq!(buf.capacity(), 16);

        // One more pop drops len below cap / 4.
        buf.pop().unwrap();
        assert_eq!(buf.capacity(), 8);
        assert!(buf.stats().shrinks >= 1);
    }

    #[test]
    fn test_pop_empty_errors() {
        let mut buf: GrowBuf<i32> = GrowBuf::new();
        assert_eq!(buf.pop(), Err(Error::empty("GrowBuf")));
    }

    #[test]
    fn test_get_and_index() {
        let mut buf: GrowBuf<i32> = (10..15).collect();
        assert_eq!(*buf.get(0).unwrap(), 10);
        assert!(buf.get(5).is_err());
        buf[2] = 99;
        assert_eq!(buf[2], 99);
    }

    #[test]
    fn test_insert_remove_shift() {
        let mut buf: GrowBuf<i32> = (0..5).collect();
        buf.insert(2, 42).unwrap();
        assert_eq!(buf.as_slice(), &[0, 1, 42, 2, 3, 4]);
        assert_eq!(buf.remove(2).unwrap(), 42);
        assert_eq!(buf.as_slice(), &[0, 1, 2, 3, 4]);
        assert!(buf.insert(99, 0).is_err());
        assert!(buf.remove(99).is_err());
    }

    #[test]
    fn test_strided_forward() {
        let buf: GrowBuf<i32> = (0..10).collect();
        assert_eq!(buf.strided(1, 3).unwrap(), vec![1, 4, 7]);
    }

    #[test]
    fn test_strided_backward_stops_at_zero() {
        let buf: GrowBuf<i32> = (0..10).collect();
        // Visits 5, 3, 1; then 1 - 2 would underflow, so the walk stops.
        assert_eq!(buf.strided(5, -2).unwrap(), vec![5, 3, 1]);
        // From an even index the walk reaches 0 and stops there.
        assert_eq!(buf.strided(4, -2).unwrap(), vec![4, 2, 0]);
    }

    #[test]
    fn test_strided_rejects_bad_args() {
        let buf: GrowBuf<i32> = (0..4).collect();
        assert!(buf.strided(4, 1).is_err());
        assert!(matches!(
            buf.strided(0, 0),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a: GrowBuf<i32> = (0..4).collect();
        let b = a.clone();
        a[0] = 100;
        assert_eq!(b[0], 0);
    }

    #[test]
    fn test_fill_then_drain_leaves_empty() {
        let mut buf = GrowBuf::new();
        for i in 0..100 {
            buf.push(i);
        }
        for _ in 0..100 {
            buf.pop().unwrap();
        }
        assert!(buf.is_empty());
    }
}
