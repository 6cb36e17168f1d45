//! Circular structures: a linked ring and a bounded ring queue.
//!
//! The ring queue is the fixed-budget variant: the shape of anything that
//! recycles a bounded pool of slots in FIFO order.

use crate::error::{Error, Result};

/// A stable reference to a [`CircularList`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingHandle {
    slot: usize,
    generation: u32,
}

struct RingSlot<T> {
    generation: u32,
    occupied: Option<(T, usize)>, // (value, next slot)
}

/// A singly linked circular list: the last node points back at the first,
/// so traversal from any node reaches every node.
pub struct CircularList<T> {
    slots: Vec<RingSlot<T>>,
    free: Vec<usize>,
    /// The tail node; the head is always `tail.next`.
    tail: Option<usize>,
    len: usize,
}

impl<T> CircularList<T> {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the ring has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append at the back (just before the head). O(1).
    pub fn push_back(&mut self, value: T) -> RingHandle {
        let slot = self.splice_after_tail(value);
        self.tail = Some(slot);
        self.handle(slot)
    }

    /// Prepend at the front (the slot right after the tail). O(1).
    pub fn push_front(&mut self, value: T) -> RingHandle {
        let slot = self.splice_after_tail(value);
        self.handle(slot)
    }

    /// Insert after an existing node. O(1).
    pub fn insert_after(&mut self, handle: RingHandle, value: T) -> Result<RingHandle> {
        self.check(handle)?;
        let next = self.next_of(handle.slot);
        let slot = self.alloc(value, next);
        self.set_next(handle.slot, slot);
        if self.tail == Some(handle.slot) {
            self.tail = Some(slot);
        }
        self.len += 1;
        Ok(self.handle(slot))
    }

    /// Value of a node by handle.
    pub fn value(&self, handle: RingHandle) -> Result<&T> {
        self.check(handle)?;
        Ok(&self.slots[handle.slot].occupied.as_ref().expect("checked").0)
    }

    /// Front value (the head of the ring).
    pub fn front(&self) -> Option<&T> {
        let tail = self.tail?;
        let head = self.next_of(tail);
        Some(&self.slots[head].occupied.as_ref().expect("slot is live").0)
    }

    /// Rotate the ring by one: the head becomes the tail.
    pub fn rotate(&mut self) {
        if let Some(tail) = self.tail {
            self.tail = Some(self.next_of(tail));
        }
    }

    /// One full cycle, starting at the head.
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            current: self.tail.map(|t| self.next_of(t)),
            remaining: self.len,
        }
    }

    fn splice_after_tail(&mut self, value: T) -> usize {
        match self.tail {
            None => {
                let slot = self.alloc_self_loop(value);
                self.tail = Some(slot);
                self.len += 1;
                slot
            }
            Some(tail) => {
                let head = self.next_of(tail);
                let slot = self.alloc(value, head);
                self.set_next(tail, slot);
                self.len += 1;
                slot
            }
        }
    }

    fn alloc_self_loop(&mut self, value: T) -> usize {
        let slot = self.alloc_raw();
        self.slots[slot].occupied = Some((value, slot));
        slot
    }

    fn alloc(&mut self, value: T, next: usize) -> usize {
        let slot = self.alloc_raw();
        self.slots[slot].occupied = Some((value, next));
        slot
    }

    fn alloc_raw(&mut self) -> usize {
        match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(RingSlot {
                    generation: 0,
                    occupied: None,
                });
                self.slots.len() - 1
            }
        }
    }

    fn free_slot(&mut self, slot: usize) -> T {
        let (value, _) = self.slots[slot].occupied.take().expect("slot is live");
        self.slots[slot].generation += 1;
        self.free.push(slot);
        self.len -= 1;
        value
    }

    fn handle(&self, slot: usize) -> RingHandle {
        RingHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn check(&self, handle: RingHandle) -> Result<()> {
        let live = self
            .slots
            .get(handle.slot)
            .is_some_and(|s| s.generation == handle.generation && s.occupied.is_some());
        if live {
            Ok(())
        } else {
            Err(Error::stale_handle(handle.slot))
        }
    }

    fn next_of(&self, slot: usize) -> usize {
        self.slots[slot].occupied.as_ref().expect("slot is live").1
    }

    fn set_next(&mut self, slot: usize, next: usize) {
        self.slots[slot].occupied.as_mut().expect("slot is live").1 = next;
    }
}

impl<T: PartialEq> CircularList<T> {
    /// Handle of the first node holding `value`, searching from the head.
    /// O(n).
    pub fn find(&self, value: &T) -> Option<RingHandle> {
        let tail = self.tail?;
        let mut current = self.next_of(tail);
        for _ in 0..self.len {
            if self.slots[current].occupied.as_ref().expect("slot is live").0 == *value {
                return Some(self.handle(current));
            }
            current = self.next_of(current);
        }
        None
    }

    /// Remove the first node holding `value`, searching from the head.
    /// Returns `true` if one was removed. O(n).
    pub fn remove_value(&mut self, value: &T) -> bool {
        let Some(tail) = self.tail else {
            return false;
        };

        let mut prev = tail;
        let mut current = self.next_of(tail);
        for _ in 0..self.len {
            let matches =
                self.slots[current].occupied.as_ref().expect("slot is live").0 == *value;
            if matches {
                if self.len == 1 {
                    self.tail = None;
                } else {
                    let next = self.next_of(current);
                    self.set_next(prev, next);
                    if self.tail == Some(current) {
                        self.tail = Some(prev);
                    }
                }
                self.free_slot(current);
                return true;
            }
            prev = current;
            current = self.next_of(current);
        }
        false
    }
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Self::new();
        for value in iter {
            ring.push_back(value);
        }
        ring
    }
}

/// Iterator over one full cycle of a [`CircularList`].
pub struct RingIter<'a, T> {
    ring: &'a CircularList<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.current?;
        let (value, next) = self.ring.slots[slot]
            .occupied
            .as_ref()
            .map(|(v, n)| (v, *n))
            .expect("slot is live");
        self.current = Some(next);
        self.remaining -= 1;
        Some(value)
    }
}

/// A fixed-capacity FIFO queue over a circular buffer.
pub struct RingQueue<T> {
    cells: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingQueue<T> {
    /// Create a queue with room for `capacity` elements.
    ///
    /// A capacity of zero is rejected.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("ring queue capacity must be nonzero"));
        }
        Ok(Self {
            cells: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        })
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.len == self.cells.len()
    }

    /// Add at the back. O(1). Errors when full.
    pub fn enqueue(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::full("RingQueue", self.cells.len()));
        }
        let index = (self.head + self.len) % self.cells.len();
        self.cells[index] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Remove from the front. O(1). Errors when empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::empty("RingQueue"));
        }
        let value = self.cells[self.head].take().expect("head is occupied");
        self.head = (self.head + 1) % self.cells.len();
        self.len -= 1;
        Ok(value)
    }

    /// Front element.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.cells[self.head].as_ref()
    }

    /// Back element.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let index = (self.head + self.len - 1) % self.cells.len();
        self.cells[index].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_push_and_cycle() {
        let ring: CircularList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(ring.front(), Some(&1));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_push_front() {
        let mut ring: CircularList<i32> = [2, 3].into_iter().collect();
        ring.push_front(1);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_last_points_back_to_head() {
        let mut ring = CircularList::new();
        ring.push_back("a");
        ring.push_back("b");
        // Rotating twice comes back around.
        ring.rotate();
        assert_eq!(ring.front(), Some(&"b"));
        ring.rotate();
        assert_eq!(ring.front(), Some(&"a"));
    }

    #[test]
    fn test_insert_after() {
        let mut ring: CircularList<i32> = [1, 3].into_iter().collect();
        let h = ring.find(&1).unwrap();
        ring.insert_after(h, 2).unwrap();
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        // Inserting after the tail moves the tail.
        let h = ring.find(&3).unwrap();
        ring.insert_after(h, 4).unwrap();
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_value() {
        let mut ring: CircularList<i32> = [1, 2, 3].into_iter().collect();
        assert!(ring.remove_value(&2));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!ring.remove_value(&9));

        // Removing the tail keeps the ring closed.
        assert!(ring.remove_value(&3));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(ring.remove_value(&1));
        assert!(ring.is_empty());
        assert_eq!(ring.front(), None);
    }

    #[test]
    fn test_stale_ring_handle() {
        let mut ring = CircularList::new();
        ring.push_back(1);
        let h = ring.find(&1).unwrap();
        ring.remove_value(&1);
        ring.push_back(2);
        assert!(ring.value(h).is_err());
    }

    #[test]
    fn test_queue_fifo_with_wraparound() {
        let mut q = RingQueue::new(3).unwrap();
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        q.enqueue(3).unwrap();
        assert!(q.is_full());
        assert!(matches!(q.enqueue(4), Err(Error::Full { .. })));

        assert_eq!(q.dequeue().unwrap(), 1);
        q.enqueue(4).unwrap(); // wraps into the freed cell
        assert_eq!(q.front(), Some(&2));
        assert_eq!(q.back(), Some(&4));
        assert_eq!(q.dequeue().unwrap(), 2);
        assert_eq!(q.dequeue().unwrap(), 3);
        assert_eq!(q.dequeue().unwrap(), 4);
        assert!(q.dequeue().unwrap_err().is_empty_error());
    }

    #[test]
    fn test_queue_zero_capacity_rejected() {
        assert!(matches!(RingQueue::<i32>::new(0), Err(Error::Config { .. })));
    }

    #[test]
    fn test_queue_long_churn() {
        let mut q = RingQueue::new(4).unwrap();
        for i in 0..100 {
            q.enqueue(i).unwrap();
            assert_eq!(q.dequeue().unwrap(), i);
        }
        assert!(q.is_empty());
    }
}
