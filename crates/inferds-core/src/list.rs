//! Doubly linked list over a slab arena.
//!
//! Nodes live in a slot arena and link to each other by slot index; freed
//! slots go onto a LIFO free list and get reused by later insertions. That
//! is the same shape as a block allocator handing out physical blocks, and
//! it sidesteps the aliasing problems a pointer-based doubly linked list
//! has in safe Rust: callers hold [`NodeHandle`]s, not references, and a
//! generation counter catches handles that outlive their node.

use tracing::trace;

use crate::error::{Error, Result};

/// A stable reference to a list node.
///
/// Handles stay valid until their node is removed; using one after that
/// returns [`Error::StaleHandle`] instead of touching a reused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    slot: usize,
    generation: u32,
}

struct Occupied<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u32,
    occupied: Option<Occupied<T>>,
}

/// A doubly linked list with O(1) insertion and removal at known nodes.
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of freed slots available for reuse.
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Append at the back. O(1).
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let slot = self.alloc(value, self.tail, None);
        match self.tail {
            Some(old_tail) => self.link_next(old_tail, Some(slot)),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
        self.handle(slot)
    }

    /// Prepend at the front. O(1).
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let slot = self.alloc(value, None, self.head);
        match self.head {
            Some(old_head) => self.link_prev(old_head, Some(slot)),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
        self.handle(slot)
    }

    /// Insert right after an existing node. O(1).
    pub fn insert_after(&mut self, handle: NodeHandle, value: T) -> Result<NodeHandle> {
        self.check(handle)?;
        let next = self.occupied(handle.slot).next;
        let slot = self.alloc(value, Some(handle.slot), next);
        self.link_next(handle.slot, Some(slot));
        match next {
            Some(next_slot) => self.link_prev(next_slot, Some(slot)),
            None => self.tail = Some(slot),
        }
        self.len += 1;
        Ok(self.handle(slot))
    }

    /// Insert right before an existing node. O(1).
    pub fn insert_before(&mut self, handle: NodeHandle, value: T) -> Result<NodeHandle> {
        self.check(handle)?;
        let prev = self.occupied(handle.slot).prev;
        let slot = self.alloc(value, prev, Some(handle.slot));
        self.link_prev(handle.slot, Some(slot));
        match prev {
            Some(prev_slot) => self.link_next(prev_slot, Some(slot)),
            None => self.head = Some(slot),
        }
        self.len += 1;
        Ok(self.handle(slot))
    }

    /// Remove a node by handle, returning its value. O(1).
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T> {
        self.check(handle)?;
        Ok(self.unlink(handle.slot))
    }

    /// Remove and return the front value.
    pub fn pop_front(&mut self) -> Result<T> {
        let head = self.head.ok_or(Error::empty("LinkedList"))?;
        Ok(self.unlink(head))
    }

    /// Remove and return the back value.
    pub fn pop_back(&mut self) -> Result<T> {
        let tail = self.tail.ok_or(Error::empty("LinkedList"))?;
        Ok(self.unlink(tail))
    }

    /// Value of a node by handle.
    pub fn value(&self, handle: NodeHandle) -> Result<&T> {
        self.check(handle)?;
        Ok(&self.occupied(handle.slot).value)
    }

    /// Mutable value of a node by handle.
    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<&mut T> {
        self.check(handle)?;
        Ok(&mut self
            .slots[handle.slot]
            .occupied
            .as_mut()
            .expect("checked above")
            .value)
    }

    /// Front value.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|slot| &self.occupied(slot).value)
    }

    /// Back value.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|slot| &self.occupied(slot).value)
    }

    /// Handle of the front node.
    pub fn front_handle(&self) -> Option<NodeHandle> {
        self.head.map(|slot| self.handle(slot))
    }

    /// Handle of the back node.
    pub fn back_handle(&self) -> Option<NodeHandle> {
        self.tail.map(|slot| self.handle(slot))
    }

    /// Value at a position from the front. O(n).
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(Error::index_out_of_bounds(index, self.len));
        }
        let mut current = self.head;
        for _ in 0..index {
            current = self.occupied(current.expect("within len")).next;
        }
        Ok(&self.occupied(current.expect("within len")).value)
    }

    /// Iterate front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            forward: true,
        }
    }

    /// Iterate back to front.
    pub fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.tail,
            forward: false,
        }
    }

    fn alloc(&mut self, value: T, prev: Option<usize>, next: Option<usize>) -> usize {
        let occupied = Occupied { value, prev, next };
        match self.free.pop() {
            Some(slot) => {
                trace!(slot, "reusing freed slot");
                self.slots[slot].occupied = Some(occupied);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    occupied: Some(occupied),
                });
                self.slots.len() - 1
            }
        }
    }

    fn unlink(&mut self, slot: usize) -> T {
        let occupied = self.slots[slot].occupied.take().expect("slot is live");
        match occupied.prev {
            Some(prev) => self.link_next(prev, occupied.next),
            None => self.head = occupied.next,
        }
        match occupied.next {
            Some(next) => self.link_prev(next, occupied.prev),
            None => self.tail = occupied.prev,
        }
        // Bump the generation so outstanding handles to this slot go stale.
        self.slots[slot].generation += 1;
        self.free.push(slot);
        self.len -= 1;
        occupied.value
    }

    fn handle(&self, slot: usize) -> NodeHandle {
        NodeHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn check(&self, handle: NodeHandle) -> Result<()> {
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

    fn occupied(&self, slot: usize) -> &Occupied<T> {
        self.slots[slot].occupied.as_ref().expect("slot is live")
    }

    fn link_next(&mut self, slot: usize, next: Option<usize>) {
        self.slots[slot].occupied.as_mut().expect("slot is live").next = next;
    }

    fn link_prev(&mut self, slot: usize, prev: Option<usize>) {
        self.slots[slot].occupied.as_mut().expect("slot is live").prev = prev;
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Handle of the first node holding `value`. O(n).
    pub fn find(&self, value: &T) -> Option<NodeHandle> {
        let mut current = self.head;
        while let Some(slot) = current {
            let occupied = self.occupied(slot);
            if occupied.value == *value {
                return Some(self.handle(slot));
            }
            current = occupied.next;
        }
        None
    }

    /// Remove the first node holding `value`. Returns `true` if one was
    /// removed. O(n).
    pub fn remove_value(&mut self, value: &T) -> bool {
        match self.find(value) {
            Some(handle) => {
                self.unlink(handle.slot);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Iterator over a [`LinkedList`], in either direction.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<usize>,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let slot = self.current?;
        let occupied = self.list.occupied(slot);
        self.current = if self.forward {
            occupied.next
        } else {
            occupied.prev
        };
        Some(&occupied.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_vec<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_push_and_iterate_both_ways() {
        let mut list = LinkedList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(to_vec(&list), vec![1, 2, 3]);
        assert_eq!(list.iter_rev().cloned().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn test_insert_around_handle() {
        let mut list = LinkedList::new();
        let b = list.push_back("b");
        list.insert_before(b, "a").unwrap();
        list.insert_after(b, "c").unwrap();
        assert_eq!(to_vec(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_by_handle() {
        let mut list: LinkedList<i32> = (0..5).collect();
        let h = list.find(&2).unwrap();
        assert_eq!(list.remove(h).unwrap(), 2);
        assert_eq!(to_vec(&list), vec![0, 1, 3, 4]);
        // The handle is now stale.
        assert_eq!(list.remove(h), Err(Error::stale_handle(2)));
    }

    #[test]
    fn test_stale_handle_survives_slot_reuse() {
        let mut list = LinkedList::new();
        let h = list.push_back(1);
        list.remove(h).unwrap();
        // The freed slot is reused for the next push.
        list.push_back(2);
        assert_eq!(list.free_slots(), 0);
        assert!(list.value(h).is_err());
    }

    #[test]
    fn test_remove_value_and_find() {
        let mut list: LinkedList<i32> = [5, 7, 5].into_iter().collect();
        assert!(list.remove_value(&5));
        assert_eq!(to_vec(&list), vec![7, 5]);
        assert!(!list.remove_value(&99));
        assert!(list.find(&7).is_some());
    }

    #[test]
    fn test_get_by_index() {
        let list: LinkedList<i32> = (10..15).collect();
        assert_eq!(*list.get(0).unwrap(), 10);
        assert_eq!(*list.get(4).unwrap(), 14);
        assert!(list.get(5).is_err());
    }

    #[test]
    fn test_pop_front_back() {
        let mut list: LinkedList<i32> = (0..3).collect();
        assert_eq!(list.pop_front().unwrap(), 0);
        assert_eq!(list.pop_back().unwrap(), 2);
        assert_eq!(list.pop_back().unwrap(), 1);
        assert!(list.pop_back().unwrap_err().is_empty_error());
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
    }

    #[test]
    fn test_slot_reuse_is_lifo() {
        let mut list: LinkedList<i32> = (0..4).collect();
        list.pop_front().unwrap();
        list.pop_front().unwrap();
        assert_eq!(list.free_slots(), 2);
        list.push_back(9);
        // One slot came off the free list.
        assert_eq!(list.free_slots(), 1);
        assert_eq!(to_vec(&list), vec![2, 3, 9]);
    }

    #[test]
    fn test_churn_keeps_links_consistent() {
        let mut list = LinkedList::new();
        let mut handles = Vec::new();
        for i in 0..50 {
            handles.push(list.push_back(i));
        }
        for h in handles.iter().step_by(2) {
            list.remove(*h).unwrap();
        }
        assert_eq!(list.len(), 25);
        let forward: Vec<i32> = list.iter().cloned().collect();
        let mut backward: Vec<i32> = list.iter_rev().cloned().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward, (1..50).step_by(2).collect::<Vec<_>>());
    }
}
