//! AVL tree, a self-balancing binary search tree.
//!
//! Every node's subtree heights differ by at most one; insert and remove
//! restore that with single or double rotations, keeping all operations
//! O(log n).

use serde::Serialize;
use tracing::trace;

/// Rotation counters, handy for demonstrating how much rebalancing a
/// workload actually causes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvlStats {
    /// Single left rotations.
    pub left_rotations: u64,
    /// Single right rotations.
    pub right_rotations: u64,
}

struct Node<T> {
    value: T,
    height: u32,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

fn height<T>(node: &Option<Box<Node<T>>>) -> u32 {
    node.as_ref().map_or(0, |n| n.height)
}

/// A set of ordered values stored in an AVL tree.
pub struct AvlTree<T: Ord> {
    root: Option<Box<Node<T>>>,
    len: usize,
    stats: AvlStats,
}

impl<T: Ord> AvlTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            stats: AvlStats::default(),
        }
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 for an empty tree).
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Rotation counters.
    pub fn stats(&self) -> AvlStats {
        self.stats
    }

    /// Insert a value. Returns `false` (and changes nothing) if it was
    /// already present. O(log n).
    pub fn insert(&mut self, value: T) -> bool {
        let root = self.root.take();
        let (root, inserted) = Self::insert_node(root, value, &mut self.stats);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a value. Returns `true` if it was present. O(log n).
    pub fn remove(&mut self, value: &T) -> bool {
        let root = self.root.take();
        let (root, removed) = Self::remove_node(root, value, &mut self.stats);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Whether the value is present. O(log n).
    pub fn contains(&self, value: &T) -> bool {
        let mut current = &self.root;
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => &node.left,
                std::cmp::Ordering::Greater => &node.right,
            };
        }
        false
    }

    /// Smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut current = self.root.as_ref()?;
        while let Some(left) = current.left.as_ref() {
            current = left;
        }
        Some(&current.value)
    }

    /// Largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_ref()?;
        while let Some(right) = current.right.as_ref() {
            current = right;
        }
        Some(&current.value)
    }

    /// Iterate over the values in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(&self.root);
        iter
    }

    fn insert_node(
        node: Option<Box<Node<T>>>,
        value: T,
        stats: &mut AvlStats,
    ) -> (Box<Node<T>>, bool) {
        let mut node = match node {
            None => return (Node::new(value), true),
            Some(node) => node,
        };

        let inserted = match value.cmp(&node.value) {
            std::cmp::Ordering::Equal => false,
            std::cmp::Ordering::Less => {
                let (left, inserted) = Self::insert_node(node.left.take(), value, stats);
                node.left = Some(left);
                inserted
            }
            std::cmp::Ordering::Greater => {
                let (right, inserted) = Self::insert_node(node.right.take(), value, stats);
                node.right = Some(right);
                inserted
            }
        };

        (Self::rebalance(node, stats), inserted)
    }

    fn remove_node(
        node: Option<Box<Node<T>>>,
        value: &T,
        stats: &mut AvlStats,
    ) -> (Option<Box<Node<T>>>, bool) {
        let mut node = match node {
            None => return (None, false),
            Some(node) => node,
        };

        let removed = match value.cmp(&node.value) {
            std::cmp::Ordering::Less => {
                let (left, removed) = Self::remove_node(node.left.take(), value, stats);
                node.left = left;
                removed
            }
            std::cmp::Ordering::Greater => {
                let (right, removed) = Self::remove_node(node.right.take(), value, stats);
                node.right = right;
                removed
            }
            std::cmp::Ordering::Equal => {
                return match (node.left.take(), node.right.take()) {
                    (None, None) => (None, true),
                    (Some(child), None) | (None, Some(child)) => (Some(child), true),
                    (Some(left), Some(right)) => {
                        // Replace with the in-order successor (leftmost of
                        // the right subtree), then remove it from there.
                        let (right, successor) = Self::take_min(right, stats);
                        let mut successor = successor;
                        successor.left = Some(left);
                        successor.right = right;
                        (Some(Self::rebalance(successor, stats)), true)
                    }
                };
            }
        };

        (Some(Self::rebalance(node, stats)), removed)
    }

    fn take_min(
        mut node: Box<Node<T>>,
        stats: &mut AvlStats,
    ) -> (Option<Box<Node<T>>>, Box<Node<T>>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Self::take_min(left, stats);
                node.left = left;
                (Some(Self::rebalance(node, stats)), min)
            }
        }
    }

    fn rebalance(mut node: Box<Node<T>>, stats: &mut AvlStats) -> Box<Node<T>> {
        node.update_height();
        let balance = node.balance_factor();

        if balance > 1 {
            // Left-heavy. A left-leaning-right child needs a double rotation.
            if node.left.as_ref().is_some_and(|l| l.balance_factor() < 0) {
                let left = node.left.take().unwrap();
                node.left = Some(Self::rotate_left(left, stats));
            }
            return Self::rotate_right(node, stats);
        }
        if balance < -1 {
            if node.right.as_ref().is_some_and(|r| r.balance_factor() > 0) {
                let right = node.right.take().unwrap();
                node.right = Some(Self::rotate_right(right, stats));
            }
            return Self::rotate_left(node, stats);
        }
        node
    }

    fn rotate_left(mut node: Box<Node<T>>, stats: &mut AvlStats) -> Box<Node<T>> {
        trace!("left rotation");
        let mut new_root = node.right.take().expect("left rotation needs a right child");
        node.right = new_root.left.take();
        node.update_height();
        new_root.left = Some(node);
        new_root.update_height();
        stats.left_rotations += 1;
        new_root
    }

    fn rotate_right(mut node: Box<Node<T>>, stats: &mut AvlStats) -> Box<Node<T>> {
        trace!("right rotation");
        let mut new_root = node.left.take().expect("right rotation needs a left child");
        node.left = new_root.right.take();
        node.update_height();
        new_root.right = Some(node);
        new_root.update_height();
        stats.right_rotations += 1;
        new_root
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

/// In-order iterator over an [`AvlTree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: &'a Option<Box<Node<T>>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = &n.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some(&node.value)
    }
}
