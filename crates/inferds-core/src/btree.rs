//! Binary tree with the four textbook traversals.
//!
//! Nodes are addressed by paths from the root (`[Left, Right, ...]`) instead
//! of raw node pointers.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Which child of a node a path step descends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left child.
    Left,
    /// The right child.
    Right,
}

struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

/// A binary tree built by explicit placement.
pub struct BinaryTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> BinaryTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Create a tree with just a root node.
    pub fn with_root(value: T) -> Self {
        Self {
            root: Some(Node::new(value)),
            len: 1,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: number of nodes on the longest root-to-leaf
    /// path. O(n).
    pub fn height(&self) -> usize {
        fn depth<T>(node: &Option<Box<Node<T>>>) -> usize {
            node.as_ref()
                .map_or(0, |n| 1 + depth(&n.left).max(depth(&n.right)))
        }
        depth(&self.root)
    }

    /// Value at `path`, if a node exists there.
    pub fn get(&self, path: &[Side]) -> Option<&T> {
        let mut current = self.root.as_ref()?;
        for side in path {
            current = match side {
                Side::Left => current.left.as_ref()?,
                Side::Right => current.right.as_ref()?,
            };
        }
        Some(&current.value)
    }

    /// Place a node at `path`. O(depth).
    ///
    /// The parent of the target position must already exist. If a node is
    /// already at the position, it is pushed down to become the same-side
    /// child of the new node (textbook `insertLeft`/`insertRight`
    /// semantics).
    pub fn insert(&mut self, path: &[Side], value: T) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            // Empty path: new root, old root pushed down to its left.
            let mut node = Node::new(value);
            node.left = self.root.take();
            self.root = Some(node);
            self.len += 1;
            return Ok(());
        };

        let mut current = self
            .root
            .as_mut()
            .ok_or_else(|| Error::invalid_argument("tree has no root"))?;
        for (depth, side) in parents.iter().enumerate() {
            let child = match side {
                Side::Left => &mut current.left,
                Side::Right => &mut current.right,
            };
            current = child.as_mut().ok_or_else(|| {
                Error::invalid_argument(format!("no node at path depth {}", depth + 1))
            })?;
        }

        let slot = match last {
            Side::Left => &mut current.left,
            Side::Right => &mut current.right,
        };
        let mut node = Node::new(value);
        match last {
            Side::Left => node.left = slot.take(),
            Side::Right => node.right = slot.take(),
        }
        *slot = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Build a tree from a level-order array where `None` marks an absent
    /// node (the layout LeetCode uses to print trees).
    pub fn from_level_order(values: &[Option<T>]) -> Self
    where
        T: Clone,
    {
        fn build<T: Clone>(values: &[Option<T>], index: usize, len: &mut usize) -> Option<Box<Node<T>>> {
            let value = values.get(index)?.clone()?;
            *len += 1;
            let mut node = Node::new(value);
            node.left = build(values, 2 * index + 1, len);
            node.right = build(values, 2 * index + 2, len);
            Some(node)
        }

        let mut len = 0;
        let root = build(values, 0, &mut len);
        Self { root, len }
    }

    /// Root, left subtree, right subtree. O(n).
    pub fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        fn walk<'a, T>(node: &'a Option<Box<Node<T>>>, out: &mut Vec<&'a T>) {
            if let Some(n) = node {
                out.push(&n.value);
                walk(&n.left, out);
                walk(&n.right, out);
            }
        }
        walk(&self.root, &mut out);
        out
    }

    /// Left subtree, root, right subtree. O(n).
    pub fn inorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        fn walk<'a, T>(node: &'a Option<Box<Node<T>>>, out: &mut Vec<&'a T>) {
            if let Some(n) = node {
                walk(&n.left, out);
                out.push(&n.value);
                walk(&n.right, out);
            }
        }
        walk(&self.root, &mut out);
        out
    }

    /// Left subtree, right subtree, root. O(n).
    pub fn postorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        fn walk<'a, T>(node: &'a Option<Box<Node<T>>>, out: &mut Vec<&'a T>) {
            if let Some(n) = node {
                walk(&n.left, out);
                walk(&n.right, out);
                out.push(&n.value);
            }
        }
        walk(&self.root, &mut out);
        out
    }

    /// Breadth-first, top to bottom, left to right. O(n).
    pub fn level_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_ref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            out.push(&node.value);
            if let Some(left) = node.left.as_ref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_ref() {
                queue.push_back(right);
            }
        }
        out
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
