//! N-ary tree: the general form of the binary tree.
//!
//! Child lists are SmallVec-backed: most nodes in practice have a handful
//! of children, so they stay inline without a heap allocation.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::error::{Error, Result};

struct Node<T> {
    value: T,
    children: SmallVec<[Box<Node<T>>; 4]>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            children: SmallVec::new(),
        })
    }
}

/// A tree where each node holds any number of ordered children.
///
/// Nodes are addressed by child-index paths from the root: `&[]` is the
/// root, `&[1, 0]` is the first child of the root's second child.
pub struct NaryTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> NaryTree<T> {
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

    /// Number of nodes on the longest root-to-leaf path. O(n).
    pub fn height(&self) -> usize {
        fn depth<T>(node: &Node<T>) -> usize {
            1 + node.children.iter().map(|c| depth(c)).max().unwrap_or(0)
        }
        self.root.as_ref().map_or(0, |r| depth(r))
    }

    /// Value at the given child-index path.
    pub fn get(&self, path: &[usize]) -> Option<&T> {
        let mut current = self.root.as_ref()?;
        for &index in path {
            current = current.children.get(index)?;
        }
        Some(&current.value)
    }

    /// Append a child under the node at `path`. O(depth).
    pub fn add_child(&mut self, path: &[usize], value: T) -> Result<()> {
        let parent = self.node_mut(path)?;
        parent.children.push(Node::new(value));
        self.len += 1;
        Ok(())
    }

    /// Number of children of the node at `path`.
    pub fn child_count(&self, path: &[usize]) -> Option<usize> {
        let mut current = self.root.as_ref()?;
        for &index in path {
            current = current.children.get(index)?;
        }
        Some(current.children.len())
    }

    fn node_mut(&mut self, path: &[usize]) -> Result<&mut Node<T>> {
        let mut current = self
            .root
            .as_mut()
            .ok_or_else(|| Error::invalid_argument("tree has no root"))?;
        for (depth, &index) in path.iter().enumerate() {
            let children = current.children.len();
            current = current.children.get_mut(index).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "child index {index} at depth {depth} out of range ({children} children)"
                ))
            })?;
        }
        Ok(current)
    }

    /// Root first, then each child subtree in order. O(n).
    pub fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        fn walk<'a, T>(node: &'a Node<T>, out: &mut Vec<&'a T>) {
            out.push(&node.value);
            for child in &node.children {
                walk(child, out);
            }
        }
        if let Some(root) = self.root.as_ref() {
            walk(root, &mut out);
        }
        out
    }

    /// Each child subtree in order, then the root. O(n).
    pub fn postorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        fn walk<'a, T>(node: &'a Node<T>, out: &mut Vec<&'a T>) {
            for child in &node.children {
                walk(child, out);
            }
            out.push(&node.value);
        }
        if let Some(root) = self.root.as_ref() {
            walk(root, &mut out);
        }
        out
    }

    /// Breadth-first, top to bottom. O(n).
    pub fn level_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_ref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            out.push(&node.value);
            for child in &node.children {
                queue.push_back(child);
            }
        }
        out
    }
}

impl<T: PartialEq> NaryTree<T> {
    /// Remove the first child of the node at `path` whose value matches,
    /// dropping its whole subtree. Returns `true` if one was removed.
    pub fn remove_child(&mut self, path: &[usize], value: &T) -> Result<bool> {
        let parent = self.node_mut(path)?;
        let Some(pos) = parent.children.iter().position(|c| c.value == *value) else {
            return Ok(false);
        };
        let removed = parent.children.remove(pos);
        self.len -= count(&removed);
        Ok(true)
    }
}

fn count<T>(node: &Node<T>) -> usize {
    1 + node.children.iter().map(|c| count(c)).sum::<usize>()
}

impl<T> Default for NaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    ///        1
    ///      / | \
    ///     2  3  4
    ///    /|     |
    ///   5 6     7
    fn sample() -> NaryTree<i32> {
        let mut tree = NaryTree::with_root(1);
        tree.add_child(&[], 2).unwrap();
        tree.add_child(&[], 3).unwrap();
        tree.add_child(&[], 4).unwrap();
        tree.add_child(&[0], 5).unwrap();
        tree.add_child(&[0], 6).unwrap();
        tree.add_child(&[2], 7).unwrap();
        tree
    }

    #[test]
    fn test_traversals() {
        let tree = sample();
        assert_eq!(tree.preorder(), [&1, &2, &5, &6, &3, &4, &7]);
        assert_eq!(tree.postorder(), [&5, &6, &2, &3, &7, &4, &1]);
        assert_eq!(tree.level_order(), [&1, &2, &3, &4, &5, &6, &7]);
    }

    #[test]
    fn test_shape() {
        let tree = sample();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.child_count(&[]), Some(3));
        assert_eq!(tree.get(&[0, 1]), Some(&6));
        assert_eq!(tree.get(&[1, 0]), None);
    }

    #[test]
    fn test_remove_child_drops_subtree() {
        let mut tree = sample();
        // Removing 2 also drops 5 and 6.
        assert!(tree.remove_child(&[], &2).unwrap());
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.level_order(), [&1, &3, &4, &7]);
        assert!(!tree.remove_child(&[], &2).unwrap());
    }

    #[test]
    fn test_bad_path_errors() {
        let mut tree = sample();
        assert!(tree.add_child(&[9], 0).is_err());
        assert!(NaryTree::<i32>::new().add_child(&[], 1).is_err());
    }
}
