//! Trie (prefix tree).
//!
//! The structure behind prefix caching: sequences that share a prefix share
//! the nodes that spell it, so "how much of this have I seen before" is a
//! single walk. Insert, lookup and prefix queries all cost O(m) in the
//! length of the word.

use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_end: bool,
}

/// A set of strings stored by shared prefix.
#[derive(Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie stores no words.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a word. Returns `false` if it was already present. O(m).
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.is_end {
            return false;
        }
        node.is_end = true;
        self.len += 1;
        true
    }

    /// Whether the exact word is stored. O(m).
    pub fn contains(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|node| node.is_end)
    }

    /// Whether any stored word starts with `prefix`. O(m).
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// All stored words beginning with `prefix`, in lexicographic order.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let Some(node) = self.walk(prefix) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut current = String::from(prefix);
        collect(node, &mut current, &mut out);
        out
    }

    /// Remove a word. Returns `false` if it was not stored. O(m).
    ///
    /// Nodes that no longer lead to any word are pruned; words that extend
    /// the removed one are untouched.
    pub fn remove(&mut self, word: &str) -> bool {
        fn recurse(node: &mut TrieNode, mut chars: std::str::Chars<'_>) -> (bool, bool) {
            // Returns (removed, prune_child).
            match chars.next() {
                None => {
                    if !node.is_end {
                        return (false, false);
                    }
                    node.is_end = false;
                    (true, node.children.is_empty())
                }
                Some(ch) => {
                    let Some(child) = node.children.get_mut(&ch) else {
                        return (false, false);
                    };
                    let (removed, prune) = recurse(child, chars);
                    if prune {
                        node.children.remove(&ch);
                    }
                    (
                        removed,
                        removed && !node.is_end && node.children.is_empty(),
                    )
                }
            }
        }

        let (removed, _) = recurse(&mut self.root, word.chars());
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Length of the longest stored-prefix match for `word`: how many
    /// leading characters of `word` spell a word in the trie.
    pub fn longest_prefix_of(&self, word: &str) -> usize {
        let mut node = &self.root;
        let mut best = 0;
        for (i, ch) in word.chars().enumerate() {
            match node.children.get(&ch) {
                None => break,
                Some(child) => {
                    node = child;
                    if node.is_end {
                        best = i + 1;
                    }
                }
            }
        }
        best
    }

    fn walk(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

fn collect(node: &TrieNode, current: &mut String, out: &mut Vec<String>) {
    if node.is_end {
        out.push(current.clone());
    }
    let mut keys: Vec<char> = node.children.keys().copied().collect();
    keys.sort_unstable();
    for ch in keys {
        current.push(ch);
        collect(&node.children[&ch], current, out);
        current.pop();
    }
}
