//! # Inferds Core
//!
//! Data structures for inference-serving workloads, built from scratch.
//!
//! Each module is one structure with its full operation set, explicit
//! complexity notes, and `Result`-based bounds checking:
//!
//! - **Linear storage**: [`buffer::GrowBuf`] (growable array),
//!   [`list::LinkedList`] (slab-backed doubly linked list),
//!   [`ring::CircularList`] and [`ring::RingQueue`]
//! - **Maps and caches**: [`page_table::ChainMap`] (chained hash map),
//!   [`lru::LruCache`]
//! - **Trees**: [`avl::AvlTree`], [`btree::BinaryTree`],
//!   [`ntree::NaryTree`], [`prefix::Trie`], [`fenwick::FenwickTree`]
//! - **Graphs**: [`graph::AdjacencyList`], [`graph::AdjacencyMatrix`],
//!   [`graph::WeightedGraph`] with Dijkstra shortest paths
//!
//! ## Example
//!
//! ```rust
//! use inferds_core::{buffer::GrowBuf, error::Result};
//!
//! fn tail(buf: &GrowBuf<u32>) -> Result<&u32> {
//!     buf.get(buf.len() - 1)
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod avl;
pub mod btree;
pub mod buffer;
pub mod error;
pub mod fenwick;
pub mod graph;
pub mod list;
pub mod lru;
pub mod ntree;
pub mod page_table;
pub mod prefix;
pub mod ring;

pub use avl::AvlTree;
pub use btree::BinaryTree;
pub use buffer::GrowBuf;
pub use error::{Error, Result};
pub use fenwick::FenwickTree;
pub use graph::{AdjacencyList, AdjacencyMatrix, WeightedGraph};
pub use list::LinkedList;
pub use lru::LruCache;
pub use ntree::NaryTree;
pub use page_table::ChainMap;
pub use prefix::Trie;
pub use ring::{CircularList, RingQueue};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::avl::AvlTree;
    pub use crate::btree::{BinaryTree, Side};
    pub use crate::buffer::GrowBuf;
    pub use crate::error::{Error, Result};
    pub use crate::fenwick::FenwickTree;
    pub use crate::graph::{AdjacencyList, AdjacencyMatrix, VertexId, WeightedGraph};
    pub use crate::list::{LinkedList, NodeHandle};
    pub use crate::lru::LruCache;
    pub use crate::ntree::NaryTree;
    pub use crate::page_table::ChainMap;
    pub use crate::prefix::Trie;
    pub use crate::ring::{CircularList, RingQueue};

    pub use smallvec::SmallVec;
}
