//! Graph representations.
//!
//! The three classic layouts, consolidated: an adjacency list (sparse
//! graphs, directed or undirected, with BFS/DFS), an adjacency matrix
//! (dense graphs, O(1) edge tests), and a weighted adjacency list with
//! Dijkstra shortest paths.

mod list;
mod matrix;
mod weighted;

pub use list::AdjacencyList;
pub use matrix::AdjacencyMatrix;
pub use weighted::{Weight, WeightedGraph};

/// Vertex identifier used across all graph types.
pub type VertexId = u32;
