//! Adjacency-matrix graph.

use super::VertexId;
use crate::error::{Error, Result};

/// A graph over a fixed vertex set `0..n`, stored as a flat boolean
/// matrix. O(V²) space buys O(1) edge operations, the dense-graph trade.
pub struct AdjacencyMatrix {
    n: usize,
    directed: bool,
    cells: Vec<bool>,
    edge_count: usize,
}

impl AdjacencyMatrix {
    /// Create a directed graph with `n` vertices and no edges.
    pub fn directed(n: usize) -> Self {
        Self {
            n,
            directed: true,
            cells: vec![false; n * n],
            edge_count: 0,
        }
    }

    /// Create an undirected graph with `n` vertices and no edges.
    pub fn undirected(n: usize) -> Self {
        Self {
            n,
            directed: false,
            cells: vec![false; n * n],
            edge_count: 0,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of edges (undirected edges counted once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add an edge. O(1). Returns `false` if it already exists.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        let (iu, iv) = self.cell_indices(u, v)?;
        if self.cells[iu] {
            return Ok(false);
        }
        self.cells[iu] = true;
        if !self.directed {
            self.cells[iv] = true;
        }
        self.edge_count += 1;
        Ok(true)
    }

    /// Remove an edge. O(1). Returns `false` if it was not present.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        let (iu, iv) = self.cell_indices(u, v)?;
        if !self.cells[iu] {
            return Ok(false);
        }
        self.cells[iu] = false;
        if !self.directed {
            self.cells[iv] = false;
        }
        self.edge_count -= 1;
        Ok(true)
    }

    /// Whether the edge exists. O(1).
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> Result<bool> {
        let (iu, _) = self.cell_indices(u, v)?;
        Ok(self.cells[iu])
    }

    /// Neighbors of a vertex, ascending. O(V).
    pub fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>> {
        let v = v as usize;
        if v >= self.n {
            return Err(Error::index_out_of_bounds(v, self.n));
        }
        Ok((0..self.n)
            .filter(|&u| self.cells[v * self.n + u])
            .map(|u| u as VertexId)
            .collect())
    }

    fn cell_indices(&self, u: VertexId, v: VertexId) -> Result<(usize, usize)> {
        let (u, v) = (u as usize, v as usize);
        if u >= self.n {
            return Err(Error::index_out_of_bounds(u, self.n));
        }
        if v >= self.n {
            return Err(Error::index_out_of_bounds(v, self.n));
        }
        Ok((u * self.n + v, v * self.n + u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_edges() {
        let mut g = AdjacencyMatrix::directed(4);
        assert!(g.add_edge(0, 2).unwrap());
        assert!(!g.add_edge(0, 2).unwrap());
        assert!(g.has_edge(0, 2).unwrap());
        assert!(!g.has_edge(2, 0).unwrap());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_undirected_edges() {
        let mut g = AdjacencyMatrix::undirected(3);
        g.add_edge(0, 1).unwrap();
        assert!(g.has_edge(1, 0).unwrap());
        assert_eq!(g.edge_count(), 1);
        assert!(g.remove_edge(1, 0).unwrap());
        assert!(!g.has_edge(0, 1).unwrap());
    }

    #[test]
    fn test_neighbors_sorted() {
        let mut g = AdjacencyMatrix::directed(5);
        g.add_edge(2, 4).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(2, 3).unwrap();
        assert_eq!(g.neighbors(2).unwrap(), vec![0, 3, 4]);
        assert_eq!(g.neighbors(0).unwrap(), Vec::<VertexId>::new());
    }

    #[test]
    fn test_bounds_checked() {
        let mut g = AdjacencyMatrix::directed(2);
        assert!(g.add_edge(0, 2).is_err());
        assert!(g.has_edge(5, 0).is_err());
        assert!(g.neighbors(2).is_err());
    }

    #[test]
    fn test_self_loop() {
        let mut g = AdjacencyMatrix::undirected(2);
        assert!(g.add_edge(1, 1).unwrap());
        assert!(g.has_edge(1, 1).unwrap());
        assert_eq!(g.neighbors(1).unwrap(), vec![1]);
    }
}
