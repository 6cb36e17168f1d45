//! Adjacency-list graph.

use std::collections::{HashMap, HashSet, VecDeque};

use super::VertexId;

/// A graph stored as per-vertex neighbor lists. O(V + E) space.
///
/// In undirected mode every edge is mirrored, so `(u, v)` and `(v, u)` are
/// the same edge.
pub struct AdjacencyList {
    adjacency: HashMap<VertexId, Vec<VertexId>>,
    directed: bool,
    edge_count: usize,
}

impl AdjacencyList {
    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self {
            adjacency: HashMap::new(),
            directed: true,
            edge_count: 0,
        }
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self {
            adjacency: HashMap::new(),
            directed: false,
            edge_count: 0,
        }
    }

    /// Whether edges have direction.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a vertex with no edges. Returns `false` if it already exists.
    pub fn add_vertex(&mut self, v: VertexId) -> bool {
        match self.adjacency.entry(v) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(Vec::new());
                true
            }
        }
    }

    /// Add an edge, creating missing endpoints. Returns `false` if the edge
    /// already exists. O(degree).
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if self.has_edge(u, v) {
            return false;
        }
        self.adjacency.entry(u).or_default().push(v);
        self.adjacency.entry(v).or_default();
        if !self.directed && u != v {
            self.adjacency.entry(v).or_default().push(u);
        }
        self.edge_count += 1;
        true
    }

    /// Remove an edge. Returns `false` if it was not present.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let removed = match self.adjacency.get_mut(&u) {
            Some(neighbors) => match neighbors.iter().position(|&n| n == v) {
                Some(pos) => {
                    neighbors.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };
        if !removed {
            return false;
        }
        if !self.directed && u != v {
            if let Some(neighbors) = self.adjacency.get_mut(&v) {
                if let Some(pos) = neighbors.iter().position(|&n| n == u) {
                    neighbors.remove(pos);
                }
            }
        }
        self.edge_count -= 1;
        true
    }

    /// Whether the edge exists. O(degree).
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency
            .get(&u)
            .is_some_and(|neighbors| neighbors.contains(&v))
    }

    /// Neighbors of a vertex in insertion order.
    pub fn neighbors(&self, v: VertexId) -> Option<&[VertexId]> {
        self.adjacency.get(&v).map(Vec::as_slice)
    }

    /// Degree of a vertex: outgoing edges when directed, incident edges
    /// when undirected (self-loops count once).
    pub fn degree(&self, v: VertexId) -> Option<usize> {
        self.adjacency.get(&v).map(Vec::len)
    }

    /// All vertices, sorted.
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = self.adjacency.keys().copied().collect();
        out.sort_unstable();
        out
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges (undirected edges counted once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Breadth-first traversal order from `start`. Only vertices reachable
    /// from `start` appear.
    pub fn bfs(&self, start: VertexId) -> Vec<VertexId> {
        let mut order = Vec::new();
        if !self.adjacency.contains_key(&start) {
            return order;
        }
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &n in &self.adjacency[&v] {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        order
    }

    /// Depth-first traversal order from `start`, visiting neighbors in
    /// insertion order.
    pub fn dfs(&self, start: VertexId) -> Vec<VertexId> {
        let mut order = Vec::new();
        if !self.adjacency.contains_key(&start) {
            return order;
        }
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            order.push(v);
            // Reverse push so the first-listed neighbor is visited first.
            for &n in self.adjacency[&v].iter().rev() {
                if !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> AdjacencyList {
        // 0 -> 1 -> 3, 0 -> 2 -> 3
        let mut g = AdjacencyList::directed();
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(1, 3);
        g.add_edge(2, 3);
        g
    }

    #[test]
    fn test_add_and_query_edges() {
        let g = diamond();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.neighbors(0), Some(&[1, 2][..]));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut g = diamond();
        assert!(!g.add_edge(0, 1));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = diamond();
        assert!(g.remove_edge(0, 1));
        assert!(!g.remove_edge(0, 1));
        assert!(!g.has_edge(0, 1));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_undirected_mirrors_edges() {
        let mut g = AdjacencyList::undirected();
        g.add_edge(1, 2);
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(2, 1));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(1), Some(1));

        g.remove_edge(2, 1);
        assert!(!g.has_edge(1, 2));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_bfs_order() {
        let g = diamond();
        assert_eq!(g.bfs(0), vec![0, 1, 2, 3]);
        assert_eq!(g.bfs(1), vec![1, 3]);
        assert_eq!(g.bfs(99), Vec::<VertexId>::new());
    }

    #[test]
    fn test_dfs_order() {
        let g = diamond();
        // Follows 0 -> 1 -> 3 before backtracking to 2.
        assert_eq!(g.dfs(0), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_isolated_vertex() {
        let mut g = AdjacencyList::undirected();
        assert!(g.add_vertex(7));
        assert!(!g.add_vertex(7));
        assert_eq!(g.degree(7), Some(0));
        assert_eq!(g.bfs(7), vec![7]);
    }

    #[test]
    fn test_disconnected_components() {
        let mut g = AdjacencyList::undirected();
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        assert_eq!(g.bfs(0), vec![0, 1]);
        assert!(!g.bfs(0).contains(&2));
    }
}
