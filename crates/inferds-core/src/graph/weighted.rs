//! Weighted graph with Dijkstra shortest paths.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::VertexId;

/// Edge weight. Unsigned by construction, which is exactly the
/// non-negativity Dijkstra requires.
pub type Weight = u64;

/// A weighted graph stored as adjacency lists of `(neighbor, weight)`.
pub struct WeightedGraph {
    adjacency: HashMap<VertexId, Vec<(VertexId, Weight)>>,
    directed: bool,
}

impl WeightedGraph {
    /// Create an empty directed weighted graph.
    pub fn directed() -> Self {
        Self {
            adjacency: HashMap::new(),
            directed: true,
        }
    }

    /// Create an empty undirected weighted graph.
    pub fn undirected() -> Self {
        Self {
            adjacency: HashMap::new(),
            directed: false,
        }
    }

    /// Add a vertex with no edges.
    pub fn add_vertex(&mut self, v: VertexId) {
        self.adjacency.entry(v).or_default();
    }

    /// Add an edge, creating missing endpoints. An existing edge has its
    /// weight replaced.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) {
        let neighbors = self.adjacency.entry(u).or_default();
        match neighbors.iter_mut().find(|(n, _)| *n == v) {
            Some(entry) => entry.1 = weight,
            None => neighbors.push((v, weight)),
        }
        self.adjacency.entry(v).or_default();
        if !self.directed && u != v {
            let neighbors = self.adjacency.entry(v).or_default();
            match neighbors.iter_mut().find(|(n, _)| *n == u) {
                Some(entry) => entry.1 = weight,
                None => neighbors.push((u, weight)),
            }
        }
    }

    /// Weight of the edge `(u, v)`, if it exists.
    pub fn weight(&self, u: VertexId, v: VertexId) -> Option<Weight> {
        self.adjacency
            .get(&u)?
            .iter()
            .find(|(n, _)| *n == v)
            .map(|(_, w)| *w)
    }

    /// Weighted neighbors of a vertex.
    pub fn neighbors(&self, v: VertexId) -> Option<&[(VertexId, Weight)]> {
        self.adjacency.get(&v).map(Vec::as_slice)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Single-source shortest path distances from `start`, binary-heap
    /// Dijkstra. O((V + E) log V).
    ///
    /// Unreachable vertices are absent from the result.
    pub fn dijkstra(&self, start: VertexId) -> HashMap<VertexId, Weight> {
        let mut dist: HashMap<VertexId, Weight> = HashMap::new();
        if !self.adjacency.contains_key(&start) {
            return dist;
        }

        let mut heap = BinaryHeap::new();
        dist.insert(start, 0);
        heap.push(Reverse((0, start)));

        while let Some(Reverse((d, v))) = heap.pop() {
            // Lazy deletion: skip entries superseded by a shorter path.
            if dist.get(&v).is_some_and(|&best| d > best) {
                continue;
            }
            for &(n, w) in &self.adjacency[&v] {
                let candidate = d + w;
                if dist.get(&n).map_or(true, |&best| candidate < best) {
                    dist.insert(n, candidate);
                    heap.push(Reverse((candidate, n)));
                }
            }
        }

        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeightedGraph {
        //     1 --2-- 2
        //    /         \
        //   0 ----9---- 3
        //    \         /
        //     4 --3-- 3 (via 4: 0-4 is 1, 4-3 is 3)
        let mut g = WeightedGraph::undirected();
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, 2);
        g.add_edge(2, 3, 1);
        g.add_edge(0, 3, 9);
        g.add_edge(0, 4, 1);
        g.add_edge(4, 3, 3);
        g
    }

    #[test]
    fn test_weight_lookup() {
        let g = sample();
        assert_eq!(g.weight(0, 1), Some(1));
        assert_eq!(g.weight(1, 0), Some(1));
        assert_eq!(g.weight(1, 3), None);
    }

    #[test]
    fn test_add_edge_replaces_weight() {
        let mut g = WeightedGraph::directed();
        g.add_edge(0, 1, 5);
        g.add_edge(0, 1, 2);
        assert_eq!(g.weight(0, 1), Some(2));
        assert_eq!(g.weight(1, 0), None);
    }

    #[test]
    fn test_dijkstra_picks_shortest_route() {
        let g = sample();
        let dist = g.dijkstra(0);
        assert_eq!(dist[&0], 0);
        assert_eq!(dist[&1], 1);
        assert_eq!(dist[&2], 3);
        // Direct edge costs 9; 0-4-3 costs 4.
        assert_eq!(dist[&3], 4);
        assert_eq!(dist[&4], 1);
    }

    #[test]
    fn test_dijkstra_unreachable_absent() {
        let mut g = WeightedGraph::directed();
        g.add_edge(0, 1, 1);
        g.add_vertex(9);
        let dist = g.dijkstra(0);
        assert!(!dist.contains_key(&9));
        assert!(g.dijkstra(42).is_empty());
    }

    #[test]
    fn test_dijkstra_directed_asymmetry() {
        let mut g = WeightedGraph::directed();
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, 1);
        assert_eq!(g.dijkstra(0).get(&2), Some(&2));
        assert!(g.dijkstra(2).get(&0).is_none());
    }
}
