//! Undirected connectivity graph over track indices
//!
//! Small helper used by the clusterer to find groups of tracks linked
//! through shared detections. Vertices are track row indices; an edge means
//! two tracks gate at least one common detection.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Undirected graph with adjacency sets keyed by vertex index
#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl UndirectedGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with no edges (no-op if already present)
    pub fn add_vertex(&mut self, vertex: usize) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Add an undirected edge, inserting both endpoints as needed
    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Add every list member as a vertex plus an edge between each
    /// consecutive pair: `[a, b, c, d]` becomes `a-b`, `b-c`, `c-d`.
    ///
    /// The chain transitively links the whole list, so connected components
    /// come out identical to adding the full clique over the list.
    pub fn add_chain(&mut self, vertices: &[usize]) {
        for &vertex in vertices {
            self.add_vertex(vertex);
        }
        for pair in vertices.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    /// Whether the vertex has been added to the graph
    pub fn contains(&self, vertex: usize) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Number of vertices
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Connected components via breadth-first search.
    ///
    /// Components are ordered by their smallest member vertex, so the output
    /// is deterministic for a given edge set.
    pub fn connected_components(&self) -> Vec<BTreeSet<usize>> {
        let mut seen = BTreeSet::new();
        let mut components = Vec::new();

        for &start in self.adjacency.keys() {
            if seen.contains(&start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            seen.insert(start);
            while let Some(vertex) = queue.pop_front() {
                component.insert(vertex);
                if let Some(neighbours) = self.adjacency.get(&vertex) {
                    for &next in neighbours {
                        if seen.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
            components.push(component);
        }

        components
    }
}
