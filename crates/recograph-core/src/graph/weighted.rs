use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directed, weighted edge. Weights are distances: smaller is closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Whether a weight may enter a graph: finite and strictly positive
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

/// Adjacency-map graph built fresh for a single request
///
/// Invariant: every node referenced by an edge has an adjacency entry
/// (possibly empty), so lookups during traversal never miss. Repeated edges
/// between the same endpoints collapse to the minimum weight; in undirected
/// mode each accepted edge is mirrored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
    undirected: bool,
}

impl WeightedGraph {
    pub fn new(undirected: bool) -> Self {
        Self {
            adjacency: BTreeMap::new(),
            undirected,
        }
    }

    pub fn directed() -> Self {
        Self::new(false)
    }

    pub fn undirected() -> Self {
        Self::new(true)
    }

    /// Build from an edge list; invalid weights are dropped
    pub fn from_edges(undirected: bool, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = Self::new(undirected);
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight);
        }
        graph
    }

    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Ensure a node exists, with no edges if it is new
    pub fn add_node(&mut self, id: &str) {
        if !self.adjacency.contains_key(id) {
            self.adjacency.insert(id.to_string(), BTreeMap::new());
        }
    }

    /// Add an edge, returning `false` if the weight was rejected
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> bool {
        if !is_valid_weight(weight) {
            return false;
        }

        self.insert_min(from, to, weight);
        if self.undirected {
            self.insert_min(to, from, weight);
        }
        true
    }

    fn insert_min(&mut self, from: &str, to: &str, weight: f64) {
        self.add_node(to);
        let neighbors = self.adjacency.entry(from.to_string()).or_default();
        neighbors
            .entry(to.to_string())
            .and_modify(|existing| {
                if weight < *existing {
                    *existing = weight;
                }
            })
            .or_insert(weight);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Outgoing neighbours of `id`; empty for unknown nodes
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(n, w)| (n.as_str(), *w)))
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from).and_then(|n| n.get(to)).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed adjacency entries (mirrored edges count twice)
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All directed adjacency entries as borrowed `(from, to, weight)`
    pub fn arcs(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.adjacency.iter().flat_map(|(from, neighbors)| {
            neighbors
                .iter()
                .map(move |(to, weight)| (from.as_str(), to.as_str(), *weight))
        })
    }

    /// All directed adjacency entries
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.arcs().map(|(from, to, weight)| Edge::new(from, to, weight))
    }
}
