use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::{Edge, WeightedGraph};

/// A minimum spanning tree (Prim) or forest (Kruskal)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanningTree {
    /// Accepted edges, in acceptance order
    pub edges: Vec<Edge>,
    pub total_weight: f64,
    /// Every node the tree spans, isolated ones included
    pub nodes: BTreeSet<String>,
}

impl SpanningTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Undirected graph over the tree's nodes and edges only
    pub fn to_graph(&self) -> WeightedGraph {
        let mut graph = WeightedGraph::undirected();
        for node in &self.nodes {
            graph.add_node(node);
        }
        for edge in &self.edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight);
        }
        graph
    }

    pub(crate) fn push(&mut self, edge: Edge) {
        self.total_weight += edge.weight;
        self.nodes.insert(edge.from.clone());
        self.nodes.insert(edge.to.clone());
        self.edges.push(edge);
    }
}
