use std::collections::BTreeMap;

use super::{SpanningTree, UnionFind};
use crate::graph::{Edge, WeightedGraph};

/// Kruskal's minimum spanning forest
///
/// The graph is read as undirected: `(a, b)` and `(b, a)` collapse to one
/// edge keeping the smaller weight. A disconnected graph yields a forest
/// spanning every node.
pub fn kruskal(graph: &WeightedGraph) -> SpanningTree {
    let mut unique: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for (from, to, weight) in graph.arcs() {
        if from == to {
            continue;
        }
        let key = if from <= to { (from, to) } else { (to, from) };
        unique
            .entry(key)
            .and_modify(|w| *w = w.min(weight))
            .or_insert(weight);
    }

    let mut edges: Vec<((&str, &str), f64)> = unique.into_iter().collect();
    edges.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut sets = UnionFind::with_ids(graph.nodes());
    let mut tree = SpanningTree {
        nodes: graph.nodes().map(str::to_string).collect(),
        ..Default::default()
    };

    for ((a, b), weight) in edges {
        if sets.union(a, b) {
            tree.push(Edge::new(a, b, weight));
        }
    }

    tracing::debug!(
        nodes = tree.nodes.len(),
        edges = tree.edges.len(),
        components = sets.components(),
        "kruskal forest"
    );

    tree
}
