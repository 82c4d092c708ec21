use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::SpanningTree;
use crate::graph::{Edge, WeightedGraph};

/// Edge crossing the visited/unvisited cut
#[derive(Debug)]
struct Candidate<'g> {
    weight: f64,
    from: &'g str,
    to: &'g str,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.to.cmp(other.to))
            .then_with(|| self.from.cmp(other.from))
    }
}

/// Prim's minimum spanning tree of `start`'s component
///
/// Returns an empty tree when `start` is absent.
pub fn prim(graph: &WeightedGraph, start: &str) -> SpanningTree {
    let mut tree = SpanningTree::default();
    let Some(start) = graph.nodes().find(|n| *n == start) else {
        return tree;
    };

    let mut heap: BinaryHeap<Reverse<Candidate<'_>>> = BinaryHeap::new();
    tree.nodes.insert(start.to_string());
    push_cut(graph, start, &tree, &mut heap);

    while let Some(Reverse(candidate)) = heap.pop() {
        // Both ends already in the tree
        if tree.nodes.contains(candidate.to) {
            continue;
        }
        tree.push(Edge::new(candidate.from, candidate.to, candidate.weight));
        push_cut(graph, candidate.to, &tree, &mut heap);
    }

    tree
}

fn push_cut<'g>(
    graph: &'g WeightedGraph,
    from: &'g str,
    tree: &SpanningTree,
    heap: &mut BinaryHeap<Reverse<Candidate<'g>>>,
) {
    for (to, weight) in graph.neighbors(from) {
        if !tree.nodes.contains(to) {
            heap.push(Reverse(Candidate { weight, from, to }));
        }
    }
}
