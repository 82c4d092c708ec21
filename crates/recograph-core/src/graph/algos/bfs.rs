use std::collections::{HashSet, VecDeque};

use crate::graph::WeightedGraph;

/// Breadth-first order of every node reachable from `start`
///
/// Nodes appear once each, in non-decreasing hop distance. Returns an empty
/// order when `start` is not in the graph.
pub fn bfs(graph: &WeightedGraph, start: &str) -> Vec<String> {
    if !graph.contains(start) {
        return Vec::new();
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut order = Vec::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current.to_string());
        for (neighbor, _) in graph.neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    order
}
