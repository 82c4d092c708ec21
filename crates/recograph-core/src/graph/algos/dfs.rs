use std::collections::HashSet;

use crate::graph::WeightedGraph;

/// Depth-first preorder from `start`, appended to `out`
///
/// `visited` and `out` are caller-owned so several starts can share one
/// traversal. Uses an explicit stack; neighbours are pushed in reverse so the
/// order matches the recursive preorder. Nothing is appended when `start` is
/// absent or already visited.
pub fn dfs(start: &str, graph: &WeightedGraph, visited: &mut HashSet<String>, out: &mut Vec<String>) {
    if !graph.contains(start) {
        return;
    }

    let mut stack: Vec<&str> = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.to_string()) {
            continue;
        }
        out.push(current.to_string());

        let pending: Vec<&str> = graph
            .neighbors(current)
            .map(|(neighbor, _)| neighbor)
            .filter(|neighbor| !visited.contains(*neighbor))
            .collect();
        stack.extend(pending.into_iter().rev());
    }
}

/// Preorder from `start` with fresh accumulators
pub fn dfs_order(graph: &WeightedGraph, start: &str) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    dfs(start, graph, &mut visited, &mut out);
    out
}
