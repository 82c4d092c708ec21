use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use crate::graph::WeightedGraph;

/// Wrapper for BinaryHeap to use as min-heap (ordered by distance)
#[derive(Debug, Clone)]
pub struct HeapEntry {
    pub node_id: String,
    pub distance: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

/// Distances and predecessors from one Dijkstra run
///
/// Every graph node has a distance entry; unreachable nodes stay at
/// `f64::INFINITY`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortestPaths {
    pub distances: BTreeMap<String, f64>,
    pub predecessors: BTreeMap<String, String>,
}

impl ShortestPaths {
    /// Distance to `node`; infinite if unreachable or unknown
    pub fn distance(&self, node: &str) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Reachable nodes (finite distance), sources included
    pub fn reachable(&self) -> impl Iterator<Item = (&str, f64)> {
        self.distances
            .iter()
            .filter(|(_, d)| d.is_finite())
            .map(|(id, d)| (id.as_str(), *d))
    }

    /// Node sequence from the nearest source to `target`
    ///
    /// `None` when `target` is unreachable.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        if !self.distance(target).is_finite() {
            return None;
        }

        let mut path = vec![target.to_string()];
        let mut current = target;
        while let Some(pred) = self.predecessors.get(current) {
            path.push(pred.clone());
            current = pred;
        }
        path.reverse();
        Some(path)
    }
}

/// Single-source Dijkstra
///
/// A source missing from the graph leaves every distance infinite.
pub fn dijkstra(graph: &WeightedGraph, source: &str) -> ShortestPaths {
    multi_source_dijkstra(graph, [source])
}

/// Dijkstra seeded with every source at distance zero
///
/// Each node ends at its distance to the nearest source. Sources missing from
/// the graph are ignored.
#[tracing::instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn multi_source_dijkstra<'s>(
    graph: &WeightedGraph,
    sources: impl IntoIterator<Item = &'s str>,
) -> ShortestPaths {
    let mut distances: BTreeMap<String, f64> = graph
        .nodes()
        .map(|id| (id.to_string(), f64::INFINITY))
        .collect();
    let mut predecessors = BTreeMap::new();
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();

    for source in sources {
        if let Some(d) = distances.get_mut(source) {
            *d = 0.0;
            heap.push(Reverse(HeapEntry {
                node_id: source.to_string(),
                distance: 0.0,
            }));
        }
    }

    while let Some(Reverse(HeapEntry { node_id, distance })) = heap.pop() {
        // Stale entry: a shorter distance was already settled
        if distance > distances.get(&node_id).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for (neighbor, weight) in graph.neighbors(&node_id) {
            let candidate = distance + weight;
            let Some(best) = distances.get_mut(neighbor) else {
                continue;
            };
            if candidate < *best {
                *best = candidate;
                predecessors.insert(neighbor.to_string(), node_id.clone());
                heap.push(Reverse(HeapEntry {
                    node_id: neighbor.to_string(),
                    distance: candidate,
                }));
            }
        }
    }

    ShortestPaths {
        distances,
        predecessors,
    }
}
