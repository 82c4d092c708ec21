//! Weighted graph construction and algorithms
//!
//! - `weighted`: the per-request adjacency structure
//! - `request`: graph type selectors and build parameters
//! - `builder`: store reads converted into weighted graphs
//! - `algos`: traversal, shortest paths, spanning trees

pub mod algos;
pub mod builder;
pub mod request;
pub mod weighted;

pub use algos::{
    bfs, dfs, dfs_order, dijkstra, kruskal, multi_source_dijkstra, prim, ShortestPaths,
    SpanningTree, UnionFind,
};
pub use builder::{hybrid_distance, overlap_distance, raw_graph, GraphBuilder};
pub use request::{GraphRequest, GraphType};
pub use weighted::{is_valid_weight, Edge, WeightedGraph};
