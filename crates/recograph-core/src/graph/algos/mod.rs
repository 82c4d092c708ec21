//! Graph algorithm implementations
//!
//! Contains the primitives every recommendation and analytics call composes:
//! - `bfs` / `dfs`: reachability orders
//! - `dijkstra`: single- and multi-source shortest paths
//! - `prim` / `kruskal`: minimum spanning trees and forests
//! - `union_find`: disjoint sets backing Kruskal
//!
//! None of these return errors: a start node missing from the graph yields an
//! empty order, all-infinite distances, or an empty tree.

pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod kruskal;
pub mod prim;
pub mod spanning;
pub mod union_find;

pub use bfs::bfs;
pub use dfs::{dfs, dfs_order};
pub use dijkstra::{dijkstra, multi_source_dijkstra, ShortestPaths};
pub use kruskal::kruskal;
pub use prim::prim;
pub use spanning::SpanningTree;
pub use union_find::UnionFind;
