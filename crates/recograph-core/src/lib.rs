//! Recograph Core Library
//!
//! Weighted-graph construction and classic graph algorithms behind friend,
//! song and movie recommendations, trending analytics, marathon planning and
//! playlist generation.
//! Every call rebuilds its working graph from the store; nothing is cached.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod marathon;
pub mod playlist;
pub mod rank;
pub mod recommend;
pub mod store;
pub mod trending;

#[cfg(test)]
pub(crate) mod testing;
