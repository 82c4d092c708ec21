use std::collections::BTreeSet;

use super::{rank_paths, require_k, require_user, Recommendation};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::graph::{dijkstra, overlap_distance, GraphBuilder, GraphRequest, GraphType, WeightedGraph};
use crate::rank::sort_ascending_by_value;
use crate::store::{queries, GraphStore, Value};

/// Friend suggestions over the liked-song overlap graph
pub struct FriendRecommender<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
}

impl<'a> FriendRecommender<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Users sharing liked songs with `user`, closest first
    #[tracing::instrument(skip(self))]
    pub fn direct(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;

        let rows = self
            .store
            .query(queries::USER_OVERLAP_NEIGHBORS, &[(":user", Value::text(user))])?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in &rows {
            let neighbor = row.text("neighbor")?;
            scored.push((neighbor, overlap_distance(row.real("overlap")?)));
        }

        let mut ranked = sort_ascending_by_value(scored);
        ranked.truncate(k);
        Ok(ranked.into_iter().map(Recommendation::from).collect())
    }

    /// Users ranked by shortest-path distance through the overlap graph
    #[tracing::instrument(skip(self))]
    pub fn by_shortest_path(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;

        let graph = GraphBuilder::new(self.store, &self.config.recommend)
            .build(&GraphRequest::new(GraphType::SocialOverlap))?;

        let Some(source) = resolve_node(&graph, user) else {
            tracing::debug!(user, "user not in overlap graph");
            return Ok(Vec::new());
        };

        let paths = dijkstra(&graph, &source);
        let seeds = BTreeSet::from([source]);
        Ok(rank_paths(&paths, &seeds, &BTreeSet::new(), k))
    }

    /// The single closest user, if any
    pub fn closest(&self, user: &str) -> Result<Option<Recommendation>> {
        Ok(self.by_shortest_path(user, 1)?.into_iter().next())
    }
}

/// Exact node id first, then a case-insensitive match
fn resolve_node(graph: &WeightedGraph, id: &str) -> Option<String> {
    if graph.contains(id) {
        return Some(id.to_string());
    }
    let lowered = id.to_lowercase();
    graph
        .nodes()
        .find(|node| node.to_lowercase() == lowered)
        .map(str::to_string)
}
