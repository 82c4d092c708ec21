use std::collections::{BTreeMap, BTreeSet};

use super::{compose, rank_paths, require_k, require_user, Recommendation};
use crate::config::EngineConfig;
use crate::error::{RecoError, Result};
use crate::graph::{
    bfs, dfs_order, kruskal, multi_source_dijkstra, GraphBuilder, GraphRequest, GraphType,
    WeightedGraph,
};
use crate::rank::sort_descending_by_value;
use crate::store::{queries, GraphStore, Value};

/// Traversal used by positional scoring
#[derive(Debug, Clone, Copy)]
enum Traversal {
    Bfs,
    Dfs,
}

/// Movie suggestions seeded from a user's watch history
pub struct MovieRecommender<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
    platforms: Vec<String>,
    subscribed_only: bool,
}

/// Seeds and exclusions resolved for one user
struct WatchHistory {
    seeds: BTreeSet<String>,
    watched: BTreeSet<String>,
}

impl<'a> MovieRecommender<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self {
            store,
            config,
            platforms: Vec::new(),
            subscribed_only: false,
        }
    }

    /// Only follow similarity edges into movies on these services
    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }

    /// Only follow similarity edges into movies on the user's subscriptions
    pub fn subscribed_only(mut self, subscribed_only: bool) -> Self {
        self.subscribed_only = subscribed_only;
        self
    }

    /// Movies nearest to any watched movie
    #[tracing::instrument(skip(self))]
    pub fn nearest(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;
        let Some(history) = self.history(user)? else {
            return Ok(Vec::new());
        };

        let graph = self.similarity_graph(user)?;
        let paths = multi_source_dijkstra(&graph, history.seeds.iter().map(String::as_str));
        Ok(rank_paths(&paths, &history.seeds, &history.watched, k))
    }

    /// Movies scored by breadth-first position from each watched movie
    #[tracing::instrument(skip(self))]
    pub fn by_bfs(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        self.by_traversal(user, k, Traversal::Bfs)
    }

    /// Movies scored by depth-first position from each watched movie
    #[tracing::instrument(skip(self))]
    pub fn by_dfs(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        self.by_traversal(user, k, Traversal::Dfs)
    }

    fn by_traversal(&self, user: &str, k: usize, traversal: Traversal) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;
        let Some(history) = self.history(user)? else {
            return Ok(Vec::new());
        };

        let graph = self.similarity_graph(user)?;
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for seed in &history.seeds {
            let order = match traversal {
                Traversal::Bfs => bfs(&graph, seed),
                Traversal::Dfs => dfs_order(&graph, seed),
            };
            let len = order.len();
            for (i, id) in order.into_iter().enumerate() {
                *totals.entry(id).or_default() += (len - i).max(1) as f64;
            }
        }

        Ok(compose(
            positional_distances(totals),
            &history.seeds,
            &history.watched,
            k,
        ))
    }

    /// Movies on the minimum spanning forest, by summed incident tree weight
    #[tracing::instrument(skip(self))]
    pub fn diverse(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;
        let Some(history) = self.history(user)? else {
            return Ok(Vec::new());
        };

        let graph = self.similarity_graph(user)?;
        let tree = kruskal(&graph);
        let mut incident: BTreeMap<String, f64> = BTreeMap::new();
        for edge in &tree.edges {
            *incident.entry(edge.from.clone()).or_default() += edge.weight;
            *incident.entry(edge.to.clone()).or_default() += edge.weight;
        }

        Ok(compose(incident, &history.seeds, &history.watched, k))
    }

    /// Movies in one genre near the user's watched movies
    ///
    /// Only the first `genre_bfs_depth` breadth-first positions from each
    /// seed count, weighted `depth - position`.
    #[tracing::instrument(skip(self))]
    pub fn by_genre(&self, user: &str, genre: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(RecoError::missing_parameter(GraphType::GenreFiltered, "genre"));
        }
        let Some(history) = self.history(user)? else {
            return Ok(Vec::new());
        };

        let request = GraphRequest::new(GraphType::GenreFiltered)
            .undirected(true)
            .with_genre(genre);
        let graph = self.build(&request)?;

        let depth = self.config.recommend.genre_bfs_depth;
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for seed in &history.seeds {
            for (i, id) in bfs(&graph, seed).into_iter().take(depth).enumerate() {
                *totals.entry(id).or_default() += (depth - i) as f64;
            }
        }

        Ok(compose(
            positional_distances(totals),
            &history.seeds,
            &history.watched,
            k,
        ))
    }

    /// Unwatched movies by `rating * 100 + watch_count`, highest first
    #[tracing::instrument(skip(self))]
    pub fn by_rating(&self, user: &str, k: usize) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;
        let watched = self.watched(user)?;

        let rows = self.store.query(queries::MOVIE_POPULARITY, &[])?;
        let mut scored = Vec::with_capacity(rows.len());
        for row in &rows {
            let id = row.text("movie")?;
            if watched.contains(&id) {
                continue;
            }
            let composite = row.real("rating")? * 100.0 + row.real("watch_count")?;
            scored.push((id, composite));
        }

        let mut ranked = sort_descending_by_value(scored);
        ranked.truncate(k);
        Ok(ranked.into_iter().map(Recommendation::from).collect())
    }

    fn watched(&self, user: &str) -> Result<Vec<String>> {
        let rows = self
            .store
            .query(queries::USER_WATCHED_MOVIES, &[(":user", Value::text(user))])?;
        rows.iter().map(|row| row.text("movie")).collect()
    }

    /// `None` when the user has watched nothing
    ///
    /// Seeds are the `max_seeds` most watched movies; every watched movie is
    /// excluded from the results.
    fn history(&self, user: &str) -> Result<Option<WatchHistory>> {
        let watched = self.watched(user)?;
        if watched.is_empty() {
            tracing::debug!(user, "no watch history");
            return Ok(None);
        }
        let seeds = watched
            .iter()
            .take(self.config.recommend.max_seeds.max(1))
            .cloned()
            .collect();
        Ok(Some(WatchHistory {
            seeds,
            watched: watched.into_iter().collect(),
        }))
    }

    fn similarity_graph(&self, user: &str) -> Result<WeightedGraph> {
        let mut request = GraphRequest::new(GraphType::MovieSimilarity)
            .undirected(true)
            .with_platforms(self.platforms.clone());
        if self.subscribed_only {
            request = request.with_only_user(user);
        }
        self.build(&request)
    }

    fn build(&self, request: &GraphRequest) -> Result<WeightedGraph> {
        GraphBuilder::new(self.store, &self.config.recommend).build(request)
    }
}

/// Positional totals (higher is better) as distances: `1 / (total + 1)`
fn positional_distances(totals: BTreeMap<String, f64>) -> impl Iterator<Item = (String, f64)> {
    totals
        .into_iter()
        .map(|(id, total)| (id, 1.0 / (total + 1.0)))
}
