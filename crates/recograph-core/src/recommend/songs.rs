use std::collections::BTreeSet;

use super::{rank_paths, require_k, require_user, Recommendation};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::graph::{multi_source_dijkstra, prim, GraphBuilder, GraphRequest, GraphType};
use crate::store::{queries, GraphStore, Value};

/// Graph that shortest paths run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backbone {
    /// The full song-hybrid graph
    #[default]
    Full,
    /// Prim's tree grown from the first seed present in the graph
    Prim,
}

impl Backbone {
    pub fn parse(s: &str) -> Option<Backbone> {
        match s.trim().to_lowercase().as_str() {
            "full" => Some(Backbone::Full),
            "prim" | "mst" => Some(Backbone::Prim),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backbone::Full => "full",
            Backbone::Prim => "prim",
        }
    }
}

/// Song-hybrid parameters; unset values come from the engine config
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SongOptions {
    pub window: Option<i64>,
    pub lambda: Option<f64>,
    pub backbone: Backbone,
}

/// Song suggestions seeded from a user's listening history
pub struct SongRecommender<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
}

impl<'a> SongRecommender<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Songs closest to the user's most played songs
    ///
    /// Seeds are the user's top `max_seeds` songs by play count. Every song
    /// the user has listened to is excluded unless that empties the result.
    #[tracing::instrument(skip(self, options), fields(backbone = options.backbone.as_str()))]
    pub fn for_user(&self, user: &str, k: usize, options: SongOptions) -> Result<Vec<Recommendation>> {
        let user = require_user(user)?;
        require_k(k)?;

        let rows = self
            .store
            .query(queries::USER_LISTENED_SONGS, &[(":user", Value::text(user))])?;
        let mut listened = Vec::with_capacity(rows.len());
        for row in &rows {
            listened.push(row.text("song")?);
        }
        if listened.is_empty() {
            tracing::debug!(user, "no listening history");
            return Ok(Vec::new());
        }

        let seeds: Vec<String> = listened
            .iter()
            .take(self.config.recommend.max_seeds.max(1))
            .cloned()
            .collect();
        let exclude: BTreeSet<String> = listened.into_iter().collect();

        let mut request = GraphRequest::new(GraphType::SongHybrid).undirected(true);
        request.window = options.window;
        request.lambda = options.lambda;
        let graph = GraphBuilder::new(self.store, &self.config.recommend).build(&request)?;

        let sources = seeds.iter().map(String::as_str);
        let paths = match options.backbone {
            Backbone::Full => multi_source_dijkstra(&graph, sources),
            Backbone::Prim => {
                let Some(root) = seeds.iter().find(|s| graph.contains(s)) else {
                    return Ok(Vec::new());
                };
                let tree = prim(&graph, root).to_graph();
                multi_source_dijkstra(&tree, sources)
            }
        };

        let seeds: BTreeSet<String> = seeds.into_iter().collect();
        Ok(rank_paths(&paths, &seeds, &exclude, k))
    }
}
