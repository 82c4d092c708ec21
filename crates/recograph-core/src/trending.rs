//! Trending and influence analytics
//!
//! Popularity rankings are "higher is better" and use the bounded
//! [`top_k`] selector or the descending stable sort; nothing here is
//! distance-ranked.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{RecoError, Result};
use crate::graph::{bfs, GraphBuilder, GraphRequest, GraphType};
use crate::rank::{sort_descending_by_value, top_k};
use crate::recommend::{require_k, require_user};
use crate::store::{queries, GraphStore, Row, Value};

/// An item with a popularity value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub id: String,
    pub score: f64,
}

impl From<(String, f64)> for RankedItem {
    fn from((id, score): (String, f64)) -> Self {
        Self { id, score }
    }
}

/// A user's most watched movies and genres next to the global ones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteComparison {
    pub user_top: Vec<RankedItem>,
    pub user_genres: BTreeMap<String, usize>,
    pub global_top: Vec<RankedItem>,
    pub global_genres: BTreeMap<String, usize>,
    /// Genres present in both distributions
    pub shared_genres: Vec<String>,
}

const UNKNOWN_GENRE: &str = "Unknown";

pub struct TrendingService<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
}

impl<'a> TrendingService<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Most played songs, optionally only those on `platforms`
    #[tracing::instrument(skip(self))]
    pub fn top_songs(&self, k: usize, platforms: &[String]) -> Result<Vec<RankedItem>> {
        require_k(k)?;
        let rows = self
            .store
            .query(queries::SONG_PLAY_TOTALS, &[(":platforms", Value::list(platforms))])?;
        let totals = id_values(&rows, "plays")?;
        Ok(top_k(totals, k).into_iter().map(RankedItem::from).collect())
    }

    /// Most watched movies
    #[tracing::instrument(skip(self))]
    pub fn top_movies(&self, k: usize) -> Result<Vec<RankedItem>> {
        require_k(k)?;
        let rows = self.store.query(queries::MOVIE_WATCH_TOTALS, &[])?;
        let totals = id_values(&rows, "watches")?;
        Ok(top_k(totals, k).into_iter().map(RankedItem::from).collect())
    }

    /// Most watched movies within one genre
    #[tracing::instrument(skip(self))]
    pub fn movies_by_genre(&self, genre: &str, k: usize) -> Result<Vec<RankedItem>> {
        require_k(k)?;
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(RecoError::missing_identifier("genre"));
        }
        let rows = self
            .store
            .query(queries::GENRE_WATCH_TOTALS, &[(":genre", Value::text(genre))])?;

        let mut ranked = sort_descending_by_value(id_values(&rows, "watches")?);
        ranked.truncate(k);
        Ok(ranked.into_iter().map(RankedItem::from).collect())
    }

    /// Movies by how many titles are reachable along similarity edges,
    /// counting themselves
    #[tracing::instrument(skip(self))]
    pub fn influential_movies(&self, k: usize) -> Result<Vec<RankedItem>> {
        require_k(k)?;
        let graph = GraphBuilder::new(self.store, &self.config.recommend)
            .build(&GraphRequest::new(GraphType::MovieSimilarity))?;

        let reach: Vec<(String, f64)> = graph
            .nodes()
            .map(|id| (id.to_string(), bfs(&graph, id).len() as f64))
            .collect();

        let mut ranked = sort_descending_by_value(reach);
        ranked.truncate(k);
        Ok(ranked.into_iter().map(RankedItem::from).collect())
    }

    /// The user's top `k` watched movies and their genre spread against the
    /// global top `k`
    #[tracing::instrument(skip(self))]
    pub fn compare_taste(&self, user: &str, k: usize) -> Result<TasteComparison> {
        let user = require_user(user)?;
        require_k(k)?;

        let limit = i64::try_from(k).unwrap_or(i64::MAX);
        let user_rows = self.store.query(
            queries::USER_TOP_WATCHED,
            &[(":user", Value::text(user)), (":limit", Value::Integer(limit))],
        )?;
        let mut user_top = Vec::with_capacity(user_rows.len());
        let mut user_genres = BTreeMap::new();
        for row in &user_rows {
            user_top.push(RankedItem::from((row.text("id")?, row.real("watches")?)));
            *user_genres.entry(genre_of(row)?).or_insert(0) += 1;
        }

        let global_rows = self.store.query(queries::MOVIE_WATCH_TOTALS, &[])?;
        let mut genres: HashMap<String, String> = HashMap::new();
        for row in &global_rows {
            genres.insert(row.text("id")?, genre_of(row)?);
        }
        let global_top: Vec<RankedItem> = top_k(id_values(&global_rows, "watches")?, k)
            .into_iter()
            .map(RankedItem::from)
            .collect();
        let mut global_genres = BTreeMap::new();
        for item in &global_top {
            let genre = genres
                .get(&item.id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string());
            *global_genres.entry(genre).or_insert(0) += 1;
        }

        let shared_genres = user_genres
            .keys()
            .filter(|g| global_genres.contains_key(*g))
            .cloned()
            .collect();

        Ok(TasteComparison {
            user_top,
            user_genres,
            global_top,
            global_genres,
            shared_genres,
        })
    }
}

fn id_values(rows: &[Row], column: &str) -> Result<Vec<(String, f64)>> {
    rows.iter()
        .map(|row| Ok((row.text("id")?, row.real(column)?)))
        .collect()
}

fn genre_of(row: &Row) -> Result<String> {
    Ok(row
        .opt_text("genre")?
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string()))
}
