//! Request-to-graph construction
//!
//! Each graph type maps to exactly one store read. Raw scores are converted
//! to distance-like weights here, and rows that do not produce a positive
//! finite weight are dropped before reaching the adjacency structure.

use std::time::Instant;

use super::request::{GraphRequest, GraphType};
use super::weighted::WeightedGraph;
use crate::config::RecommendConfig;
use crate::error::{RecoError, Result};
use crate::store::{queries, GraphStore, Row, Value};
use crate::trace_time;

/// Overlap or similarity score to distance: `1 / (score + 1)`
pub fn overlap_distance(score: f64) -> f64 {
    1.0 / (score + 1.0)
}

/// Song-hybrid distance: `1/(overlap+1) + lambda * (year_gap / window)`
///
/// The attribute term is zero when the year gap is unknown or the window
/// is zero.
pub fn hybrid_distance(overlap: f64, year_gap: Option<f64>, window: i64, lambda: f64) -> f64 {
    let attribute = match year_gap {
        Some(gap) if window != 0 => gap / window as f64,
        _ => 0.0,
    };
    overlap_distance(overlap) + lambda * attribute
}

/// Builds a [`WeightedGraph`] for a [`GraphRequest`]
pub struct GraphBuilder<'a> {
    store: &'a dyn GraphStore,
    config: &'a RecommendConfig,
}

/// Per-build counters, logged once the graph is assembled
#[derive(Debug, Default)]
struct BuildStats {
    rows: usize,
    accepted: usize,
    below_threshold: usize,
    discarded: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a RecommendConfig) -> Self {
        Self { store, config }
    }

    /// Build the graph described by `request`
    ///
    /// Store failures propagate unchanged. Raw requests never touch the store.
    #[tracing::instrument(skip(self, request), fields(graph_type = %request.graph_type, undirected = request.undirected))]
    pub fn build(&self, request: &GraphRequest) -> Result<WeightedGraph> {
        let start = Instant::now();
        let mut graph = WeightedGraph::new(request.undirected);
        let mut stats = BuildStats::default();

        match request.graph_type {
            GraphType::Raw => fold_raw(request, &mut graph, &mut stats),
            GraphType::SongHybrid => self.fold_song_hybrid(request, &mut graph, &mut stats)?,
            graph_type => {
                let (statement, params) = self.overlap_read(graph_type, request)?;
                let rows = self.store.query(statement, &params)?;
                fold_rows(&rows, request.min_score, &mut graph, &mut stats, |row| {
                    Ok(row.opt_real("score")?.map(overlap_distance))
                })?;
            }
        }

        tracing::debug!(
            rows = stats.rows,
            accepted = stats.accepted,
            below_threshold = stats.below_threshold,
            discarded = stats.discarded,
            nodes = graph.node_count(),
            "graph built"
        );
        trace_time!(start, "build_graph", nodes = graph.node_count());

        Ok(graph)
    }

    /// Statement and parameters for the sources converted with `1/(score+1)`
    fn overlap_read(
        &self,
        graph_type: GraphType,
        request: &GraphRequest,
    ) -> Result<(&'static str, Vec<(&'static str, Value)>)> {
        Ok(match graph_type {
            GraphType::SocialOverlap => (queries::SOCIAL_OVERLAP_EDGES, Vec::new()),
            GraphType::BandSimilarity => (queries::BAND_SIMILARITY_EDGES, Vec::new()),
            GraphType::GenreFiltered => {
                let genre = request.genre().ok_or_else(|| {
                    RecoError::missing_parameter(GraphType::GenreFiltered, "genre")
                })?;
                (
                    queries::GENRE_FILTERED_EDGES,
                    vec![(":genre", Value::text(genre))],
                )
            }
            // Raw and SongHybrid are handled by the caller
            GraphType::MovieSimilarity | GraphType::Raw | GraphType::SongHybrid => (
                queries::MOVIE_SIMILARITY_EDGES,
                vec![
                    (":platforms", Value::list(&request.platforms)),
                    (":only_user", Value::opt_text(request.only_user())),
                ],
            ),
        })
    }

    fn fold_song_hybrid(
        &self,
        request: &GraphRequest,
        graph: &mut WeightedGraph,
        stats: &mut BuildStats,
    ) -> Result<()> {
        let window = request.window.unwrap_or(self.config.default_window);
        let lambda = request.lambda.unwrap_or(self.config.default_lambda);
        if window < 0 {
            crate::bail_invalid!("window", window);
        }
        if !lambda.is_finite() {
            crate::bail_invalid!("lambda", lambda);
        }

        let rows = self.store.query(queries::SONG_HYBRID_EDGES, &[])?;
        fold_rows(&rows, request.min_score, graph, stats, |row| {
            let Some(overlap) = row.opt_real("score")? else {
                return Ok(None);
            };
            let year_gap = row.opt_real("year_gap")?;
            Ok(Some(hybrid_distance(overlap, year_gap, window, lambda)))
        })
    }
}

/// Graph from the explicit nodes and edges of a request, without a store
pub fn raw_graph(request: &GraphRequest) -> WeightedGraph {
    let mut graph = WeightedGraph::new(request.undirected);
    let mut stats = BuildStats::default();
    fold_raw(request, &mut graph, &mut stats);
    tracing::debug!(
        accepted = stats.accepted,
        discarded = stats.discarded,
        nodes = graph.node_count(),
        "raw graph built"
    );
    graph
}

fn fold_raw(request: &GraphRequest, graph: &mut WeightedGraph, stats: &mut BuildStats) {
    for node in &request.nodes {
        graph.add_node(node);
    }
    for edge in &request.edges {
        stats.rows += 1;
        if graph.add_edge(&edge.from, &edge.to, edge.weight) {
            stats.accepted += 1;
        } else {
            stats.discarded += 1;
        }
    }
}

/// Fold `(from_id, to_id, score)` rows into the graph
///
/// Rows with a null endpoint or score, a score below `min_score`, or a
/// converted weight that is not positive and finite are counted and skipped.
fn fold_rows(
    rows: &[Row],
    min_score: Option<f64>,
    graph: &mut WeightedGraph,
    stats: &mut BuildStats,
    weight_of: impl Fn(&Row) -> Result<Option<f64>>,
) -> Result<()> {
    for row in rows {
        stats.rows += 1;

        let (Some(from), Some(to)) = (row.opt_text("from_id")?, row.opt_text("to_id")?) else {
            stats.discarded += 1;
            continue;
        };

        if let (Some(min), Some(score)) = (min_score, row.opt_real("score")?) {
            if score < min {
                stats.below_threshold += 1;
                continue;
            }
        }

        match weight_of(row)? {
            Some(weight) if graph.add_edge(&from, &to, weight) => stats.accepted += 1,
            _ => stats.discarded += 1,
        }
    }
    Ok(())
}
