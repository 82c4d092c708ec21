//! Seed-set recommendation services
//!
//! Every service follows the same composition: resolve a seed set for the
//! requester, build the domain graph, run shortest paths (directly or on a
//! spanning-tree backbone), then rank candidates with [`compose`].
//! Unresolvable requests return an empty list rather than an error.

mod friends;
mod movies;
mod songs;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{RecoError, Result};
use crate::graph::ShortestPaths;
use crate::rank::sort_ascending_by_value;

pub use friends::FriendRecommender;
pub use movies::MovieRecommender;
pub use songs::{Backbone, SongOptions, SongRecommender};

/// One recommended item
///
/// `score` is distance-like (lower is closer) for graph-based
/// recommendations and a popularity value for rating-based ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub score: f64,
}

impl From<(String, f64)> for Recommendation {
    fn from((id, score): (String, f64)) -> Self {
        Self { id, score }
    }
}

/// Trimmed requester id; blank ids are caller errors
pub fn require_user(user: &str) -> Result<&str> {
    let user = user.trim();
    if user.is_empty() {
        return Err(RecoError::missing_identifier("user"));
    }
    Ok(user)
}

/// Result size must be at least one
pub fn require_k(k: usize) -> Result<()> {
    if k == 0 {
        crate::bail_invalid!("k", k);
    }
    Ok(())
}

/// Rank scored candidates
///
/// Seeds never appear in the result. Candidates in `exclude` are dropped
/// unless that would leave nothing, in which case the unfiltered pool is
/// used. Non-finite scores are unreachable and never ranked. The result is
/// sorted ascending by score and truncated to `k`.
pub fn compose(
    scored: impl IntoIterator<Item = (String, f64)>,
    seeds: &BTreeSet<String>,
    exclude: &BTreeSet<String>,
    k: usize,
) -> Vec<Recommendation> {
    let pool: Vec<(String, f64)> = scored
        .into_iter()
        .filter(|(id, score)| score.is_finite() && !seeds.contains(id))
        .collect();

    let filtered: Vec<(String, f64)> = pool
        .iter()
        .filter(|(id, _)| !exclude.contains(id))
        .cloned()
        .collect();

    let candidates = if filtered.is_empty() && !pool.is_empty() {
        tracing::debug!(pool = pool.len(), "exclusion emptied the pool, falling back");
        pool
    } else {
        filtered
    };

    let mut ranked = sort_ascending_by_value(candidates);
    ranked.truncate(k);
    ranked.into_iter().map(Recommendation::from).collect()
}

/// [`compose`] over the reachable nodes of a shortest-path run
pub fn rank_paths(
    paths: &ShortestPaths,
    seeds: &BTreeSet<String>,
    exclude: &BTreeSet<String>,
    k: usize,
) -> Vec<Recommendation> {
    compose(
        paths.reachable().map(|(id, d)| (id.to_string(), d)),
        seeds,
        exclude,
        k,
    )
}
