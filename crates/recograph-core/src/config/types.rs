//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// Tunables only. Nothing here caches graphs or results; every call still
/// rebuilds its working subgraph from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Recommendation tunables
    #[serde(default)]
    pub recommend: RecommendConfig,

    /// Marathon planner tunables
    #[serde(default)]
    pub marathon: MarathonConfig,

    /// Playlist generator tunables
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

/// Configuration for seed-set recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Maximum number of seeds used as simultaneous Dijkstra origins
    #[serde(default = "default_max_seeds")]
    pub max_seeds: usize,

    /// Song-hybrid time window in years (0 disables the attribute term)
    #[serde(default = "default_window")]
    pub default_window: i64,

    /// Song-hybrid weight of the attribute-distance term
    #[serde(default = "default_lambda")]
    pub default_lambda: f64,

    /// BFS positions scored per seed by genre recommendations
    #[serde(default = "default_genre_bfs_depth")]
    pub genre_bfs_depth: usize,
}

/// Configuration for the marathon planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarathonConfig {
    /// Branch-and-bound stops once its queue grows past this many states
    #[serde(default = "default_queue_cap")]
    pub queue_cap: usize,

    /// Maximum sequence length explored by backtracking
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Score multiplier for movies in a preferred genre
    #[serde(default = "default_preferred_genre_boost")]
    pub preferred_genre_boost: f64,

    /// Largest accepted time budget in minutes
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,
}

/// Configuration for the playlist generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Candidates read per requested song
    #[serde(default = "default_candidate_factor")]
    pub candidate_factor: usize,

    /// Songs tried before the search gives up
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_seeds: default_max_seeds(),
            default_window: default_window(),
            default_lambda: default_lambda(),
            genre_bfs_depth: default_genre_bfs_depth(),
        }
    }
}

impl Default for MarathonConfig {
    fn default() -> Self {
        Self {
            queue_cap: default_queue_cap(),
            max_depth: default_max_depth(),
            preferred_genre_boost: default_preferred_genre_boost(),
            max_minutes: default_max_minutes(),
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            candidate_factor: default_candidate_factor(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_max_seeds() -> usize {
    15
}

fn default_window() -> i64 {
    10
}

fn default_lambda() -> f64 {
    0.5
}

fn default_genre_bfs_depth() -> usize {
    4
}

fn default_queue_cap() -> usize {
    10_000
}

fn default_max_depth() -> usize {
    10
}

fn default_preferred_genre_boost() -> f64 {
    1.5
}

/// One week
fn default_max_minutes() -> u32 {
    10_080
}

fn default_candidate_factor() -> usize {
    5
}

fn default_max_steps() -> usize {
    100_000
}
