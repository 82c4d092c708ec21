//! Top-level subcommands

use clap::Subcommand;

use super::algo::AlgoCommands;
use super::parse::parse_marathon_algorithm;
use super::rank::RankCommands;
use super::recommend::RecommendCommands;
use super::trending::TrendingCommands;
use recograph_core::marathon::MarathonAlgorithm;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a graph algorithm on a stored or explicit graph
    #[command(subcommand)]
    Algo(AlgoCommands),

    /// Sort or select scored items
    #[command(subcommand)]
    Rank(RankCommands),

    /// Recommend friends, songs or movies for a user
    #[command(subcommand)]
    Recommend(RecommendCommands),

    /// Popularity and influence analytics
    #[command(subcommand)]
    Trending(TrendingCommands),

    /// Plan a movie marathon within a time budget
    Marathon {
        /// User id
        user: String,

        /// Time budget in minutes
        #[arg(long, short)]
        minutes: i64,

        /// Preferred genre; scores in these genres are boosted (repeatable)
        #[arg(long = "prefer", action = clap::ArgAction::Append)]
        prefer: Vec<String>,

        /// Movie id never to schedule (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        /// Minimum average rating
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,

        /// Planner: dp, backtracking, branch-and-bound
        #[arg(long, short, default_value = "dp", value_parser = parse_marathon_algorithm)]
        algorithm: MarathonAlgorithm,
    },

    /// Build a playlist from the user's listening history
    Playlist {
        /// User id
        user: String,

        /// Number of songs
        #[arg(long, short = 'n', default_value_t = 5)]
        size: usize,

        /// Allow several songs by the same artist
        #[arg(long)]
        allow_repeat_artists: bool,

        /// Minimum total length in seconds (0 for none)
        #[arg(long)]
        min_duration: Option<u32>,

        /// Maximum total length in seconds (0 for none)
        #[arg(long)]
        max_duration: Option<u32>,
    },
}
