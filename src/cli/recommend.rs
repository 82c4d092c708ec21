//! Recommendation subcommands

use clap::{Subcommand, ValueEnum};

use super::parse::parse_backbone;
use recograph_core::recommend::Backbone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FriendMode {
    /// Direct liked-song overlap only
    Direct,
    /// Shortest paths through the overlap graph
    #[default]
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MovieStrategy {
    /// Multi-source shortest paths from watched movies
    #[default]
    Nearest,
    /// Breadth-first positions from each watched movie
    Bfs,
    /// Depth-first positions from each watched movie
    Dfs,
    /// Minimum spanning forest backbone
    Diverse,
    /// Breadth-first positions within one genre
    Genre,
    /// Average rating and watch count
    Rating,
}

#[derive(Subcommand, Debug)]
pub enum RecommendCommands {
    /// Users with similar taste in songs
    Friends {
        /// User id
        user: String,

        /// Number of results
        #[arg(short, default_value_t = 10)]
        k: usize,

        #[arg(long, value_enum, default_value = "path")]
        mode: FriendMode,
    },

    /// Songs close to the user's most played songs
    Songs {
        /// User id
        user: String,

        /// Number of results
        #[arg(short, default_value_t = 10)]
        k: usize,

        /// Time window in years (0 disables the release-year term)
        #[arg(long)]
        window: Option<i64>,

        /// Weight of the release-year term
        #[arg(long)]
        lambda: Option<f64>,

        /// Graph to search: full or prim
        #[arg(long, default_value = "full", value_parser = parse_backbone)]
        backbone: Backbone,
    },

    /// Movies related to the user's watch history
    Movies {
        /// User id
        user: String,

        /// Number of results
        #[arg(short, default_value_t = 10)]
        k: usize,

        #[arg(long, value_enum, default_value = "nearest")]
        strategy: MovieStrategy,

        /// Genre for the genre strategy
        #[arg(long)]
        genre: Option<String>,

        /// Only follow edges into titles on this service (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        platform: Vec<String>,

        /// Only follow edges into titles on the user's subscriptions
        #[arg(long)]
        subscribed_only: bool,
    },
}
