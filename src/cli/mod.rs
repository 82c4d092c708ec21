//! CLI argument parsing for recograph
//!
//! Global flags: --db, --config, --format, --quiet, --verbose, --log-level,
//! --log-json

pub mod algo;
pub mod commands;
pub mod output;
pub mod parse;
pub mod rank;
pub mod recommend;
pub mod trending;

use clap::Parser;
use std::path::PathBuf;

pub use algo::{AlgoCommands, GraphArgs};
pub use commands::Commands;
pub use output::OutputFormat;
pub use rank::RankCommands;
pub use recommend::{FriendMode, MovieStrategy, RecommendCommands};
pub use trending::TrendingCommands;

/// Recograph - graph algorithms and recommendations over a SQLite graph store
#[derive(Parser, Debug)]
#[command(name = "recograph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite graph store to read from
    #[arg(long, global = true, env = "RECOGRAPH_DB")]
    pub db: Option<PathBuf>,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "RECOGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}
