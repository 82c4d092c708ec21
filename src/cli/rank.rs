//! Ranking subcommands

use clap::{Subcommand, ValueEnum};

use super::parse::parse_scored;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Subcommand, Debug)]
pub enum RankCommands {
    /// Stable sort of ID=SCORE items
    Sort {
        /// Items as ID=SCORE
        #[arg(required = true, value_parser = parse_scored)]
        items: Vec<(String, f64)>,

        /// Sort direction
        #[arg(long, value_enum, default_value = "asc")]
        order: SortOrder,
    },

    /// The k highest-scoring ID=SCORE items
    TopK {
        /// Items as ID=SCORE
        #[arg(required = true, value_parser = parse_scored)]
        items: Vec<(String, f64)>,

        /// Number of items to keep
        #[arg(short, default_value_t = 10)]
        k: usize,
    },
}
