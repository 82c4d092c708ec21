//! Trending and analytics subcommands

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TrendingCommands {
    /// Most played songs
    Songs {
        #[arg(short, default_value_t = 10)]
        k: usize,

        /// Only songs on this service (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        platform: Vec<String>,
    },

    /// Most watched movies
    Movies {
        #[arg(short, default_value_t = 10)]
        k: usize,
    },

    /// Most watched movies in a genre
    Genre {
        genre: String,

        #[arg(short, default_value_t = 10)]
        k: usize,
    },

    /// Movies reaching the most titles through similarity
    Influence {
        #[arg(short, default_value_t = 10)]
        k: usize,
    },

    /// A user's watching habits against the global top titles
    Taste {
        user: String,

        #[arg(short, default_value_t = 5)]
        k: usize,
    },
}
