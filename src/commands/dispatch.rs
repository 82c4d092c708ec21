//! Command dispatch logic for recograph

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands;
use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::marathon::MarathonRequest;
use recograph_core::playlist::PlaylistConstraints;
use recograph_core::store::SqliteStore;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = EngineConfig::load_or_default(cli.config.as_deref())?;
    debug!(elapsed = ?start.elapsed(), "load_config");

    let result = match &cli.command {
        Commands::Algo(command) => commands::algo::execute(cli, &config, command),
        Commands::Rank(command) => commands::rank::execute(cli, command),
        Commands::Recommend(command) => commands::recommend::execute(cli, &config, command),
        Commands::Trending(command) => commands::trending::execute(cli, &config, command),
        Commands::Marathon {
            user,
            minutes,
            prefer,
            exclude,
            min_rating,
            algorithm,
        } => {
            let request = MarathonRequest {
                user: user.clone(),
                minutes: *minutes,
                preferred_genres: prefer.clone(),
                exclude: exclude.clone(),
                min_rating: *min_rating,
                algorithm: *algorithm,
            };
            commands::marathon::execute(cli, &config, &request)
        }
        Commands::Playlist {
            user,
            size,
            allow_repeat_artists,
            min_duration,
            max_duration,
        } => {
            let constraints = PlaylistConstraints::new(*size)
                .with_unique_artist(!allow_repeat_artists)
                .with_min_duration(*min_duration)
                .with_max_duration(*max_duration);
            commands::playlist::execute(cli, &config, user, &constraints)
        }
    };

    debug!(elapsed = ?start.elapsed(), "execute_command");
    result
}

/// Open the store named by `--db`
pub fn open_store(cli: &Cli) -> Result<SqliteStore> {
    let Some(path) = cli.db.as_deref() else {
        recograph_core::bail_usage!("no graph store given; pass --db <path> or set RECOGRAPH_DB");
    };
    SqliteStore::open(path)
}
