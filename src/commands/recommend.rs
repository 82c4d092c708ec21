//! Recommendation commands

use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::recommend::{
    FriendRecommender, MovieRecommender, Recommendation, SongOptions, SongRecommender,
};

use super::dispatch::open_store;
use super::output::{print_json, print_scored};
use crate::cli::{Cli, FriendMode, MovieStrategy, OutputFormat, RecommendCommands};

pub fn execute(cli: &Cli, config: &EngineConfig, command: &RecommendCommands) -> Result<()> {
    let store = open_store(cli)?;

    let recommendations = match command {
        RecommendCommands::Friends { user, k, mode } => {
            let service = FriendRecommender::new(&store, config);
            match mode {
                FriendMode::Direct => service.direct(user, *k)?,
                FriendMode::Path => service.by_shortest_path(user, *k)?,
            }
        }
        RecommendCommands::Songs {
            user,
            k,
            window,
            lambda,
            backbone,
        } => {
            let options = SongOptions {
                window: *window,
                lambda: *lambda,
                backbone: *backbone,
            };
            SongRecommender::new(&store, config).for_user(user, *k, options)?
        }
        RecommendCommands::Movies {
            user,
            k,
            strategy,
            genre,
            platform,
            subscribed_only,
        } => {
            let service = MovieRecommender::new(&store, config)
                .with_platforms(platform.clone())
                .subscribed_only(*subscribed_only);
            match strategy {
                MovieStrategy::Nearest => service.nearest(user, *k)?,
                MovieStrategy::Bfs => service.by_bfs(user, *k)?,
                MovieStrategy::Dfs => service.by_dfs(user, *k)?,
                MovieStrategy::Diverse => service.diverse(user, *k)?,
                MovieStrategy::Genre => {
                    service.by_genre(user, genre.as_deref().unwrap_or_default(), *k)?
                }
                MovieStrategy::Rating => service.by_rating(user, *k)?,
            }
        }
    };

    output_recommendations(cli, &recommendations)
}

fn output_recommendations(cli: &Cli, recommendations: &[Recommendation]) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(recommendations),
        OutputFormat::Human => {
            if recommendations.is_empty() && !cli.quiet {
                eprintln!("no recommendations");
            }
            print_scored(recommendations.iter().map(|r| (r.id.as_str(), r.score)));
            Ok(())
        }
    }
}
