//! Trending and analytics commands

use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::trending::{RankedItem, TasteComparison, TrendingService};

use super::dispatch::open_store;
use super::output::{print_json, print_scored};
use crate::cli::{Cli, OutputFormat, TrendingCommands};

pub fn execute(cli: &Cli, config: &EngineConfig, command: &TrendingCommands) -> Result<()> {
    let store = open_store(cli)?;
    let service = TrendingService::new(&store, config);

    let items = match command {
        TrendingCommands::Songs { k, platform } => service.top_songs(*k, platform)?,
        TrendingCommands::Movies { k } => service.top_movies(*k)?,
        TrendingCommands::Genre { genre, k } => service.movies_by_genre(genre, *k)?,
        TrendingCommands::Influence { k } => service.influential_movies(*k)?,
        TrendingCommands::Taste { user, k } => {
            let taste = service.compare_taste(user, *k)?;
            return output_taste(cli, &taste);
        }
    };

    output_items(cli, &items)
}

fn output_items(cli: &Cli, items: &[RankedItem]) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Human => {
            print_scored(items.iter().map(|r| (r.id.as_str(), r.score)));
            Ok(())
        }
    }
}

fn output_taste(cli: &Cli, taste: &TasteComparison) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(taste),
        OutputFormat::Human => {
            println!("your top titles:");
            print_scored(taste.user_top.iter().map(|r| (r.id.as_str(), r.score)));
            println!("global top titles:");
            print_scored(taste.global_top.iter().map(|r| (r.id.as_str(), r.score)));
            println!("genres (you / everyone):");
            let genres = taste.user_genres.keys().chain(
                taste
                    .global_genres
                    .keys()
                    .filter(|g| !taste.user_genres.contains_key(*g)),
            );
            for genre in genres {
                println!(
                    "  {}  {} / {}",
                    genre,
                    taste.user_genres.get(genre).copied().unwrap_or(0),
                    taste.global_genres.get(genre).copied().unwrap_or(0)
                );
            }
            Ok(())
        }
    }
}
