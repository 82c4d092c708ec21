//! Ranking commands

use recograph_core::error::Result;
use recograph_core::rank::{sort_ascending_by_value, sort_descending_by_value, top_k};

use super::output::{print_json, print_scored, scored_json};
use crate::cli::rank::SortOrder;
use crate::cli::{Cli, OutputFormat, RankCommands};

pub fn execute(cli: &Cli, command: &RankCommands) -> Result<()> {
    let ranked = match command {
        RankCommands::Sort { items, order } => match order {
            SortOrder::Asc => sort_ascending_by_value(items.clone()),
            SortOrder::Desc => sort_descending_by_value(items.clone()),
        },
        RankCommands::TopK { items, k } => {
            if *k == 0 {
                recograph_core::bail_invalid!("k", k);
            }
            top_k(items.clone(), *k)
        }
    };

    let rows = ranked.iter().map(|(id, score)| (id.as_str(), *score));
    match cli.format {
        OutputFormat::Json => print_json(&scored_json(rows)),
        OutputFormat::Human => {
            print_scored(rows);
            Ok(())
        }
    }
}
