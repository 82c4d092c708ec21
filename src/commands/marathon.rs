//! Marathon planning command

use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::marathon::{MarathonPlan, MarathonRequest, MarathonService};

use super::dispatch::open_store;
use super::output::{format_score, print_json};
use crate::cli::{Cli, OutputFormat};

pub fn execute(cli: &Cli, config: &EngineConfig, request: &MarathonRequest) -> Result<()> {
    let store = open_store(cli)?;
    let plan = MarathonService::new(&store, config).plan(request)?;
    output_plan(cli, &plan)
}

fn output_plan(cli: &Cli, plan: &MarathonPlan) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(plan),
        OutputFormat::Human => {
            if plan.movies.is_empty() {
                if !cli.quiet {
                    eprintln!("nothing fits the time budget");
                }
                return Ok(());
            }
            for movie in &plan.movies {
                println!(
                    "{}  {}  {} min  rating {:.1}",
                    movie.id, movie.title, movie.duration, movie.rating
                );
            }
            println!(
                "total {} min  score {}  avg rating {:.2}  ({})",
                plan.total_duration,
                format_score(plan.total_score),
                plan.average_rating,
                plan.algorithm
            );
            Ok(())
        }
    }
}
