//! Algorithm playground commands

use recograph_core::config::EngineConfig;
use recograph_core::error::Result;
use recograph_core::graph::{
    bfs, dfs_order, dijkstra, kruskal, multi_source_dijkstra, prim, raw_graph, GraphBuilder,
    GraphType, ShortestPaths, SpanningTree, WeightedGraph,
};
use recograph_core::rank::sort_ascending_by_value;

use super::dispatch::open_store;
use super::output::{format_score, print_json, print_scored};
use crate::cli::{AlgoCommands, Cli, GraphArgs, OutputFormat};

pub fn execute(cli: &Cli, config: &EngineConfig, command: &AlgoCommands) -> Result<()> {
    match command {
        AlgoCommands::Bfs { start, graph } => {
            let graph = load_graph(cli, config, graph)?;
            output_order(cli, "bfs", start, &bfs(&graph, start))
        }
        AlgoCommands::Dfs { start, graph } => {
            let graph = load_graph(cli, config, graph)?;
            output_order(cli, "dfs", start, &dfs_order(&graph, start))
        }
        AlgoCommands::Dijkstra {
            sources,
            target,
            graph,
        } => {
            let graph = load_graph(cli, config, graph)?;
            let paths = match sources.as_slice() {
                [single] => dijkstra(&graph, single),
                many => multi_source_dijkstra(&graph, many.iter().map(String::as_str)),
            };
            output_paths(cli, sources, target.as_deref(), &paths)
        }
        AlgoCommands::Prim { start, graph } => {
            let graph = load_graph(cli, config, graph)?;
            output_tree(cli, &prim(&graph, start))
        }
        AlgoCommands::Kruskal { graph } => {
            let graph = load_graph(cli, config, graph)?;
            output_tree(cli, &kruskal(&graph))
        }
    }
}

fn load_graph(cli: &Cli, config: &EngineConfig, args: &GraphArgs) -> Result<WeightedGraph> {
    let request = args.to_request();
    if request.graph_type == GraphType::Raw {
        return Ok(raw_graph(&request));
    }
    let store = open_store(cli)?;
    GraphBuilder::new(&store, &config.recommend).build(&request)
}

fn output_order(cli: &Cli, algorithm: &str, start: &str, order: &[String]) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "algorithm": algorithm,
            "start": start,
            "order": order,
        })),
        OutputFormat::Human => {
            if order.is_empty() && !cli.quiet {
                eprintln!("{} is not in the graph", start);
            }
            for id in order {
                println!("{}", id);
            }
            Ok(())
        }
    }
}

fn output_paths(
    cli: &Cli,
    sources: &[String],
    target: Option<&str>,
    paths: &ShortestPaths,
) -> Result<()> {
    let path = target.map(|t| paths.path_to(t));

    match cli.format {
        OutputFormat::Json => {
            let distances: serde_json::Map<String, serde_json::Value> = paths
                .distances
                .iter()
                .map(|(id, d)| {
                    let value = if d.is_finite() {
                        serde_json::json!(d)
                    } else {
                        serde_json::Value::Null
                    };
                    (id.clone(), value)
                })
                .collect();
            let mut body = serde_json::json!({
                "sources": sources,
                "distances": distances,
            });
            if let Some(path) = path {
                body["path"] = serde_json::json!(path);
            }
            print_json(&body)
        }
        OutputFormat::Human => {
            let reachable: Vec<(&str, f64)> = paths.reachable().collect();
            let unreachable = paths.distances.len() - reachable.len();
            print_scored(sort_ascending_by_value(reachable));
            if unreachable > 0 && !cli.quiet {
                println!("({} unreachable)", unreachable);
            }
            if let (Some(target), Some(path)) = (target, path) {
                match path {
                    Some(nodes) => println!(
                        "path: {}  ({})",
                        nodes.join(" -> "),
                        format_score(paths.distance(target))
                    ),
                    None => println!("path: {} is unreachable", target),
                }
            }
            Ok(())
        }
    }
}

fn output_tree(cli: &Cli, tree: &SpanningTree) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(tree),
        OutputFormat::Human => {
            for edge in &tree.edges {
                println!("{} - {}  {}", edge.from, edge.to, format_score(edge.weight));
            }
            println!("total  {}", format_score(tree.total_weight));
            Ok(())
        }
    }
}
