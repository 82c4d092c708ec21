//! Algorithm playground subcommands

use clap::{Args, Subcommand};

use super::parse::parse_edge;
use recograph_core::graph::{Edge, GraphRequest, GraphType};

/// Graph selection shared by every algorithm
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph type: friends, movies, bands, songs_hybrid, movies_genre, raw
    #[arg(long, short, default_value = "movies")]
    pub graph: String,

    /// Explicit edge FROM:TO:WEIGHT (repeatable); implies a raw graph
    #[arg(long, value_parser = parse_edge, action = clap::ArgAction::Append)]
    pub edge: Vec<Edge>,

    /// Explicit node without edges (repeatable); implies a raw graph
    #[arg(long, action = clap::ArgAction::Append)]
    pub node: Vec<String>,

    /// Mirror every edge in both directions
    #[arg(long, short)]
    pub undirected: bool,

    /// Drop rows whose raw score is below this
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Keep movie edges into titles on this service (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub platform: Vec<String>,

    /// Keep movie edges into titles on this user's subscriptions
    #[arg(long)]
    pub only_user: Option<String>,

    /// Song-hybrid time window in years
    #[arg(long)]
    pub window: Option<i64>,

    /// Song-hybrid attribute weight
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Genre for the movies_genre graph
    #[arg(long)]
    pub genre: Option<String>,
}

impl GraphArgs {
    /// Explicit edges or nodes always mean a raw graph
    pub fn is_raw(&self) -> bool {
        !self.edge.is_empty() || !self.node.is_empty()
    }

    pub fn to_request(&self) -> GraphRequest {
        let mut request = if self.is_raw() {
            GraphRequest::raw(self.node.clone(), self.edge.clone())
        } else {
            GraphRequest::new(GraphType::from_selector(&self.graph))
        };
        request.undirected = self.undirected;
        request.min_score = self.min_score;
        request.platforms = self.platform.clone();
        request.only_user = self.only_user.clone();
        request.window = self.window;
        request.lambda = self.lambda;
        request.genre = self.genre.clone();
        request
    }
}

#[derive(Subcommand, Debug)]
pub enum AlgoCommands {
    /// Breadth-first order from a start node
    Bfs {
        start: String,
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Depth-first preorder from a start node
    Dfs {
        start: String,
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Shortest distances from one or more sources
    Dijkstra {
        /// Source node; several sources run a multi-source search
        #[arg(required = true)]
        sources: Vec<String>,

        /// Also print the path to this node
        #[arg(long)]
        target: Option<String>,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Minimum spanning tree of a start node's component
    Prim {
        start: String,
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Minimum spanning forest of the whole graph
    Kruskal {
        #[command(flatten)]
        graph: GraphArgs,
    },
}
