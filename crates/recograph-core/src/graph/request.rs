use super::weighted::Edge;
use std::fmt;

/// Which kind of graph to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphType {
    /// Users linked by liked-song overlap
    SocialOverlap,
    /// Movies linked by stored similarity scores
    #[default]
    MovieSimilarity,
    /// Bands linked by stored similarity scores
    BandSimilarity,
    /// Songs linked by co-listening overlap blended with release-year distance
    SongHybrid,
    /// Movie similarity restricted to one genre
    GenreFiltered,
    /// Explicit nodes and edges supplied by the caller; no store read
    Raw,
}

impl GraphType {
    pub const ALL: [GraphType; 6] = [
        GraphType::SocialOverlap,
        GraphType::MovieSimilarity,
        GraphType::BandSimilarity,
        GraphType::SongHybrid,
        GraphType::GenreFiltered,
        GraphType::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::SocialOverlap => "friends",
            GraphType::MovieSimilarity => "movies",
            GraphType::BandSimilarity => "bands",
            GraphType::SongHybrid => "songs_hybrid",
            GraphType::GenreFiltered => "movies_genre",
            GraphType::Raw => "raw",
        }
    }

    /// Strict parse of a selector; `None` if unrecognised
    pub fn parse(selector: &str) -> Option<GraphType> {
        match selector.trim().to_lowercase().as_str() {
            "friends" | "social" => Some(GraphType::SocialOverlap),
            "movies" => Some(GraphType::MovieSimilarity),
            "bands" => Some(GraphType::BandSimilarity),
            "songs_hybrid" => Some(GraphType::SongHybrid),
            "movies_genre" => Some(GraphType::GenreFiltered),
            "raw" => Some(GraphType::Raw),
            _ => None,
        }
    }

    /// Lenient parse: unrecognised selectors fall back to the default type
    /// with a warning instead of an error.
    pub fn from_selector(selector: &str) -> GraphType {
        match Self::parse(selector) {
            Some(graph_type) => graph_type,
            None => {
                let fallback = GraphType::default();
                tracing::warn!(
                    selector,
                    fallback = fallback.as_str(),
                    "unrecognized graph type, using default"
                );
                fallback
            }
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters describing the graph to build for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphRequest {
    pub graph_type: GraphType,
    /// Rows whose raw score is below this are dropped
    pub min_score: Option<f64>,
    /// Keep movie edges whose target is on any of these services
    pub platforms: Vec<String>,
    /// Keep movie edges whose target is on a service this user subscribes to
    pub only_user: Option<String>,
    pub undirected: bool,
    /// Song-hybrid time window in years
    pub window: Option<i64>,
    /// Song-hybrid attribute weight
    pub lambda: Option<f64>,
    /// Required by the genre-filtered graph
    pub genre: Option<String>,
    /// Raw graphs only
    pub nodes: Vec<String>,
    /// Raw graphs only
    pub edges: Vec<Edge>,
}

impl GraphRequest {
    pub fn new(graph_type: GraphType) -> Self {
        Self {
            graph_type,
            ..Default::default()
        }
    }

    /// Request for a selector string, with the lenient fallback
    pub fn for_selector(selector: &str) -> Self {
        Self::new(GraphType::from_selector(selector))
    }

    /// Request for an explicit graph
    pub fn raw(nodes: Vec<String>, edges: Vec<Edge>) -> Self {
        Self {
            graph_type: GraphType::Raw,
            nodes,
            edges,
            ..Default::default()
        }
    }

    pub fn undirected(mut self, undirected: bool) -> Self {
        self.undirected = undirected;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_only_user(mut self, user: impl Into<String>) -> Self {
        self.only_user = Some(user.into());
        self
    }

    pub fn with_window(mut self, window: i64) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// `only_user`, with blank values treated as absent
    pub fn only_user(&self) -> Option<&str> {
        self.only_user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// `genre`, with blank values treated as absent
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}
