//! Value parsers for CLI arguments

use recograph_core::graph::Edge;
use recograph_core::marathon::MarathonAlgorithm;
use recograph_core::recommend::Backbone;

/// Parse an edge given as `FROM:TO:WEIGHT`
pub fn parse_edge(s: &str) -> std::result::Result<Edge, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(weight), Some(to), Some(from)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected FROM:TO:WEIGHT, got '{}'", s));
    };
    if from.is_empty() || to.is_empty() {
        return Err(format!("edge '{}' has an empty endpoint", s));
    }
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{}' in edge '{}'", weight, s))?;
    Ok(Edge::new(from, to, weight))
}

/// Parse a scored item given as `ID=SCORE`
pub fn parse_scored(s: &str) -> std::result::Result<(String, f64), String> {
    let (id, score) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ID=SCORE, got '{}'", s))?;
    if id.is_empty() {
        return Err(format!("item '{}' has an empty id", s));
    }
    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| format!("invalid score '{}' in item '{}'", score, s))?;
    Ok((id.to_string(), score))
}

pub fn parse_backbone(s: &str) -> std::result::Result<Backbone, String> {
    Backbone::parse(s).ok_or_else(|| format!("unknown backbone '{}' (full, prim)", s))
}

pub fn parse_marathon_algorithm(s: &str) -> std::result::Result<MarathonAlgorithm, String> {
    MarathonAlgorithm::parse(s)
        .ok_or_else(|| format!("unknown algorithm '{}' (dp, backtracking, branch-and-bound)", s))
}
