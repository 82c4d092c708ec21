//! Movie marathon planning
//!
//! Chooses unwatched movies that fit a time budget. Three planners share the
//! same candidate list: an exact 0/1 knapsack over minutes, a depth-capped
//! backtracking search that favours the longest sequence, and a best-first
//! branch and bound that stops once its queue passes a hard size cap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use serde::Serialize;

use crate::config::{EngineConfig, MarathonConfig};
use crate::error::{RecoError, Result};
use crate::recommend::require_user;
use crate::store::{queries, GraphStore, Value};

/// Points per rating star
const RATING_WEIGHT: f64 = 20.0;

/// A movie that may join the marathon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarathonCandidate {
    pub id: String,
    pub title: String,
    pub genre: Option<String>,
    /// Minutes
    pub duration: u32,
    pub rating: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarathonAlgorithm {
    #[default]
    Dp,
    Backtracking,
    BranchAndBound,
}

impl MarathonAlgorithm {
    pub fn parse(s: &str) -> Option<MarathonAlgorithm> {
        match s.trim().to_lowercase().as_str() {
            "dp" | "knapsack" => Some(MarathonAlgorithm::Dp),
            "backtracking" => Some(MarathonAlgorithm::Backtracking),
            "branch-and-bound" | "branch_and_bound" | "bnb" => {
                Some(MarathonAlgorithm::BranchAndBound)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarathonAlgorithm::Dp => "dp",
            MarathonAlgorithm::Backtracking => "backtracking",
            MarathonAlgorithm::BranchAndBound => "branch-and-bound",
        }
    }
}

impl fmt::Display for MarathonAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarathonRequest {
    pub user: String,
    /// Time budget in minutes
    pub minutes: i64,
    pub preferred_genres: Vec<String>,
    /// Movie ids never to schedule
    pub exclude: Vec<String>,
    pub min_rating: f64,
    pub algorithm: MarathonAlgorithm,
}

impl MarathonRequest {
    pub fn new(user: impl Into<String>, minutes: i64) -> Self {
        Self {
            user: user.into(),
            minutes,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarathonPlan {
    pub movies: Vec<MarathonCandidate>,
    pub total_duration: u32,
    pub total_score: f64,
    pub average_rating: f64,
    pub algorithm: MarathonAlgorithm,
}

impl MarathonPlan {
    fn from_selection(
        candidates: &[MarathonCandidate],
        mut chosen: Vec<usize>,
        algorithm: MarathonAlgorithm,
    ) -> Self {
        chosen.sort_unstable();
        let movies: Vec<MarathonCandidate> =
            chosen.into_iter().map(|i| candidates[i].clone()).collect();
        let total_duration = movies.iter().map(|m| m.duration).sum();
        let total_score = movies.iter().map(|m| m.score).sum();
        let average_rating = if movies.is_empty() {
            0.0
        } else {
            movies.iter().map(|m| m.rating).sum::<f64>() / movies.len() as f64
        };
        Self {
            movies,
            total_duration,
            total_score,
            average_rating,
            algorithm,
        }
    }
}

/// Exact 0/1 knapsack: maximum total score within `minutes`
///
/// The table never grows past the combined length of the candidates.
pub fn plan_dp(candidates: &[MarathonCandidate], minutes: u32) -> Vec<usize> {
    let catalogue: u64 = candidates.iter().map(|m| u64::from(m.duration)).sum();
    let capacity = u64::from(minutes).min(catalogue) as usize;
    let mut best = vec![0.0_f64; capacity + 1];
    let mut taken = vec![vec![false; capacity + 1]; candidates.len()];

    for (i, movie) in candidates.iter().enumerate() {
        let duration = movie.duration as usize;
        if duration == 0 || duration > capacity {
            continue;
        }
        for w in (duration..=capacity).rev() {
            let with = best[w - duration] + movie.score;
            if with > best[w] {
                best[w] = with;
                taken[i][w] = true;
            }
        }
    }

    let mut chosen = Vec::new();
    let mut w = capacity;
    for i in (0..candidates.len()).rev() {
        if taken[i][w] {
            chosen.push(i);
            w -= candidates[i].duration as usize;
        }
    }
    chosen
}

/// Depth-capped search for the longest sequence within `minutes`
///
/// Ties in length go to the higher total score.
pub fn plan_backtracking(
    candidates: &[MarathonCandidate],
    minutes: u32,
    max_depth: usize,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].duration > 0)
        .collect();
    order.sort_by_key(|&i| candidates[i].duration);

    let mut search = Backtrack {
        candidates,
        order: &order,
        max_depth,
        best: Vec::new(),
        best_score: 0.0,
        current: Vec::new(),
    };
    search.explore(0, minutes, 0.0);
    search.best
}

struct Backtrack<'c> {
    candidates: &'c [MarathonCandidate],
    /// Candidate indices, shortest first
    order: &'c [usize],
    max_depth: usize,
    best: Vec<usize>,
    best_score: f64,
    current: Vec<usize>,
}

impl Backtrack<'_> {
    fn explore(&mut self, from: usize, remaining: u32, score: f64) {
        let better = self.current.len() > self.best.len()
            || (self.current.len() == self.best.len() && score > self.best_score);
        if better {
            self.best = self.current.clone();
            self.best_score = score;
        }
        if self.current.len() >= self.max_depth {
            return;
        }
        if self.current.len() + self.fit_bound(from, remaining) < self.best.len() {
            return;
        }

        for pos in from..self.order.len() {
            let i = self.order[pos];
            let movie = &self.candidates[i];
            // Sorted by duration: nothing later fits either
            if movie.duration > remaining {
                break;
            }
            self.current.push(i);
            self.explore(pos + 1, remaining - movie.duration, score + movie.score);
            self.current.pop();
        }
    }

    /// Most additional movies that could still fit
    fn fit_bound(&self, from: usize, remaining: u32) -> usize {
        let mut left = remaining;
        let mut count = 0;
        for &i in &self.order[from..] {
            let duration = self.candidates[i].duration;
            if duration > left {
                break;
            }
            left -= duration;
            count += 1;
        }
        count
    }
}

/// Partial selection explored by branch and bound
#[derive(Debug)]
struct Node {
    bound: f64,
    score: f64,
    used: u32,
    /// Next position in ratio order
    next: usize,
    chosen: Vec<usize>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.bound.total_cmp(&other.bound))
    }
}

/// Best-first branch and bound on achieved score
///
/// Stops expanding once the queue holds more than `queue_cap` states and
/// returns the best selection found so far.
pub fn plan_branch_and_bound(
    candidates: &[MarathonCandidate],
    minutes: u32,
    queue_cap: usize,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].duration > 0)
        .collect();
    order.sort_by(|&a, &b| {
        let ra = candidates[a].score / f64::from(candidates[a].duration);
        let rb = candidates[b].score / f64::from(candidates[b].duration);
        rb.total_cmp(&ra)
    });

    // Fractional knapsack relaxation over the remaining items
    let bound = |next: usize, used: u32, score: f64| -> f64 {
        let mut room = minutes.saturating_sub(used);
        let mut total = score;
        for &i in &order[next..] {
            let movie = &candidates[i];
            if movie.duration <= room {
                room -= movie.duration;
                total += movie.score;
            } else {
                total += movie.score * f64::from(room) / f64::from(movie.duration);
                break;
            }
        }
        total
    };

    let mut best: Vec<usize> = Vec::new();
    let mut best_score = 0.0;
    let mut queue = BinaryHeap::new();
    queue.push(Node {
        bound: bound(0, 0, 0.0),
        score: 0.0,
        used: 0,
        next: 0,
        chosen: Vec::new(),
    });

    while let Some(node) = queue.pop() {
        if queue.len() > queue_cap {
            tracing::warn!(queue_cap, "branch and bound queue cap reached");
            break;
        }
        if node.score > best_score {
            best_score = node.score;
            best = node.chosen.clone();
        }
        if node.next >= order.len() || node.bound <= best_score {
            continue;
        }

        let i = order[node.next];
        let movie = &candidates[i];
        // `used` never exceeds `minutes`
        if movie.duration <= minutes - node.used {
            let mut chosen = node.chosen.clone();
            chosen.push(i);
            let used = node.used + movie.duration;
            let score = node.score + movie.score;
            queue.push(Node {
                bound: bound(node.next + 1, used, score),
                score,
                used,
                next: node.next + 1,
                chosen,
            });
        }

        let skip_bound = bound(node.next + 1, node.used, node.score);
        if skip_bound > best_score {
            queue.push(Node {
                bound: skip_bound,
                score: node.score,
                used: node.used,
                next: node.next + 1,
                chosen: node.chosen,
            });
        }
    }

    best
}

/// Plans marathons from the store
pub struct MarathonService<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
}

impl<'a> MarathonService<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    #[tracing::instrument(skip(self, request), fields(user = %request.user, minutes = request.minutes, algorithm = %request.algorithm))]
    pub fn plan(&self, request: &MarathonRequest) -> Result<MarathonPlan> {
        let user = require_user(&request.user)?;
        let cfg: &MarathonConfig = &self.config.marathon;
        if request.minutes <= 0 || request.minutes > i64::from(cfg.max_minutes) {
            crate::bail_invalid!("minutes", request.minutes);
        }
        let minutes = u32::try_from(request.minutes)
            .map_err(|_| RecoError::invalid_value("minutes", request.minutes))?;

        let candidates = self.candidates(user, request)?;
        tracing::debug!(candidates = candidates.len(), "marathon candidates");

        let chosen = match request.algorithm {
            MarathonAlgorithm::Dp => plan_dp(&candidates, minutes),
            MarathonAlgorithm::Backtracking => {
                plan_backtracking(&candidates, minutes, cfg.max_depth)
            }
            MarathonAlgorithm::BranchAndBound => {
                plan_branch_and_bound(&candidates, minutes, cfg.queue_cap)
            }
        };

        Ok(MarathonPlan::from_selection(
            &candidates,
            chosen,
            request.algorithm,
        ))
    }

    fn candidates(&self, user: &str, request: &MarathonRequest) -> Result<Vec<MarathonCandidate>> {
        let rows = self.store.query(
            queries::MARATHON_CANDIDATES,
            &[
                (":user", Value::text(user)),
                (":exclude", Value::list(&request.exclude)),
                (":min_rating", Value::Real(request.min_rating)),
            ],
        )?;

        let boost = self.config.marathon.preferred_genre_boost;
        let mut candidates = Vec::with_capacity(rows.len());
        for row in &rows {
            let duration = row.integer("duration")?;
            let Ok(duration) = u32::try_from(duration) else {
                continue;
            };
            let genre = row.opt_text("genre")?;
            let rating = row.real("rating")?;
            let preferred = genre.as_deref().is_some_and(|g| {
                request
                    .preferred_genres
                    .iter()
                    .any(|p| p.trim().eq_ignore_ascii_case(g))
            });
            let mut score = rating * RATING_WEIGHT;
            if preferred {
                score *= boost;
            }
            candidates.push(MarathonCandidate {
                id: row.text("id")?,
                title: row.opt_text("title")?.unwrap_or_default(),
                genre,
                duration,
                rating,
                score,
            });
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_store;

    fn movie(id: &str, duration: u32, score: f64) -> MarathonCandidate {
        MarathonCandidate {
            id: id.to_string(),
            title: id.to_uppercase(),
            genre: None,
            duration,
            rating: score / RATING_WEIGHT,
            score,
        }
    }

    fn catalogue() -> Vec<MarathonCandidate> {
        vec![
            movie("a", 120, 100.0),
            movie("b", 90, 60.0),
            movie("c", 60, 50.0),
            movie("d", 30, 10.0),
            movie("e", 45, 20.0),
        ]
    }

    fn total_score(candidates: &[MarathonCandidate], chosen: &[usize]) -> f64 {
        chosen.iter().map(|&i| candidates[i].score).sum()
    }

    fn total_minutes(candidates: &[MarathonCandidate], chosen: &[usize]) -> u32 {
        chosen.iter().map(|&i| candidates[i].duration).sum()
    }

    #[test]
    fn test_dp_is_optimal() {
        let c = catalogue();
        let chosen = plan_dp(&c, 180);
        // a + c = 150
        assert_eq!(total_score(&c, &chosen), 150.0);
        assert!(total_minutes(&c, &chosen) <= 180);
    }

    #[test]
    fn test_branch_and_bound_matches_dp() {
        let c = catalogue();
        for minutes in [30, 75, 150, 180, 240, 345] {
            let dp = plan_dp(&c, minutes);
            let bnb = plan_branch_and_bound(&c, minutes, 10_000);
            assert_eq!(total_score(&c, &bnb), total_score(&c, &dp), "minutes {}", minutes);
            assert!(total_minutes(&c, &bnb) <= minutes);
        }
    }

    #[test]
    fn test_backtracking_prefers_longest() {
        let c = catalogue();
        let chosen = plan_backtracking(&c, 180, 10);
        // d + e + c = 135 minutes, three movies
        assert_eq!(chosen.len(), 3);
        assert!(total_minutes(&c, &chosen) <= 180);
    }

    #[test]
    fn test_backtracking_depth_cap() {
        let c = catalogue();
        let chosen = plan_backtracking(&c, 1000, 2);
        assert_eq!(chosen.len(), 2);
        // best pair by score among all pairs
        assert_eq!(total_score(&c, &chosen), 160.0);
    }

    #[test]
    fn test_nothing_fits() {
        let c = catalogue();
        assert!(plan_dp(&c, 10).is_empty());
        assert!(plan_backtracking(&c, 10, 5).is_empty());
        assert!(plan_branch_and_bound(&c, 10, 100).is_empty());
    }

    #[test]
    fn test_dp_huge_budget_sized_by_catalogue() {
        let c = vec![movie("a", 120, 100.0)];
        assert_eq!(plan_dp(&c, 2_000_000_000), vec![0]);
        assert_eq!(plan_dp(&c, u32::MAX), vec![0]);
    }

    #[test]
    fn test_branch_and_bound_near_max_duration() {
        let c = vec![movie("a", 10, 5.0), movie("epic", u32::MAX, 100.0)];
        assert_eq!(plan_branch_and_bound(&c, 100, 10_000), vec![0]);
        assert_eq!(plan_backtracking(&c, 100, 5), vec![0]);
    }

    #[test]
    fn test_queue_cap_returns_best_so_far() {
        let c = catalogue();
        let chosen = plan_branch_and_bound(&c, 345, 0);
        assert!(total_minutes(&c, &chosen) <= 345);
    }

    #[test]
    fn test_service_plan() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = MarathonService::new(&store, &config);

        for algorithm in [
            MarathonAlgorithm::Dp,
            MarathonAlgorithm::Backtracking,
            MarathonAlgorithm::BranchAndBound,
        ] {
            let request = MarathonRequest {
                algorithm,
                ..MarathonRequest::new("alice", 240)
            };
            let plan = service.plan(&request).unwrap();
            let ids: Vec<&str> = plan.movies.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids, vec!["m4", "m5"], "{}", algorithm);
            assert_eq!(plan.total_duration, 213);
            assert_eq!(plan.total_score, 180.0);
            assert_eq!(plan.average_rating, 4.5);
            assert_eq!(plan.algorithm, algorithm);
        }
    }

    #[test]
    fn test_service_preferences_and_filters() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = MarathonService::new(&store, &config);

        let request = MarathonRequest {
            preferred_genres: vec!["animation".to_string()],
            ..MarathonRequest::new("alice", 240)
        };
        assert_eq!(service.plan(&request).unwrap().total_score, 220.0);

        let request = MarathonRequest {
            exclude: vec!["m4".to_string()],
            ..MarathonRequest::new("alice", 240)
        };
        let ids: Vec<String> = service
            .plan(&request)
            .unwrap()
            .movies
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["m5", "m3"]);

        let request = MarathonRequest {
            min_rating: 4.5,
            ..MarathonRequest::new("alice", 240)
        };
        let plan = service.plan(&request).unwrap();
        assert_eq!(plan.movies.len(), 1);
        assert_eq!(plan.movies[0].id, "m4");
    }

    #[test]
    fn test_service_caller_errors() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = MarathonService::new(&store, &config);
        assert!(matches!(
            service.plan(&MarathonRequest::new(" ", 120)),
            Err(RecoError::MissingIdentifier { .. })
        ));
        assert!(matches!(
            service.plan(&MarathonRequest::new("alice", 0)),
            Err(RecoError::InvalidValue { .. })
        ));
        assert!(matches!(
            service.plan(&MarathonRequest::new("alice", 2_000_000_000)),
            Err(RecoError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_service_budget_limit_from_config() {
        let store = seeded_store();
        let mut config = EngineConfig::default();
        config.marathon.max_minutes = 200;
        let service = MarathonService::new(&store, &config);

        assert!(matches!(
            service.plan(&MarathonRequest::new("alice", 240)),
            Err(RecoError::InvalidValue { .. })
        ));
        let plan = service.plan(&MarathonRequest::new("alice", 200)).unwrap();
        assert!(plan.total_duration <= 200);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(MarathonAlgorithm::parse("BNB"), Some(MarathonAlgorithm::BranchAndBound));
        assert_eq!(MarathonAlgorithm::parse("dp"), Some(MarathonAlgorithm::Dp));
        assert_eq!(MarathonAlgorithm::parse("greedy"), None);
    }
}
