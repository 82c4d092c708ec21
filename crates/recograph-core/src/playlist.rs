//! Constraint-driven playlist generation
//!
//! Candidates are songs the user has listened to, most popular first. A
//! backtracking search takes the first combination of `size` songs that
//! satisfies the constraints, so popular songs win whenever they fit.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::{EngineConfig, PlaylistConfig};
use crate::error::{RecoError, Result};
use crate::recommend::require_user;
use crate::store::{queries, GraphStore, Value};

const UNKNOWN_ARTIST: &str = "Unknown";

/// A song that may join the playlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistSong {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Seconds; unknown lengths count as zero
    pub duration: Option<u32>,
    /// Total plays across all users
    pub popularity: i64,
}

impl PlaylistSong {
    fn seconds(&self) -> u64 {
        u64::from(self.duration.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistConstraints {
    /// Exact number of songs
    pub size: usize,
    /// At most one song per artist
    pub unique_artist: bool,
    /// Lower bound on total seconds
    pub min_duration: Option<u32>,
    /// Upper bound on total seconds
    pub max_duration: Option<u32>,
}

impl PlaylistConstraints {
    /// `size` songs, one per artist, any total length
    pub fn new(size: usize) -> Self {
        Self {
            size,
            unique_artist: true,
            min_duration: None,
            max_duration: None,
        }
    }

    pub fn with_unique_artist(mut self, unique_artist: bool) -> Self {
        self.unique_artist = unique_artist;
        self
    }

    /// Zero means no lower bound
    pub fn with_min_duration(mut self, seconds: Option<u32>) -> Self {
        self.min_duration = seconds.filter(|&s| s > 0);
        self
    }

    /// Zero means no upper bound
    pub fn with_max_duration(mut self, seconds: Option<u32>) -> Self {
        self.max_duration = seconds.filter(|&s| s > 0);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            crate::bail_invalid!("size", 0);
        }
        if let (Some(min), Some(max)) = (self.min_duration, self.max_duration) {
            if min > max {
                return Err(RecoError::invalid_value(
                    "duration range",
                    format!("min {} exceeds max {}", min, max),
                ));
            }
        }
        Ok(())
    }

    fn reaches_min(&self, seconds: u64) -> bool {
        !self.min_duration.is_some_and(|min| seconds < u64::from(min))
    }

    fn exceeds_max(&self, seconds: u64) -> bool {
        self.max_duration.is_some_and(|max| seconds > u64::from(max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playlist {
    /// In play order, most popular first
    pub songs: Vec<PlaylistSong>,
    pub size: usize,
    /// Seconds
    pub total_duration: u64,
}

impl Playlist {
    fn from_selection(candidates: &[PlaylistSong], chosen: Vec<usize>) -> Self {
        let songs: Vec<PlaylistSong> = chosen.into_iter().map(|i| candidates[i].clone()).collect();
        let total_duration = songs.iter().map(PlaylistSong::seconds).sum();
        Self {
            size: songs.len(),
            songs,
            total_duration,
        }
    }
}

/// First selection of candidate indices that satisfies `constraints`
///
/// Candidates are tried most popular first (stable for equal popularity).
/// `None` if no combination qualifies or `max_steps` songs were tried
/// without finding one.
pub fn generate(
    candidates: &[PlaylistSong],
    constraints: &PlaylistConstraints,
    max_steps: usize,
) -> Option<Vec<usize>> {
    if constraints.size == 0 || constraints.size > candidates.len() {
        return None;
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| candidates[b].popularity.cmp(&candidates[a].popularity));

    // Seconds still available from each position to the end
    let mut suffix = vec![0_u64; order.len() + 1];
    for pos in (0..order.len()).rev() {
        suffix[pos] = suffix[pos + 1] + candidates[order[pos]].seconds();
    }

    let mut search = Search {
        candidates,
        order: &order,
        suffix: &suffix,
        constraints,
        current: Vec::new(),
        artists: HashSet::new(),
        steps: 0,
        max_steps,
        exhausted: false,
    };
    if search.explore(0, 0) {
        return Some(search.current);
    }
    if search.exhausted {
        tracing::warn!(max_steps, "playlist search step limit reached");
    }
    None
}

struct Search<'c> {
    candidates: &'c [PlaylistSong],
    /// Candidate indices, most popular first
    order: &'c [usize],
    suffix: &'c [u64],
    constraints: &'c PlaylistConstraints,
    current: Vec<usize>,
    artists: HashSet<&'c str>,
    steps: usize,
    max_steps: usize,
    exhausted: bool,
}

impl Search<'_> {
    /// `true` once `current` holds a complete, valid playlist
    fn explore(&mut self, from: usize, seconds: u64) -> bool {
        let constraints = self.constraints;
        if self.current.len() == constraints.size {
            return constraints.reaches_min(seconds);
        }
        let needed = constraints.size - self.current.len();
        if self.order.len() - from < needed {
            return false;
        }
        // Every remaining song together still falls short
        if !constraints.reaches_min(seconds + self.suffix[from]) {
            return false;
        }

        let candidates = self.candidates;
        for pos in from..self.order.len() {
            if self.steps >= self.max_steps {
                self.exhausted = true;
                return false;
            }
            self.steps += 1;

            let song = &candidates[self.order[pos]];
            let artist = song.artist.as_str();
            if constraints.unique_artist && self.artists.contains(artist) {
                continue;
            }
            let next = seconds + song.seconds();
            if constraints.exceeds_max(next) {
                continue;
            }

            self.current.push(self.order[pos]);
            if constraints.unique_artist {
                self.artists.insert(artist);
            }
            if self.explore(pos + 1, next) {
                return true;
            }
            self.current.pop();
            if constraints.unique_artist {
                self.artists.remove(artist);
            }
            if self.exhausted {
                return false;
            }
        }
        false
    }
}

/// Builds playlists from the store
pub struct PlaylistService<'a> {
    store: &'a dyn GraphStore,
    config: &'a EngineConfig,
}

impl<'a> PlaylistService<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// A playlist from the user's listened songs, or `None` when nothing fits
    #[tracing::instrument(skip(self, constraints), fields(size = constraints.size, unique_artist = constraints.unique_artist))]
    pub fn generate(&self, user: &str, constraints: &PlaylistConstraints) -> Result<Option<Playlist>> {
        let user = require_user(user)?;
        constraints.validate()?;

        let cfg: &PlaylistConfig = &self.config.playlist;
        let candidates = self.candidates(user, constraints.size.saturating_mul(cfg.candidate_factor))?;
        tracing::debug!(candidates = candidates.len(), "playlist candidates");
        if candidates.is_empty() {
            return Ok(None);
        }

        Ok(generate(&candidates, constraints, cfg.max_steps)
            .map(|chosen| Playlist::from_selection(&candidates, chosen)))
    }

    fn candidates(&self, user: &str, limit: usize) -> Result<Vec<PlaylistSong>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.store.query(
            queries::PLAYLIST_CANDIDATES,
            &[(":user", Value::text(user)), (":limit", Value::Integer(limit))],
        )?;

        let mut candidates = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(id) = row.opt_text("id")?.map(|id| id.trim().to_string()) else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            let title = non_blank(row.opt_text("title")?).unwrap_or_else(|| id.clone());
            let artist =
                non_blank(row.opt_text("artist")?).unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
            // negative lengths are treated as unknown
            let duration = row
                .opt_integer("duration")?
                .and_then(|d| u32::try_from(d).ok());
            candidates.push(PlaylistSong {
                id,
                title,
                artist,
                duration,
                popularity: row.integer("popularity")?,
            });
        }
        Ok(candidates)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seeded_store, FailingStore};

    fn song(id: &str, artist: &str, duration: u32, popularity: i64) -> PlaylistSong {
        PlaylistSong {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: artist.to_string(),
            duration: Some(duration),
            popularity,
        }
    }

    fn catalogue() -> Vec<PlaylistSong> {
        vec![
            song("quiet", "X", 100, 1),
            song("hit", "A", 200, 90),
            song("single", "A", 150, 80),
            song("deep", "B", 300, 50),
            song("b-side", "C", 120, 40),
        ]
    }

    fn picked(candidates: &[PlaylistSong], chosen: &[usize]) -> Vec<String> {
        chosen.iter().map(|&i| candidates[i].id.clone()).collect()
    }

    #[test]
    fn test_most_popular_first() {
        let c = catalogue();
        let chosen = generate(&c, &PlaylistConstraints::new(2).with_unique_artist(false), 1000).unwrap();
        assert_eq!(picked(&c, &chosen), vec!["hit", "single"]);
    }

    #[test]
    fn test_unique_artist_skips_repeats() {
        let c = catalogue();
        let chosen = generate(&c, &PlaylistConstraints::new(3), 1000).unwrap();
        assert_eq!(picked(&c, &chosen), vec!["hit", "deep", "b-side"]);
    }

    #[test]
    fn test_max_duration() {
        let c = catalogue();
        let constraints = PlaylistConstraints::new(2).with_max_duration(Some(320));
        let chosen = generate(&c, &constraints, 1000).unwrap();
        // hit + deep is 500s; hit + b-side is the first pair that fits
        assert_eq!(picked(&c, &chosen), vec!["hit", "b-side"]);

        let constraints = PlaylistConstraints::new(2).with_max_duration(Some(300));
        let chosen = generate(&c, &constraints, 1000).unwrap();
        assert_eq!(picked(&c, &chosen), vec!["hit", "quiet"]);
    }

    #[test]
    fn test_min_duration() {
        let c = catalogue();
        let constraints = PlaylistConstraints::new(2).with_min_duration(Some(450));
        let chosen = generate(&c, &constraints, 1000).unwrap();
        assert_eq!(picked(&c, &chosen), vec!["hit", "deep"]);

        let constraints = PlaylistConstraints::new(2).with_min_duration(Some(10_000));
        assert_eq!(generate(&c, &constraints, 1000), None);
    }

    #[test]
    fn test_unknown_duration_counts_as_zero() {
        let mut c = catalogue();
        c[1].duration = None;
        let constraints = PlaylistConstraints::new(2).with_max_duration(Some(120));
        let chosen = generate(&c, &constraints, 1000).unwrap();
        assert_eq!(picked(&c, &chosen), vec!["hit", "b-side"]);
    }

    #[test]
    fn test_not_enough_candidates() {
        let c = catalogue();
        assert_eq!(generate(&c, &PlaylistConstraints::new(6), 1000), None);
        // only four distinct artists
        assert_eq!(generate(&c, &PlaylistConstraints::new(5), 1000), None);
    }

    #[test]
    fn test_step_limit() {
        let c = catalogue();
        assert_eq!(generate(&c, &PlaylistConstraints::new(3), 1), None);
        assert!(generate(&c, &PlaylistConstraints::new(1), 1).is_some());
    }

    #[test]
    fn test_constraints_builder() {
        let constraints = PlaylistConstraints::new(3)
            .with_min_duration(Some(0))
            .with_max_duration(Some(600));
        assert_eq!(constraints.min_duration, None);
        assert_eq!(constraints.max_duration, Some(600));
        assert!(constraints.unique_artist);
        assert!(constraints.validate().is_ok());

        assert!(PlaylistConstraints::new(0).validate().is_err());
        let inverted = PlaylistConstraints::new(2)
            .with_min_duration(Some(600))
            .with_max_duration(Some(300));
        assert!(matches!(inverted.validate(), Err(RecoError::InvalidValue { .. })));
    }

    #[test]
    fn test_service_generate() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = PlaylistService::new(&store, &config);

        // bob listened to s1 (7 plays overall), s3 (6) and s2 (4)
        let playlist = service
            .generate("bob", &PlaylistConstraints::new(2))
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = playlist.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
        assert_eq!(playlist.size, 2);
        assert_eq!(playlist.total_duration, 440);
        assert_eq!(playlist.songs[0].popularity, 7);
    }

    #[test]
    fn test_service_artist_and_length_limits() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = PlaylistService::new(&store, &config);

        // s1 and s2 share an artist
        assert_eq!(service.generate("bob", &PlaylistConstraints::new(3)).unwrap(), None);
        let open = PlaylistConstraints::new(3).with_unique_artist(false);
        assert_eq!(service.generate("bob", &open).unwrap().unwrap().total_duration, 620);

        let short = PlaylistConstraints::new(2)
            .with_unique_artist(false)
            .with_max_duration(Some(400));
        let playlist = service.generate("bob", &short).unwrap().unwrap();
        let ids: Vec<&str> = playlist.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_service_unknown_length_and_empty_history() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = PlaylistService::new(&store, &config);

        let playlist = service
            .generate("dave", &PlaylistConstraints::new(2))
            .unwrap()
            .unwrap();
        assert_eq!(playlist.songs[1].id, "s4");
        assert_eq!(playlist.songs[1].duration, None);
        assert_eq!(playlist.total_duration, 300);

        assert_eq!(service.generate("erin", &PlaylistConstraints::new(1)).unwrap(), None);
    }

    #[test]
    fn test_service_caller_errors() {
        let store = seeded_store();
        let config = EngineConfig::default();
        let service = PlaylistService::new(&store, &config);
        assert!(matches!(
            service.generate(" ", &PlaylistConstraints::new(2)),
            Err(RecoError::MissingIdentifier { .. })
        ));
        assert!(matches!(
            service.generate("bob", &PlaylistConstraints::new(0)),
            Err(RecoError::InvalidValue { .. })
        ));

        let err = PlaylistService::new(&FailingStore, &config)
            .generate("bob", &PlaylistConstraints::new(2))
            .unwrap_err();
        assert!(matches!(err, RecoError::Store(_)));
    }
}
