//! Engine configuration for recograph
//!
//! Configuration is read from a TOML file; every field has a default so an
//! empty or partial file is valid.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::Result;

pub use types::{EngineConfig, MarathonConfig, PlaylistConfig, RecommendConfig};

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Load configuration if a path is given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would make the algorithms meaningless
    pub fn validate(&self) -> Result<()> {
        if self.recommend.max_seeds == 0 {
            crate::bail_invalid!("recommend.max_seeds", 0);
        }
        if self.recommend.default_window < 0 {
            crate::bail_invalid!("recommend.default_window", self.recommend.default_window);
        }
        if !self.recommend.default_lambda.is_finite() || self.recommend.default_lambda < 0.0 {
            crate::bail_invalid!("recommend.default_lambda", self.recommend.default_lambda);
        }
        if self.marathon.queue_cap == 0 {
            crate::bail_invalid!("marathon.queue_cap", 0);
        }
        if self.marathon.max_minutes == 0 {
            crate::bail_invalid!("marathon.max_minutes", 0);
        }
        if self.playlist.candidate_factor == 0 {
            crate::bail_invalid!("playlist.candidate_factor", 0);
        }
        if self.playlist.max_steps == 0 {
            crate::bail_invalid!("playlist.max_steps", 0);
        }
        if !self.marathon.preferred_genre_boost.is_finite()
            || self.marathon.preferred_genre_boost <= 0.0
        {
            crate::bail_invalid!(
                "marathon.preferred_genre_boost",
                self.marathon.preferred_genre_boost
            );
        }
        Ok(())
    }
}
