//! Game configuration.
//!
//! `GameConfig::default()` is the classic game: 15-tier ladder with safe
//! havens at 1 000 and 32 000, 1-4 players, 20 stored results per user.
//! Configs can be built with `with_*` methods or loaded from JSON; missing
//! fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ladder::PrizeLadder;

/// Default lower bound on players per session.
pub const DEFAULT_MIN_PLAYERS: usize = 1;

/// Default upper bound on players per session.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Default number of results kept per user.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Prize ladder. Its length is the number of questions per session.
    pub ladder: PrizeLadder,

    /// Fewest players a session may start with.
    pub min_players: usize,

    /// Most players a session may start with.
    pub max_players: usize,

    /// Results kept per user by stores built with `from_config`.
    pub history_limit: usize,

    /// Shuffle each question's options once at setup.
    pub shuffle_options: bool,

    /// Seed for every random decision in the session.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ladder: PrizeLadder::classic(),
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            shuffle_options: false,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create the classic configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Use a custom prize ladder.
    #[must_use]
    pub fn with_ladder(mut self, ladder: PrizeLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Set the allowed player count range.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the number of results kept per user.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Shuffle answer options at setup.
    #[must_use]
    pub fn with_shuffled_options(mut self) -> Self {
        self.shuffle_options = true;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of questions each player faces.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.ladder.len()
    }

    /// Check that the bounds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(ConfigError::PlayerBounds {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }
}
