//! In-process result store.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{GameConfig, UserId, DEFAULT_HISTORY_LIMIT};
use crate::error::PersistenceError;

use super::{merge_history, PlayerRecord, ResultSink};

/// Keeps each user's history in a persistent vector.
///
/// `snapshot` hands out structural-sharing copies, so readers never block or
/// observe a half-written merge.
#[derive(Clone, Debug)]
pub struct MemoryResultStore {
    histories: FxHashMap<UserId, Vector<PlayerRecord>>,
    cap: usize,
}

impl Default for MemoryResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryResultStore {
    /// Create an empty store keeping at most `cap` records per user.
    pub fn new(cap: usize) -> Self {
        Self {
            histories: FxHashMap::default(),
            cap,
        }
    }

    /// Create an empty store capped at the config's `history_limit`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.history_limit)
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Cheap copy of a user's history.
    #[must_use]
    pub fn snapshot(&self, user: &UserId) -> Vector<PlayerRecord> {
        self.histories.get(user).cloned().unwrap_or_default()
    }

    /// Number of users with stored history.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.histories.len()
    }
}

impl ResultSink for MemoryResultStore {
    fn record(
        &mut self,
        user: &UserId,
        records: &[PlayerRecord],
    ) -> Result<(), PersistenceError> {
        let existing = self.snapshot(user);
        let merged: Vector<PlayerRecord> =
            merge_history(records, existing, self.cap).into_iter().collect();

        debug!(user = %user, added = records.len(), kept = merged.len(), "Results recorded");
        self.histories.insert(user.clone(), merged);
        Ok(())
    }

    fn history(&self, user: &UserId) -> Result<Vec<PlayerRecord>, PersistenceError> {
        Ok(self.snapshot(user).into_iter().collect())
    }
}
