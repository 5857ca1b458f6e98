//! JSON file result store.
//!
//! Layout: `<dir>/stats_<user>.json`, each holding
//! `{"millionaire_results": [PlayerRecord, ...]}` newest first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{GameConfig, UserId, DEFAULT_HISTORY_LIMIT};
use crate::error::PersistenceError;

use super::{merge_history, PlayerRecord, ResultSink};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StatsDocument {
    #[serde(default)]
    millionaire_results: Vec<PlayerRecord>,
}

/// Stores each user's history as a JSON document in `dir`.
#[derive(Clone, Debug)]
pub struct JsonFileResultStore {
    dir: PathBuf,
    cap: usize,
}

impl JsonFileResultStore {
    /// Store documents under `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cap: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Store documents under `dir`, capped at the config's `history_limit`.
    pub fn from_config(dir: impl Into<PathBuf>, config: &GameConfig) -> Self {
        Self::new(dir).with_cap(config.history_limit)
    }

    /// Keep at most `cap` records per user.
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document path for `user`. Ids must be `[A-Za-z0-9_-]+` so they cannot
    /// escape the store directory.
    pub fn path_for(&self, user: &UserId) -> Result<PathBuf, PersistenceError> {
        let id = user.as_str();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::InvalidUser(id.to_string()));
        }
        Ok(self.dir.join(format!("stats_{id}.json")))
    }

    fn load(&self, path: &Path) -> Vec<PlayerRecord> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Result history unreadable; starting empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<StatsDocument>(&text) {
            Ok(doc) => doc.millionaire_results,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Result history corrupt; starting empty"
                );
                Vec::new()
            }
        }
    }
}

impl ResultSink for JsonFileResultStore {
    fn record(
        &mut self,
        user: &UserId,
        records: &[PlayerRecord],
    ) -> Result<(), PersistenceError> {
        let path = self.path_for(user)?;
        let existing = self.load(&path);
        let doc = StatsDocument {
            millionaire_results: merge_history(records, existing, self.cap),
        };

        fs::create_dir_all(&self.dir)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(&doc)?)?;
        fs::rename(&staging, &path)?;

        debug!(
            user = %user,
            kept = doc.millionaire_results.len(),
            path = %path.display(),
            "Results written"
        );
        Ok(())
    }

    fn history(&self, user: &UserId) -> Result<Vec<PlayerRecord>, PersistenceError> {
        let path = self.path_for(user)?;
        Ok(self.load(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TerminalReason;

    fn record(name: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            prize: 500,
            reason: TerminalReason::WalkedAway,
            questions_answered: 4,
            lifelines_used: 2,
        }
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileResultStore::new(dir.path().join("stats"));
        let user = UserId::new("ada_01");

        store.record(&user, &[record("Ada")]).unwrap();
        store.record(&user, &[record("Bob")]).unwrap();

        let names: Vec<_> = store.history(&user).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Bob", "Ada"]);
        assert!(dir.path().join("stats").join("stats_ada_01.json").exists());
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileResultStore::new(dir.path());

        for id in ["", "../etc", "a/b", "space id"] {
            let err = store.record(&UserId::new(id), &[record("x")]).unwrap_err();
            assert!(matches!(err, PersistenceError::InvalidUser(_)), "{id:?}");
        }
    }

    #[test]
    fn test_corrupt_document_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileResultStore::new(dir.path());
        let user = UserId::new("ada");
        fs::write(store.path_for(&user).unwrap(), "{ not json").unwrap();

        assert!(store.history(&user).unwrap().is_empty());

        store.record(&user, &[record("Ada")]).unwrap();
        assert_eq!(store.history(&user).unwrap().len(), 1);
    }

    #[test]
    fn test_cap_applies() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::default().with_history_limit(3);
        let mut store = JsonFileResultStore::from_config(dir.path(), &config);
        let user = UserId::new("ada");

        store.record(&user, &[record("a"), record("b")]).unwrap();
        store.record(&user, &[record("c"), record("d")]).unwrap();

        let names: Vec<_> = store.history(&user).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "d", "a"]);
    }
}
