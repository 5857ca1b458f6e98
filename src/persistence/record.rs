//! Stored player records and the sink contract.

use serde::{Deserialize, Serialize};

use crate::core::{Player, TerminalReason, UserId};
use crate::error::PersistenceError;
use crate::ladder::Prize;

/// A finished player's result as stored in history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub prize: Prize,
    pub reason: TerminalReason,
    pub questions_answered: usize,
    pub lifelines_used: usize,
}

impl PlayerRecord {
    /// Snapshot a terminal player. `None` while the player is still playing.
    #[must_use]
    pub fn from_player(player: &Player) -> Option<Self> {
        let outcome = player.outcome()?;
        Some(Self {
            name: player.name().to_string(),
            prize: outcome.prize,
            reason: outcome.reason,
            questions_answered: outcome.questions_answered,
            lifelines_used: player.lifelines().used_count(),
        })
    }
}

/// Put `new` ahead of `existing` and keep the first `cap` records.
///
/// ```
/// use millionaire_engine::persistence::{merge_history, PlayerRecord};
/// use millionaire_engine::TerminalReason;
///
/// let record = |name: &str| PlayerRecord {
///     name: name.to_string(),
///     prize: 0,
///     reason: TerminalReason::WalkedAway,
///     questions_answered: 0,
///     lifelines_used: 0,
/// };
///
/// let merged = merge_history(&[record("new")], vec![record("a"), record("b")], 2);
/// let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["new", "a"]);
/// ```
pub fn merge_history<I>(new: &[PlayerRecord], existing: I, cap: usize) -> Vec<PlayerRecord>
where
    I: IntoIterator<Item = PlayerRecord>,
{
    new.iter().cloned().chain(existing).take(cap).collect()
}

/// Destination for finished sessions.
pub trait ResultSink {
    /// Merge `records` into the user's history.
    fn record(
        &mut self,
        user: &UserId,
        records: &[PlayerRecord],
    ) -> Result<(), PersistenceError>;

    /// The user's history, newest first. Empty for unknown users.
    fn history(&self, user: &UserId) -> Result<Vec<PlayerRecord>, PersistenceError>;
}
