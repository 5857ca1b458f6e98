//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Seat in turn order. Fixed at setup, never reordered.
//!
//! ## Player
//!
//! Name, secured tier cursor, lifelines and terminal outcome. A player is
//! mutated only by its own turn engine and is frozen once terminal.

use serde::{Deserialize, Serialize};

use crate::ladder::Prize;
use crate::lifelines::Lifelines;

/// Seat in turn order, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a session with `player_count` players.
    ///
    /// ```
    /// use millionaire_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Identifier of the account that owns a session's results.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a player's turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Answered the top question correctly.
    Won,
    /// Answered incorrectly; prize fell back to the safe-haven floor.
    WrongAnswer,
    /// Withdrew voluntarily; kept the last secured tier.
    WalkedAway,
}

impl std::fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TerminalReason::Won => "won",
            TerminalReason::WrongAnswer => "wrong answer",
            TerminalReason::WalkedAway => "walked away",
        };
        f.write_str(label)
    }
}

/// Frozen result of a finished turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub reason: TerminalReason,
    pub prize: Prize,
    /// Questions answered correctly before the turn ended.
    pub questions_answered: usize,
}

/// A contestant.
///
/// Starts with no tier secured and all lifelines available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    /// Index of the last correctly answered tier. `None` = nothing secured.
    secured_tier: Option<usize>,
    lifelines: Lifelines,
    outcome: Option<PlayerOutcome>,
}

impl Player {
    /// Create a player with session-start defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secured_tier: None,
            lifelines: Lifelines::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last correctly answered tier index, if any.
    #[must_use]
    pub fn secured_tier(&self) -> Option<usize> {
        self.secured_tier
    }

    /// Number of questions answered correctly so far.
    #[must_use]
    pub fn questions_answered(&self) -> usize {
        self.secured_tier.map_or(0, |tier| tier + 1)
    }

    #[must_use]
    pub fn lifelines(&self) -> &Lifelines {
        &self.lifelines
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&PlayerOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        self.outcome.map(|o| o.reason)
    }

    /// Final prize, or 0 while the player is still playing.
    #[must_use]
    pub fn final_prize(&self) -> Prize {
        self.outcome.map_or(0, |o| o.prize)
    }

    // === Turn engine mutation ===

    pub(crate) fn lifelines_mut(&mut self) -> &mut Lifelines {
        debug_assert!(!self.is_terminal(), "terminal players are frozen");
        &mut self.lifelines
    }

    pub(crate) fn secure_tier(&mut self, tier: usize) {
        debug_assert!(!self.is_terminal(), "terminal players are frozen");
        self.secured_tier = Some(tier);
    }

    pub(crate) fn freeze(&mut self, reason: TerminalReason, prize: Prize) -> PlayerOutcome {
        debug_assert!(!self.is_terminal(), "terminal players are frozen");
        let outcome = PlayerOutcome {
            reason,
            prize,
            questions_answered: self.questions_answered(),
        };
        self.outcome = Some(outcome);
        outcome
    }
}
