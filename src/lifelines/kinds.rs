//! Lifeline kinds and per-player availability.

use serde::{Deserialize, Serialize};

use crate::error::LifelineError;

use super::advice::AdviceKind;

/// The three lifeline types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifelineKind {
    FiftyFifty,
    AskAudience,
    PhoneFriend,
}

impl LifelineKind {
    pub const ALL: [LifelineKind; 3] = [
        LifelineKind::FiftyFifty,
        LifelineKind::AskAudience,
        LifelineKind::PhoneFriend,
    ];

    /// Which provider request backs this lifeline, if any.
    #[must_use]
    pub const fn advice_kind(self) -> Option<AdviceKind> {
        match self {
            LifelineKind::FiftyFifty => None,
            LifelineKind::AskAudience => Some(AdviceKind::AudiencePoll),
            LifelineKind::PhoneFriend => Some(AdviceKind::PhoneFriend),
        }
    }
}

impl std::fmt::Display for LifelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LifelineKind::FiftyFifty => "50:50",
            LifelineKind::AskAudience => "Ask the Audience",
            LifelineKind::PhoneFriend => "Phone a Friend",
        };
        f.write_str(label)
    }
}

/// Availability flags. Each starts `true` and flips to `false` exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifelines {
    fifty_fifty: bool,
    ask_audience: bool,
    phone_friend: bool,
}

impl Default for Lifelines {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifelines {
    /// All three available.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fifty_fifty: true,
            ask_audience: true,
            phone_friend: true,
        }
    }

    #[must_use]
    pub fn is_available(&self, kind: LifelineKind) -> bool {
        match kind {
            LifelineKind::FiftyFifty => self.fifty_fifty,
            LifelineKind::AskAudience => self.ask_audience,
            LifelineKind::PhoneFriend => self.phone_friend,
        }
    }

    /// Mark a lifeline used. Fails without mutation if it already was.
    pub fn consume(&mut self, kind: LifelineKind) -> Result<(), LifelineError> {
        let flag = match kind {
            LifelineKind::FiftyFifty => &mut self.fifty_fifty,
            LifelineKind::AskAudience => &mut self.ask_audience,
            LifelineKind::PhoneFriend => &mut self.phone_friend,
        };
        if !*flag {
            return Err(LifelineError::AlreadyUsed(kind));
        }
        *flag = false;
        Ok(())
    }

    /// Lifelines still available, in display order.
    pub fn remaining(&self) -> impl Iterator<Item = LifelineKind> + '_ {
        LifelineKind::ALL.into_iter().filter(|&k| self.is_available(k))
    }

    /// Number of lifelines already used.
    #[must_use]
    pub fn used_count(&self) -> usize {
        LifelineKind::ALL.len() - self.remaining().count()
    }
}
