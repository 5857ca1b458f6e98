//! What a lifeline produces.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kinds::LifelineKind;

/// One option's share of an audience vote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionShare {
    pub option: String,
    pub percent: f64,
}

/// An audience vote, ordered like the question's options.
///
/// `well_formed` records whether the provider honoured the contract: every
/// option present once, no unknown options, total of 100, correct option
/// strictly ahead. A malformed vote is still rendered as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudienceVote {
    pub shares: Vec<OptionShare>,
    pub well_formed: bool,
}

impl AudienceVote {
    /// Share for an option, if the provider reported one.
    #[must_use]
    pub fn percent_for(&self, option: &str) -> Option<f64> {
        self.shares.iter().find(|s| s.option == option).map(|s| s.percent)
    }
}

/// What a lifeline produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LifelineOutcome {
    /// Option indices removed from the current question.
    FiftyFifty { eliminated: SmallVec<[usize; 2]> },
    Audience(AudienceVote),
    Phone(String),
    /// The provider was missing or failed. The lifeline is still spent.
    Unavailable { kind: LifelineKind, message: String },
}

impl LifelineOutcome {
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LifelineOutcome::Unavailable { .. })
    }
}
