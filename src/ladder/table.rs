//! Prize table implementation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::LadderError;

/// Monetary amount in whole currency units.
pub type Prize = u64;

/// The classic 15-tier table.
#[rustfmt::skip]
pub const CLASSIC_TIERS: [Prize; 15] = [
    100, 200, 300, 500, 1_000,
    2_000, 4_000, 8_000, 16_000, 32_000,
    64_000, 125_000, 250_000, 500_000, 1_000_000,
];

/// Safe havens of the classic table (1 000 and 32 000).
pub const CLASSIC_SAFE_HAVENS: [usize; 2] = [4, 9];

/// Serialized form, validated on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct LadderDocument {
    tiers: Vec<Prize>,
    #[serde(default)]
    safe_havens: Vec<usize>,
}

/// Ordered, strictly increasing prize tiers with marked safe havens.
///
/// Immutable once built. All lookups are pure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LadderDocument", into = "LadderDocument")]
pub struct PrizeLadder {
    tiers: Vec<Prize>,
    /// Strictly increasing tier indices.
    safe_havens: SmallVec<[usize; 4]>,
}

impl PrizeLadder {
    /// Build a ladder, checking the table invariants.
    pub fn new(tiers: Vec<Prize>, safe_havens: Vec<usize>) -> Result<Self, LadderError> {
        if tiers.is_empty() {
            return Err(LadderError::Empty);
        }
        if let Some(index) = (1..tiers.len()).find(|&i| tiers[i] <= tiers[i - 1]) {
            return Err(LadderError::NotIncreasing { index });
        }

        let mut previous: Option<usize> = None;
        for &index in &safe_havens {
            let out_of_order = previous.is_some_and(|p| index <= p);
            if out_of_order || index >= tiers.len() {
                return Err(LadderError::InvalidSafeHaven { index });
            }
            previous = Some(index);
        }

        Ok(Self {
            tiers,
            safe_havens: SmallVec::from_vec(safe_havens),
        })
    }

    /// The classic table: 100 to 1 000 000, havens at 1 000 and 32 000.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            tiers: CLASSIC_TIERS.to_vec(),
            safe_havens: SmallVec::from_slice(&CLASSIC_SAFE_HAVENS),
        }
    }

    /// Number of tiers (= questions per player).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false for a constructed ladder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Index of the top tier.
    #[must_use]
    pub fn top_index(&self) -> usize {
        self.tiers.len() - 1
    }

    /// All tier values in order.
    #[must_use]
    pub fn tiers(&self) -> &[Prize] {
        &self.tiers
    }

    /// Safe-haven tier indices in order.
    #[must_use]
    pub fn safe_havens(&self) -> &[usize] {
        &self.safe_havens
    }

    /// Prize for tier `index`.
    pub fn prize_at(&self, index: usize) -> Result<Prize, LadderError> {
        self.tiers.get(index).copied().ok_or(LadderError::OutOfRange {
            index,
            len: self.tiers.len(),
        })
    }

    #[must_use]
    pub fn is_safe_haven(&self, index: usize) -> bool {
        self.safe_havens.binary_search(&index).is_ok()
    }

    /// Prize kept after a wrong answer on question `index`.
    ///
    /// Highest safe-haven tier at or below `index - 1`, or 0 when none has
    /// been passed. Indices past the top are treated as "every tier passed".
    #[must_use]
    pub fn safe_haven_floor(&self, index: usize) -> Prize {
        self.safe_havens
            .iter()
            .rev()
            .find(|&&haven| haven < index)
            .map_or(0, |&haven| self.tiers[haven])
    }

    /// Prize kept when walking away before answering question `index`.
    ///
    /// The tier of the last fully answered question, or 0 at index 0.
    #[must_use]
    pub fn secured_prize(&self, index: usize) -> Prize {
        match index {
            0 => 0,
            i => self.tiers[(i - 1).min(self.top_index())],
        }
    }
}

impl Default for PrizeLadder {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<LadderDocument> for PrizeLadder {
    type Error = LadderError;

    fn try_from(doc: LadderDocument) -> Result<Self, Self::Error> {
        Self::new(doc.tiers, doc.safe_havens)
    }
}

impl From<PrizeLadder> for LadderDocument {
    fn from(ladder: PrizeLadder) -> Self {
        Self {
            tiers: ladder.tiers,
            safe_havens: ladder.safe_havens.into_vec(),
        }
    }
}
