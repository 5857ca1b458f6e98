//! Prize ladder: the ordered stakes table and safe-haven lookup.
//!
//! Tier `i` is the prize for answering question `i` correctly. A subset of
//! tiers are safe havens: once a player has answered past one, a wrong answer
//! can no longer drop them below it.
//!
//! ```
//! use millionaire_engine::ladder::PrizeLadder;
//!
//! let ladder = PrizeLadder::classic();
//! assert_eq!(ladder.prize_at(4).unwrap(), 1_000);
//! assert!(ladder.is_safe_haven(4));
//!
//! // Wrong at question 5: keep the 1 000 haven.
//! assert_eq!(ladder.safe_haven_floor(5), 1_000);
//! // Walk away before question 5: keep tier 4.
//! assert_eq!(ladder.secured_prize(5), 1_000);
//! // Wrong at question 3: nothing secured.
//! assert_eq!(ladder.safe_haven_floor(3), 0);
//! assert_eq!(ladder.secured_prize(3), 300);
//! ```

mod table;

pub use table::{Prize, PrizeLadder, CLASSIC_SAFE_HAVENS, CLASSIC_TIERS};
