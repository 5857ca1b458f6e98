//! Lifelines: one-shot assists owned by each player.
//!
//! ## Kinds
//!
//! - **50:50**: removes two incorrect options. Computed locally, never
//!   removes the correct answer.
//! - **Ask the Audience**: a vote distribution from the advice provider.
//! - **Phone a Friend**: free-text advice from the advice provider.
//!
//! ## Failure Policy
//!
//! A lifeline is consumed the moment it is used, whether or not the advice
//! provider answers. A missing or failing provider turns the result into
//! `LifelineOutcome::Unavailable` with a user-facing message; it never aborts
//! the game. Advice is only rendered, never used to decide correctness.

mod advice;
mod engine;
mod kinds;
mod outcome;
mod simulated;

pub use advice::{parse_audience_poll, AdviceKind, AdviceProvider, AdviceReply, AdviceRequest};
pub use engine::{consult, fifty_fifty, interpret_advice, use_lifeline};
pub use kinds::{LifelineKind, Lifelines};
pub use outcome::{AudienceVote, LifelineOutcome, OptionShare};
pub use simulated::SimulatedAdvisor;
