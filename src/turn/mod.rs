//! Per-player turn state machine.
//!
//! ## States
//!
//! ```text
//! AwaitingAnswer(i) --submit--> Resolving(i)
//! Resolving(i) --correct, i < top--> AwaitingAnswer(i + 1)
//! Resolving(i) --correct, i == top--> Terminal(Won, prize(top))
//! Resolving(i) --wrong--> Terminal(WrongAnswer, safe-haven floor below i)
//! AwaitingAnswer(i) --walk away--> Terminal(WalkedAway, prize(i - 1) or 0)
//! ```
//!
//! Lifelines are taken from `AwaitingAnswer` and do not change the state.
//! Provider-backed lifelines can run in two phases (`begin_lifeline`, then
//! `complete_lifeline` or `discard_lifeline`); while one is pending the
//! player cannot answer or walk away.
//!
//! `Terminal` is absorbing: every operation on a finished turn is rejected
//! with `TurnError::InvalidState`.

mod engine;

pub use engine::{LifelineTicket, Resolution, Submission, TurnEngine, TurnState};
