//! Multi-player sessions.
//!
//! ## Lifecycle
//!
//! 1. `Session::start` validates the setup, fetches and validates one
//!    question set, and creates a turn engine per player. All players share
//!    the questions and the ladder but keep their own cursor.
//! 2. The active player plays to a terminal outcome through
//!    `active_turn_mut` or the shortcuts on `Session`.
//! 3. `advance` activates the next unfinished player. After the last one it
//!    ranks everybody, writes the ranking to the result sink once, and moves
//!    the session to `Results`.
//!
//! ## Invariants
//!
//! - At most one player is active, and only it can be mutated.
//! - Turn order is fixed at setup.
//! - Terminal players are never touched again.

mod orchestrator;
mod setup;

pub use orchestrator::{Advance, Session, SessionPhase, SessionResult, Standing};
pub use setup::SessionSetup;
