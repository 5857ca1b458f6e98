//! # millionaire-engine
//!
//! A turn-based trivia engine for the "Who Wants to Be a Millionaire" format.
//!
//! ## Design Principles
//!
//! 1. **Explicit State Machines**: Each player's progression is a
//!    `TurnEngine` with absorbing terminal states. Illegal calls are rejected
//!    without touching state.
//!
//! 2. **Sequential Turns**: A `Session` owns one engine per player and hands
//!    out only the active one. `advance()` is the sole way to move on.
//!
//! 3. **Providers at the Edges**: Question content, lifeline advice and result
//!    storage are traits. The engine works offline with the bundled
//!    implementations and degrades gracefully when a provider is missing.
//!
//! ## Scoring
//!
//! - **Wrong answer**: fall back to the highest safe haven strictly below the
//!   current question.
//! - **Walk away**: keep the tier of the last fully answered question.
//!
//! The two are deliberately different computations.
//!
//! ## Modules
//!
//! - `core`: Player ids and records, RNG, configuration
//! - `ladder`: Prize table and safe-haven lookup
//! - `content`: Questions, provider parsing and validation
//! - `lifelines`: Fifty-fifty, audience poll, phone advice
//! - `turn`: Per-player state machine
//! - `session`: Turn order, aggregation, result emission
//! - `persistence`: Bounded per-user result history

pub mod error;
pub mod core;
pub mod ladder;
pub mod content;
pub mod lifelines;
pub mod turn;
pub mod session;
pub mod persistence;

// Re-export commonly used types
pub use crate::error::{
    AdviceError, ConfigError, ContentError, ContentShapeError, LadderError, LifelineError,
    PersistenceError, SessionError, TurnError,
};

pub use crate::core::{
    GameConfig, GameRng, Player, PlayerId, PlayerOutcome, TerminalReason, UserId,
};

pub use crate::ladder::{Prize, PrizeLadder};

pub use crate::content::{
    parse_provider_output, validate, QuestionSet, Question, QuizContentProvider, RawQuestion,
    StaticContentProvider,
};

pub use crate::lifelines::{
    parse_audience_poll, use_lifeline, AdviceProvider, AdviceReply, AdviceRequest, AudienceVote,
    LifelineKind, LifelineOutcome, Lifelines, SimulatedAdvisor,
};

pub use crate::turn::{LifelineTicket, Resolution, Submission, TurnEngine, TurnState};

pub use crate::session::{Advance, Session, SessionPhase, SessionResult, SessionSetup, Standing};

pub use crate::persistence::{
    merge_history, JsonFileResultStore, MemoryResultStore, PlayerRecord, ResultSink,
};
