//! Error taxonomy for the engine.
//!
//! Each failure domain gets its own enum:
//!
//! - `ContentShapeError`: malformed or undersized question sets (fatal to setup)
//! - `LadderError`: ladder construction and out-of-range tier access
//! - `LifelineError` / `TurnError`: rejected lifeline and state-machine calls
//! - `ConfigError`: inconsistent configuration documents
//! - `SessionError`: setup validation and orchestration misuse
//! - `AdviceError` / `ContentError`: provider failures
//! - `PersistenceError`: result storage failures
//!
//! Rejected calls never mutate state. Provider failures during a lifeline are
//! not errors at the engine level; they become an advisory outcome.

use thiserror::Error;

use crate::core::PlayerId;
use crate::lifelines::LifelineKind;

/// Prize ladder errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    /// Tier index outside the ladder. Indicates a caller defect.
    #[error("tier index {index} is outside a ladder of {len} tiers")]
    OutOfRange { index: usize, len: usize },

    /// A ladder needs at least one tier.
    #[error("prize ladder has no tiers")]
    Empty,

    /// Tier values must strictly increase.
    #[error("tier {index} is not greater than the tier below it")]
    NotIncreasing { index: usize },

    /// Safe-haven indices must strictly increase and stay inside the ladder.
    #[error("safe haven index {index} is out of order or out of range")]
    InvalidSafeHaven { index: usize },
}

/// The question set does not have the shape the turn engine expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentShapeError {
    #[error("expected {expected} questions, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },

    #[error("question {index} has {count} options, expected {expected}")]
    OptionCount { index: usize, count: usize, expected: usize },

    #[error("question {index} has an empty option")]
    EmptyOption { index: usize },

    #[error("question {index} repeats option {option:?}")]
    DuplicateOption { index: usize, option: String },

    #[error("question {index}: correct answer {answer:?} is not one of the options")]
    CorrectAnswerMissing { index: usize, answer: String },

    /// Provider output could not be parsed at all.
    #[error("malformed question payload: {0}")]
    Malformed(String),
}

/// Lifeline errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifelineError {
    #[error("lifeline {0} has already been used")]
    AlreadyUsed(LifelineKind),
}

/// Turn engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The call is not legal in the current state.
    #[error("{operation} is not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },

    /// A lifeline request for this question has not completed yet.
    #[error("lifeline {0} is still pending for the current question")]
    LifelinePending(LifelineKind),

    /// The choice is not a selectable option of the current question.
    #[error("{0:?} is not a selectable option")]
    InvalidChoice(String),

    #[error(transparent)]
    Lifeline(#[from] LifelineError),

    #[error(transparent)]
    Ladder(#[from] LadderError),
}

/// Advice provider failures. Always surfaced as advisory messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviceError {
    /// No provider configured, or missing credential.
    #[error("advice unavailable: {0}")]
    Unavailable(String),

    /// The provider was reached but the request failed.
    #[error("advice request failed: {0}")]
    Failed(String),
}

/// Quiz content provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("quiz content unavailable: {0}")]
    Unavailable(String),

    #[error("quiz content request failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Shape(#[from] ContentShapeError),
}

/// Result storage failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid user id {0:?}")]
    InvalidUser(String),

    #[error("result store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("result store serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player bounds {min}..={max} are invalid")]
    PlayerBounds { min: usize, max: usize },

    #[error("result history limit must be at least 1")]
    ZeroHistoryLimit,

    #[error("config document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session setup and orchestration errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("player {index} has an empty name")]
    EmptyPlayerName { index: usize },

    #[error("quiz topic is empty")]
    EmptyTopic,

    /// `advance()` was called while the active player is still playing.
    #[error("cannot advance: {active} has not finished")]
    PrematureAdvance { active: PlayerId },

    /// Every player is terminal and results have been emitted.
    #[error("session has already finished")]
    SessionFinished,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    ContentShape(#[from] ContentShapeError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
