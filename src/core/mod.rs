//! Core types: player ids and records, user ids, RNG, configuration.
//!
//! Everything above this module (ladder, lifelines, turns, sessions) builds on
//! these without adding game rules here.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{Player, PlayerId, PlayerOutcome, TerminalReason, UserId};
pub use rng::GameRng;
pub use config::{GameConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_PLAYERS, DEFAULT_MIN_PLAYERS};
