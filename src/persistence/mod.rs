//! Per-user result history.
//!
//! ## Policy
//!
//! A finished session hands its ordered player records to a `ResultSink`
//! under the owning user's id. The sink puts the new records in front of the
//! ones it already holds and keeps at most `cap` of them, so the oldest are
//! evicted first. Stores built with `from_config` take the cap from
//! `GameConfig::history_limit`, which defaults to 20.
//!
//! ## Stores
//!
//! - `MemoryResultStore`: in-process, backed by persistent vectors.
//! - `JsonFileResultStore`: one JSON document per user in a directory.

mod file;
mod memory;
mod record;

pub use file::JsonFileResultStore;
pub use memory::MemoryResultStore;
pub use record::{merge_history, PlayerRecord, ResultSink};
