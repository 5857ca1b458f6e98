//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use millionaire_engine::{validate, GameConfig, PrizeLadder, QuestionSet, RawQuestion};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install a test subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Correct answer text for question `i`.
pub fn right(i: usize) -> String {
    format!("right {i}")
}

/// A wrong answer text for question `i`.
pub fn wrong(i: usize) -> String {
    format!("wrong A {i}")
}

/// Raw questions where option 0 is always correct.
pub fn raw_questions(n: usize) -> Vec<RawQuestion> {
    (0..n)
        .map(|i| {
            RawQuestion::new(
                format!("Question {i}?"),
                [right(i), wrong(i), format!("wrong B {i}"), format!("wrong C {i}")],
                right(i),
            )
        })
        .collect()
}

pub fn question_set(n: usize) -> QuestionSet {
    validate(raw_questions(n), n).expect("fixture questions are valid")
}

/// Classic 15-tier configuration.
pub fn classic_config() -> GameConfig {
    GameConfig::default()
}

/// Three tiers, safe haven on the middle one.
pub fn short_config() -> GameConfig {
    let ladder = PrizeLadder::new(vec![300, 1_000, 5_000], vec![1]).expect("valid ladder");
    GameConfig::default().with_ladder(ladder)
}
