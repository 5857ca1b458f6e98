//! Quiz content: question types, provider trait, and the adapter that turns
//! untrusted provider output into a validated `QuestionSet`.
//!
//! ## Example
//!
//! ```
//! use millionaire_engine::content::{validate, RawQuestion};
//!
//! let raw = vec![RawQuestion::new("2+2?", ["3", "4", "5", "6"], "4")];
//! let set = validate(raw, 1).unwrap();
//! assert_eq!(set.get(0).unwrap().correct_index(), 1);
//! ```

mod adapter;
mod provider;
mod question;

pub(crate) use adapter::strip_code_fence;
pub use adapter::{parse_provider_output, validate};
pub use provider::{QuizContentProvider, StaticContentProvider};
pub use question::{Question, QuestionSet, RawQuestion, OPTION_COUNT};
