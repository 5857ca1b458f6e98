//! Provider output parsing and validation.
//!
//! Content providers are free-text sources, so their output is treated as
//! untrusted: parse it, trim it, and check every invariant once before a
//! session exists. The turn engine never re-validates.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::ContentShapeError;

use super::question::{Question, QuestionSet, RawQuestion, OPTION_COUNT};

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(\w*)?\s*\n?(.*?)\n?\s*```").expect("fence pattern is valid")
    })
}

/// The body of the first markdown code fence in `text`, or the whole
/// trimmed text when there is none.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(2))
        .map_or(trimmed, |m| m.as_str().trim())
}

/// Parse a provider's text payload into raw questions.
///
/// Accepts a bare JSON array or one wrapped in a markdown code fence.
pub fn parse_provider_output(text: &str) -> Result<Vec<RawQuestion>, ContentShapeError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(ContentShapeError::Malformed("empty payload".to_string()));
    }

    serde_json::from_str(payload).map_err(|e| ContentShapeError::Malformed(e.to_string()))
}

/// Check and normalize a raw batch into a question set of exactly `expected`
/// questions.
pub fn validate(raw: Vec<RawQuestion>, expected: usize) -> Result<QuestionSet, ContentShapeError> {
    if raw.len() != expected {
        return Err(ContentShapeError::WrongCount {
            expected,
            actual: raw.len(),
        });
    }

    let questions = raw
        .into_iter()
        .enumerate()
        .map(|(index, question)| validate_question(index, question))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionSet::new(questions))
}

fn validate_question(index: usize, raw: RawQuestion) -> Result<Question, ContentShapeError> {
    let prompt = raw.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(ContentShapeError::EmptyPrompt { index });
    }

    let options: Vec<String> = raw.options.iter().map(|o| o.trim().to_string()).collect();
    let count = options.len();
    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|_| ContentShapeError::OptionCount {
            index,
            count,
            expected: OPTION_COUNT,
        })?;

    let mut seen = FxHashSet::default();
    for option in &options {
        if option.is_empty() {
            return Err(ContentShapeError::EmptyOption { index });
        }
        if !seen.insert(option.as_str()) {
            return Err(ContentShapeError::DuplicateOption {
                index,
                option: option.clone(),
            });
        }
    }

    let answer = raw.correct_answer.trim();
    let correct = options
        .iter()
        .position(|o| o == answer)
        .ok_or_else(|| ContentShapeError::CorrectAnswerMissing {
            index,
            answer: answer.to_string(),
        })?;

    Ok(Question::from_parts(prompt, options, correct))
}
