//! Quiz content providers.

use tracing::debug;

use crate::error::ContentError;

use super::adapter::parse_provider_output;
use super::question::RawQuestion;

/// A batch source of questions for a topic.
///
/// Implementations may be backed by anything (a generator service, a file,
/// a fixed list). Output is untrusted and goes through
/// [`validate`](super::validate) before use.
pub trait QuizContentProvider {
    /// Fetch `count` questions about `topic`, easiest first.
    fn fetch_questions(&self, topic: &str, count: usize) -> Result<Vec<RawQuestion>, ContentError>;
}

/// Serves the same fixed batch for every topic.
#[derive(Clone, Debug, Default)]
pub struct StaticContentProvider {
    questions: Vec<RawQuestion>,
}

impl StaticContentProvider {
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        Self { questions }
    }

    /// Build from provider-style text (JSON, optionally fenced).
    pub fn from_text(text: &str) -> Result<Self, ContentError> {
        Ok(Self::new(parse_provider_output(text)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuizContentProvider for StaticContentProvider {
    fn fetch_questions(&self, topic: &str, count: usize) -> Result<Vec<RawQuestion>, ContentError> {
        debug!(topic, count, available = self.questions.len(), "Serving static question batch");
        if self.questions.is_empty() {
            return Err(ContentError::Unavailable("no questions loaded".to_string()));
        }
        // Hand back everything; the adapter decides whether the count fits.
        Ok(self.questions.clone())
    }
}
