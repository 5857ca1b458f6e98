//! Question types: the provider wire shape and the validated form.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::ContentShapeError;

/// Options per question.
pub const OPTION_COUNT: usize = 4;

/// A question exactly as a content provider returned it.
///
/// Nothing is guaranteed about its shape until it passes
/// [`validate`](super::validate).
///
/// Field names follow English snake case; the camel-case and Italian names
/// used by existing providers (`domanda`, `risposte`, `risposta_corretta`)
/// are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(alias = "domanda")]
    pub prompt: String,
    #[serde(alias = "risposte")]
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer", alias = "risposta_corretta")]
    pub correct_answer: String,
}

impl RawQuestion {
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }
}

/// A validated question: four unique options, one of them correct.
///
/// Serializes for display only. There is no way to deserialize one directly;
/// a [`QuestionSet`] read from JSON goes through the adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: usize,
}

impl Question {
    /// Only the adapter builds questions, after checking the invariants.
    pub(crate) fn from_parts(
        prompt: String,
        options: [String; OPTION_COUNT],
        correct: usize,
    ) -> Self {
        debug_assert!(correct < OPTION_COUNT);
        Self { prompt, options, correct }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct]
    }

    /// Position of the correct answer within `options()`.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    /// Position of an option by its text.
    #[must_use]
    pub fn option_index(&self, choice: &str) -> Option<usize> {
        self.options.iter().position(|o| o == choice)
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer() == choice
    }

    /// Reorder the options, keeping track of the correct one.
    pub fn shuffle_options(&mut self, rng: &mut GameRng) {
        let answer = self.options[self.correct].clone();
        rng.shuffle(&mut self.options);
        self.correct = self
            .options
            .iter()
            .position(|o| *o == answer)
            .unwrap_or(self.correct);
    }
}

/// The ordered, validated questions shared by every player of a session.
///
/// The serialized form is the raw wire shape, and deserializing runs it
/// through [`validate`](super::validate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawQuestion>", into = "Vec<RawQuestion>")]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub(crate) fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Shuffle every question's options.
    pub fn shuffle_options(&mut self, rng: &mut GameRng) {
        for question in &mut self.questions {
            question.shuffle_options(rng);
        }
    }
}

impl TryFrom<Vec<RawQuestion>> for QuestionSet {
    type Error = ContentShapeError;

    fn try_from(raw: Vec<RawQuestion>) -> Result<Self, Self::Error> {
        let expected = raw.len();
        super::validate(raw, expected)
    }
}

impl From<QuestionSet> for Vec<RawQuestion> {
    fn from(set: QuestionSet) -> Self {
        set.questions
            .into_iter()
            .map(|q| {
                let answer = q.options[q.correct].clone();
                RawQuestion::new(q.prompt, q.options, answer)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital_question() -> Question {
        Question::from_parts(
            "Capital of France?".to_string(),
            ["Paris", "Lyon", "Nice", "Lille"].map(String::from),
            0,
        )
    }

    #[test]
    fn test_question_accessors() {
        let q = capital_question();

        assert_eq!(q.prompt(), "Capital of France?");
        assert_eq!(q.correct_answer(), "Paris");
        assert_eq!(q.option_index("Nice"), Some(2));
        assert_eq!(q.option_index("Rome"), None);
        assert!(q.is_correct("Paris"));
        assert!(!q.is_correct("Lyon"));
    }

    #[test]
    fn test_shuffle_tracks_correct_answer() {
        for seed in 0..20 {
            let mut q = capital_question();
            let mut rng = GameRng::new(seed);
            q.shuffle_options(&mut rng);

            assert_eq!(q.correct_answer(), "Paris");
            let mut sorted = q.options().to_vec();
            sorted.sort();
            assert_eq!(sorted, vec!["Lille", "Lyon", "Nice", "Paris"]);
        }
    }

    #[test]
    fn test_raw_question_accepts_camel_case() {
        let json = r#"{ "prompt": "2+2?", "options": ["3","4","5","6"], "correctAnswer": "4" }"#;
        let raw: RawQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(raw, RawQuestion::new("2+2?", ["3", "4", "5", "6"], "4"));
    }

    #[test]
    fn test_deserialized_set_is_validated() {
        let json = r#"[{ "prompt": "Q?", "options": ["a","b","c","d"], "correct": 9 }]"#;
        assert!(serde_json::from_str::<QuestionSet>(json).is_err());

        let json = r#"[{ "prompt": "Q?", "options": ["a","b","c","d"], "correct_answer": "e" }]"#;
        let err = serde_json::from_str::<QuestionSet>(json).unwrap_err();
        assert!(err.to_string().contains("is not one of the options"), "{err}");
    }

    #[test]
    fn test_internal_layout_is_not_accepted() {
        let json = r#"{ "questions": [
            { "prompt": "Q?", "options": ["a","b","c","d"], "correct": 9 }
        ] }"#;
        assert!(serde_json::from_str::<QuestionSet>(json).is_err());
    }

    #[test]
    fn test_set_serializes_as_wire_shape() {
        let json = r#"[{
            "prompt": "Capital of France?",
            "options": ["Paris", "Lyon", "Nice", "Lille"],
            "correct_answer": "Paris"
        }]"#;
        let mut set: QuestionSet = serde_json::from_str(json).unwrap();
        set.shuffle_options(&mut GameRng::new(4));

        let json = serde_json::to_string(&set).unwrap();
        let back: QuestionSet = serde_json::from_str(&json).unwrap();

        assert_eq!(back, set);
        assert_eq!(back.get(0).unwrap().correct_answer(), "Paris");
    }
}
