//! Advice provider contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{strip_code_fence, Question};
use crate::error::AdviceError;

/// The two request shapes an advice provider serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdviceKind {
    AudiencePoll,
    PhoneFriend,
}

/// Everything a provider sees about the question.
///
/// Owned so it can travel to wherever the (possibly slow) provider call runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl AdviceRequest {
    pub fn for_question(question: &Question) -> Self {
        Self {
            prompt: question.prompt().to_string(),
            options: question.options().to_vec(),
            correct_answer: question.correct_answer().to_string(),
        }
    }
}

/// A provider's raw answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AdviceReply {
    /// Option text to percentage.
    AudiencePoll(Vec<(String, f64)>),
    PhoneFriend(String),
}

/// Parse a provider's text reply into an audience poll.
///
/// The reply is a JSON object mapping option text to percentage, bare or in a
/// markdown code fence. Entries come back ordered by option text; whether
/// they match the question is decided later by
/// [`interpret_advice`](super::interpret_advice).
pub fn parse_audience_poll(text: &str) -> Result<Vec<(String, f64)>, AdviceError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(AdviceError::Failed("empty audience poll".to_string()));
    }

    let poll: BTreeMap<String, f64> = serde_json::from_str(payload)
        .map_err(|e| AdviceError::Failed(format!("unreadable audience poll: {e}")))?;
    Ok(poll.into_iter().collect())
}

/// Backing service for the audience and phone lifelines.
///
/// Both calls are best-effort: a provider may be slow, misconfigured or
/// return nonsense. Each is made at most once per lifeline use; there are no
/// retries.
pub trait AdviceProvider {
    /// Simulated vote distribution, option text to percentage.
    fn audience_poll(&self, request: &AdviceRequest)
        -> Result<Vec<(String, f64)>, AdviceError>;

    /// Free-text advice.
    fn phone_advice(&self, request: &AdviceRequest) -> Result<String, AdviceError>;

    /// Dispatch on request kind.
    fn advise(
        &self,
        kind: AdviceKind,
        request: &AdviceRequest,
    ) -> Result<AdviceReply, AdviceError> {
        match kind {
            AdviceKind::AudiencePoll => {
                self.audience_poll(request).map(AdviceReply::AudiencePoll)
            }
            AdviceKind::PhoneFriend => {
                self.phone_advice(request).map(AdviceReply::PhoneFriend)
            }
        }
    }
}

impl AdviceError {
    /// Message shown to the player in place of the lifeline result.
    #[must_use]
    pub fn advisory_message(&self) -> String {
        match self {
            AdviceError::Unavailable(_) => concat!(
                "Lifeline help is not available. ",
                "Check the advice provider configuration."
            )
            .to_string(),
            AdviceError::Failed(_) => concat!(
                "Sorry, the lifeline could not be reached. ",
                "Check the connection and provider settings."
            )
            .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{validate, RawQuestion};
    use crate::lifelines::{interpret_advice, LifelineOutcome};

    struct Fixed;

    impl AdviceProvider for Fixed {
        fn audience_poll(
            &self,
            request: &AdviceRequest,
        ) -> Result<Vec<(String, f64)>, AdviceError> {
            Ok(vec![(request.correct_answer.clone(), 100.0)])
        }

        fn phone_advice(&self, _request: &AdviceRequest) -> Result<String, AdviceError> {
            Err(AdviceError::Unavailable("no credential".to_string()))
        }
    }

    #[test]
    fn test_request_copies_question() {
        let raw = RawQuestion::new("2+2?", ["3", "4", "5", "6"], "4");
        let set = validate(vec![raw], 1).unwrap();
        let request = AdviceRequest::for_question(set.get(0).unwrap());

        assert_eq!(request.prompt, "2+2?");
        assert_eq!(request.options.len(), 4);
        assert_eq!(request.correct_answer, "4");
    }

    #[test]
    fn test_advise_dispatches() {
        let request = AdviceRequest {
            prompt: "?".to_string(),
            options: vec!["a".to_string()],
            correct_answer: "a".to_string(),
        };

        assert_eq!(
            Fixed.advise(AdviceKind::AudiencePoll, &request),
            Ok(AdviceReply::AudiencePoll(vec![("a".to_string(), 100.0)]))
        );
        assert!(Fixed.advise(AdviceKind::PhoneFriend, &request).is_err());
    }

    #[test]
    fn test_parse_fenced_audience_poll() {
        let text = "```json\n{\"Paris\": 72, \"Lyon\": 10.5, \"Nice\": 9.5, \"Lille\": 8}\n```";
        let poll = parse_audience_poll(text).unwrap();

        assert_eq!(
            poll,
            vec![
                ("Lille".to_string(), 8.0),
                ("Lyon".to_string(), 10.5),
                ("Nice".to_string(), 9.5),
                ("Paris".to_string(), 72.0),
            ]
        );
    }

    #[test]
    fn test_parse_audience_poll_feeds_vote() {
        let raw = RawQuestion::new("Capital?", ["Paris", "Lyon", "Nice", "Lille"], "Paris");
        let set = validate(vec![raw], 1).unwrap();
        let poll = parse_audience_poll(r#"{"Paris": 70, "Lyon": 10, "Nice": 10, "Lille": 10}"#);

        let outcome = interpret_advice(
            AdviceKind::AudiencePoll,
            set.get(0).unwrap(),
            poll.map(AdviceReply::AudiencePoll),
        );
        let LifelineOutcome::Audience(vote) = outcome else {
            panic!("expected an audience vote");
        };
        assert!(vote.well_formed);
    }

    #[test]
    fn test_parse_audience_poll_rejects_garbage() {
        for text in ["", "```\n```", "[1, 2]", r#"{"Paris": "most"}"#, "no idea"] {
            let result = parse_audience_poll(text);
            assert!(matches!(result, Err(AdviceError::Failed(_))), "{text:?}");
        }
    }

    #[test]
    fn test_advisory_messages_differ() {
        let missing = AdviceError::Unavailable("x".to_string()).advisory_message();
        let failed = AdviceError::Failed("x".to_string()).advisory_message();
        assert_ne!(missing, failed);
    }
}
