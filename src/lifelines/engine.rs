//! Stateless lifeline logic.
//!
//! The only state touched is the `Lifelines` flag set passed in, and only
//! through `Lifelines::consume`.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::content::Question;
use crate::core::GameRng;
use crate::error::{AdviceError, LifelineError};

use super::advice::{AdviceKind, AdviceProvider, AdviceReply, AdviceRequest};
use super::{AudienceVote, LifelineKind, LifelineOutcome, Lifelines, OptionShare};

/// Tolerance on the audience total.
const AUDIENCE_TOTAL_TOLERANCE: f64 = 0.5;

/// Use a lifeline on `question`.
///
/// Consumes the flag first, so a provider failure still spends the
/// lifeline. A second use returns `AlreadyUsed` and leaves `lifelines`
/// untouched.
pub fn use_lifeline(
    kind: LifelineKind,
    question: &Question,
    lifelines: &mut Lifelines,
    advisor: Option<&dyn AdviceProvider>,
    rng: &mut GameRng,
) -> Result<LifelineOutcome, LifelineError> {
    lifelines.consume(kind)?;

    let outcome = match kind.advice_kind() {
        None => fifty_fifty(question, rng),
        Some(advice) => consult(advice, question, advisor),
    };
    debug!(%kind, unavailable = outcome.is_unavailable(), "Lifeline used");
    Ok(outcome)
}

/// Eliminate two of the three incorrect options, chosen uniformly.
///
/// The correct option is never eliminated.
pub fn fifty_fifty(question: &Question, rng: &mut GameRng) -> LifelineOutcome {
    let wrong: SmallVec<[usize; 3]> = (0..question.options().len())
        .filter(|&i| i != question.correct_index())
        .collect();
    let kept = rng.gen_range_usize(0..wrong.len());

    let eliminated = wrong
        .iter()
        .enumerate()
        .filter(|&(pos, _)| pos != kept)
        .map(|(_, &index)| index)
        .collect();

    LifelineOutcome::FiftyFifty { eliminated }
}

/// Ask the provider, synchronously, and interpret the reply.
pub fn consult(
    kind: AdviceKind,
    question: &Question,
    advisor: Option<&dyn AdviceProvider>,
) -> LifelineOutcome {
    let reply = match advisor {
        Some(advisor) => advisor.advise(kind, &AdviceRequest::for_question(question)),
        None => Err(AdviceError::Unavailable("no advice provider configured".to_string())),
    };
    interpret_advice(kind, question, reply)
}

/// Turn a provider reply (or failure) into a lifeline outcome.
pub fn interpret_advice(
    kind: AdviceKind,
    question: &Question,
    reply: Result<AdviceReply, AdviceError>,
) -> LifelineOutcome {
    let lifeline = match kind {
        AdviceKind::AudiencePoll => LifelineKind::AskAudience,
        AdviceKind::PhoneFriend => LifelineKind::PhoneFriend,
    };

    match (kind, reply) {
        (AdviceKind::AudiencePoll, Ok(AdviceReply::AudiencePoll(poll))) => {
            let vote = audience_vote(question, poll);
            if !vote.well_formed {
                warn!(
                    prompt = question.prompt(),
                    "Audience poll broke the contract; showing as advisory"
                );
            }
            LifelineOutcome::Audience(vote)
        }
        (AdviceKind::PhoneFriend, Ok(AdviceReply::PhoneFriend(text))) => {
            LifelineOutcome::Phone(text)
        }
        (_, Ok(_)) => {
            warn!(kind = %lifeline, "Advice provider answered the wrong request");
            LifelineOutcome::Unavailable {
                kind: lifeline,
                message: AdviceError::Failed("mismatched reply".to_string()).advisory_message(),
            }
        }
        (_, Err(err)) => {
            warn!(kind = %lifeline, error = %err, "Advice provider failed; lifeline consumed");
            LifelineOutcome::Unavailable {
                kind: lifeline,
                message: err.advisory_message(),
            }
        }
    }
}

/// Order a raw poll by the question's options and check the contract.
fn audience_vote(question: &Question, poll: Vec<(String, f64)>) -> AudienceVote {
    let options = question.options();

    let mut shares: Vec<OptionShare> = options
        .iter()
        .filter_map(|option| {
            poll.iter()
                .find(|(key, _)| key == option)
                .map(|(_, percent)| OptionShare { option: option.clone(), percent: *percent })
        })
        .collect();
    let all_present = shares.len() == options.len();

    let unknown: Vec<OptionShare> = poll
        .iter()
        .filter(|(key, _)| !options.contains(key))
        .map(|(key, percent)| OptionShare { option: key.clone(), percent: *percent })
        .collect();
    let no_extras = unknown.is_empty() && poll.len() == shares.len();
    shares.extend(unknown);

    let values_sane = shares.iter().all(|s| s.percent.is_finite() && s.percent >= 0.0);
    let total: f64 = shares.iter().map(|s| s.percent).sum();
    let sums_to_100 = (total - 100.0).abs() <= AUDIENCE_TOTAL_TOLERANCE;

    let correct = question.correct_answer();
    let correct_leads = shares.iter().find(|s| s.option == correct).is_some_and(|c| {
        shares
            .iter()
            .filter(|s| s.option != correct)
            .all(|s| s.percent < c.percent)
    });

    AudienceVote {
        well_formed: all_present && no_extras && values_sane && sums_to_100 && correct_leads,
        shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{validate, RawQuestion};

    fn question() -> Question {
        let options = ["Mars", "Jupiter", "Venus", "Earth"];
        let raw = RawQuestion::new("Largest planet?", options, "Jupiter");
        validate(vec![raw], 1).unwrap().get(0).unwrap().clone()
    }

    struct Scripted {
        poll: Result<Vec<(String, f64)>, AdviceError>,
        phone: Result<String, AdviceError>,
    }

    impl AdviceProvider for Scripted {
        fn audience_poll(
            &self,
            _request: &AdviceRequest,
        ) -> Result<Vec<(String, f64)>, AdviceError> {
            self.poll.clone()
        }

        fn phone_advice(&self, _request: &AdviceRequest) -> Result<String, AdviceError> {
            self.phone.clone()
        }
    }

    fn poll(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_fifty_fifty_keeps_correct_answer() {
        let q = question();
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let LifelineOutcome::FiftyFifty { eliminated } = fifty_fifty(&q, &mut rng) else {
                panic!("expected fifty-fifty outcome");
            };
            assert_eq!(eliminated.len(), 2);
            assert!(!eliminated.contains(&q.correct_index()));
            assert_ne!(eliminated[0], eliminated[1]);
        }
    }

    #[test]
    fn test_fifty_fifty_varies_with_seed() {
        let q = question();
        let kept: std::collections::HashSet<_> = (0..50)
            .map(|seed| match fifty_fifty(&q, &mut GameRng::new(seed)) {
                LifelineOutcome::FiftyFifty { eliminated } => eliminated.to_vec(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_use_lifeline_consumes_even_without_provider() {
        let q = question();
        let mut lifelines = Lifelines::new();
        let mut rng = GameRng::new(1);

        let outcome =
            use_lifeline(LifelineKind::PhoneFriend, &q, &mut lifelines, None, &mut rng).unwrap();

        assert!(outcome.is_unavailable());
        assert!(!lifelines.is_available(LifelineKind::PhoneFriend));
    }

    #[test]
    fn test_use_lifeline_twice_is_rejected() {
        let q = question();
        let mut lifelines = Lifelines::new();
        let mut rng = GameRng::new(1);

        use_lifeline(LifelineKind::FiftyFifty, &q, &mut lifelines, None, &mut rng).unwrap();
        let snapshot = lifelines;
        let err = use_lifeline(LifelineKind::FiftyFifty, &q, &mut lifelines, None, &mut rng)
            .unwrap_err();

        assert_eq!(err, LifelineError::AlreadyUsed(LifelineKind::FiftyFifty));
        assert_eq!(lifelines, snapshot);
    }

    #[test]
    fn test_well_formed_audience_vote() {
        let q = question();
        let advisor = Scripted {
            poll: Ok(poll(&[("Jupiter", 61.0), ("Earth", 9.0), ("Mars", 20.0), ("Venus", 10.0)])),
            phone: Ok(String::new()),
        };

        let outcome = consult(AdviceKind::AudiencePoll, &q, Some(&advisor));
        let LifelineOutcome::Audience(vote) = outcome else {
            panic!("expected audience outcome");
        };

        assert!(vote.well_formed);
        let order: Vec<_> = vote.shares.iter().map(|s| s.option.as_str()).collect();
        assert_eq!(order, vec!["Mars", "Jupiter", "Venus", "Earth"]);
        assert_eq!(vote.percent_for("Jupiter"), Some(61.0));
    }

    #[test]
    fn test_malformed_audience_vote_is_advisory() {
        let q = question();

        let cases = [
            // correct option not strictly ahead
            poll(&[("Jupiter", 40.0), ("Earth", 40.0), ("Mars", 10.0), ("Venus", 10.0)]),
            // does not sum to 100
            poll(&[("Jupiter", 50.0), ("Earth", 10.0), ("Mars", 10.0), ("Venus", 10.0)]),
            // missing an option
            poll(&[("Jupiter", 70.0), ("Earth", 20.0), ("Mars", 10.0)]),
            // unknown option
            poll(&[("Jupiter", 60.0), ("Earth", 10.0), ("Mars", 10.0), ("Pluto", 20.0)]),
        ];

        for entries in cases {
            let advisor = Scripted { poll: Ok(entries), phone: Ok(String::new()) };
            match consult(AdviceKind::AudiencePoll, &q, Some(&advisor)) {
                LifelineOutcome::Audience(vote) => assert!(!vote.well_formed),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_phone_text_delivered_as_is() {
        let q = question();
        let advisor = Scripted {
            poll: Err(AdviceError::Failed("x".to_string())),
            phone: Ok("Pretty sure it's Mars!".to_string()),
        };

        let outcome = consult(AdviceKind::PhoneFriend, &q, Some(&advisor));
        assert_eq!(outcome, LifelineOutcome::Phone("Pretty sure it's Mars!".to_string()));
    }

    #[test]
    fn test_provider_failure_becomes_advisory() {
        let q = question();
        let advisor = Scripted {
            poll: Err(AdviceError::Failed("timeout".to_string())),
            phone: Err(AdviceError::Unavailable("no key".to_string())),
        };

        match consult(AdviceKind::AudiencePoll, &q, Some(&advisor)) {
            LifelineOutcome::Unavailable { kind, message } => {
                assert_eq!(kind, LifelineKind::AskAudience);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_reply_is_advisory() {
        let q = question();
        let outcome = interpret_advice(
            AdviceKind::PhoneFriend,
            &q,
            Ok(AdviceReply::AudiencePoll(vec![])),
        );
        assert!(matches!(
            outcome,
            LifelineOutcome::Unavailable { kind: LifelineKind::PhoneFriend, .. }
        ));
    }
}
