//! Turn engine implementation.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::content::{Question, QuestionSet};
use crate::core::{GameRng, Player, PlayerId, PlayerOutcome, TerminalReason};
use crate::error::{AdviceError, ContentShapeError, TurnError};
use crate::ladder::{Prize, PrizeLadder};
use crate::lifelines::{
    self, AdviceKind, AdviceProvider, AdviceReply, AdviceRequest, LifelineKind, LifelineOutcome,
};

/// Where a player's turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for an answer to question `question`.
    AwaitingAnswer { question: usize },
    /// An answer has been recorded and is about to be checked.
    Resolving { question: usize, choice: usize },
    /// Absorbing. No further transitions.
    Terminal { reason: TerminalReason, prize: Prize },
}

impl TurnState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Terminal { .. })
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::AwaitingAnswer { question } => {
                write!(f, "awaiting an answer to question {question}")
            }
            TurnState::Resolving { question, .. } => write!(f, "resolving question {question}"),
            TurnState::Terminal { reason, prize } => {
                write!(f, "the turn is over ({reason}, {prize})")
            }
        }
    }
}

/// Result of `submit_answer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The choice was recorded for `question`.
    Recorded { question: usize },
    /// A choice was already recorded; this submission was ignored.
    AlreadyRecorded { choice: String },
}

/// Result of `resolve`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Correct, and there is another question.
    Advanced { next_question: usize, secured: Prize },
    /// The turn ended.
    Finished(PlayerOutcome),
}

/// A provider-backed lifeline that has been started but not completed.
///
/// Hand the `request()` to the advice provider wherever that call runs,
/// then pass the ticket back to `complete_lifeline` or `discard_lifeline`.
#[derive(Clone, Debug)]
pub struct LifelineTicket {
    kind: LifelineKind,
    advice: AdviceKind,
    question: usize,
    seq: u64,
    request: AdviceRequest,
}

impl LifelineTicket {
    #[must_use]
    pub fn kind(&self) -> LifelineKind {
        self.kind
    }

    #[must_use]
    pub fn advice_kind(&self) -> AdviceKind {
        self.advice
    }

    #[must_use]
    pub fn question(&self) -> usize {
        self.question
    }

    #[must_use]
    pub fn request(&self) -> &AdviceRequest {
        &self.request
    }
}

/// One player's progression through the question ladder.
///
/// Owns the `Player` record. Every rejected call leaves the engine exactly
/// as it was.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    id: PlayerId,
    player: Player,
    state: TurnState,
    ladder: Arc<PrizeLadder>,
    questions: Arc<QuestionSet>,
    rng: GameRng,
    /// Options removed by 50:50 on the current question.
    eliminated: SmallVec<[usize; 2]>,
    /// Provider-backed lifeline awaiting its reply.
    pending: Option<LifelineKind>,
    ticket_seq: u64,
}

impl TurnEngine {
    /// Create an engine at question 0.
    ///
    /// The question set must have one question per ladder tier.
    pub fn new(
        id: PlayerId,
        player: Player,
        ladder: Arc<PrizeLadder>,
        questions: Arc<QuestionSet>,
        rng: GameRng,
    ) -> Result<Self, ContentShapeError> {
        if questions.len() != ladder.len() {
            return Err(ContentShapeError::WrongCount {
                expected: ladder.len(),
                actual: questions.len(),
            });
        }

        Ok(Self {
            id,
            player,
            state: TurnState::AwaitingAnswer { question: 0 },
            ladder,
            questions,
            rng,
            eliminated: SmallVec::new(),
            pending: None,
            ticket_seq: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    #[must_use]
    pub fn ladder(&self) -> &PrizeLadder {
        &self.ladder
    }

    /// Index of the question in play, if the turn is not over.
    #[must_use]
    pub fn question_index(&self) -> Option<usize> {
        match self.state {
            TurnState::AwaitingAnswer { question } | TurnState::Resolving { question, .. } => {
                Some(question)
            }
            TurnState::Terminal { .. } => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question_index().and_then(|i| self.questions.get(i))
    }

    /// Option indices removed by 50:50 on the current question.
    #[must_use]
    pub fn eliminated(&self) -> &[usize] {
        &self.eliminated
    }

    #[must_use]
    pub fn pending_lifeline(&self) -> Option<LifelineKind> {
        self.pending
    }

    // === Answers ===

    /// Record an answer for the current question.
    ///
    /// The first choice wins: once recorded, later submissions are no-ops.
    /// Fails while a lifeline request is pending, and for text that is not a
    /// selectable option.
    pub fn submit_answer(&mut self, choice: &str) -> Result<Submission, TurnError> {
        let question = match self.state {
            TurnState::AwaitingAnswer { question } => question,
            TurnState::Resolving { question, choice: recorded } => {
                let choice = self.question_at(question)?.options()[recorded].clone();
                debug!(player = %self.id, question, "Ignoring repeated answer");
                return Ok(Submission::AlreadyRecorded { choice });
            }
            TurnState::Terminal { .. } => return Err(self.invalid("submit_answer")),
        };
        if let Some(kind) = self.pending {
            return Err(TurnError::LifelinePending(kind));
        }

        let index = self
            .question_at(question)?
            .option_index(choice)
            .filter(|i| !self.eliminated.contains(i))
            .ok_or_else(|| TurnError::InvalidChoice(choice.to_string()))?;

        self.state = TurnState::Resolving { question, choice: index };
        debug!(player = %self.id, question, choice, "Answer recorded");
        Ok(Submission::Recorded { question })
    }

    /// Check the recorded answer and move on.
    pub fn resolve(&mut self) -> Result<Resolution, TurnError> {
        let TurnState::Resolving { question, choice } = self.state else {
            return Err(self.invalid("resolve"));
        };

        let correct = self.question_at(question)?.correct_index() == choice;
        let top = self.ladder.top_index();

        if !correct {
            let prize = self.ladder.safe_haven_floor(question);
            return Ok(Resolution::Finished(self.finish(TerminalReason::WrongAnswer, prize)));
        }

        let secured = self.ladder.prize_at(question)?;
        self.player.secure_tier(question);

        if question == top {
            return Ok(Resolution::Finished(self.finish(TerminalReason::Won, secured)));
        }

        let next_question = question + 1;
        self.state = TurnState::AwaitingAnswer { question: next_question };
        self.eliminated.clear();
        debug!(player = %self.id, question, secured, "Correct answer");
        Ok(Resolution::Advanced { next_question, secured })
    }

    /// Submit and resolve in one step.
    pub fn answer(&mut self, choice: &str) -> Result<Resolution, TurnError> {
        self.submit_answer(choice)?;
        self.resolve()
    }

    /// Withdraw before answering the current question, keeping the last
    /// secured tier.
    pub fn walk_away(&mut self) -> Result<PlayerOutcome, TurnError> {
        let TurnState::AwaitingAnswer { question } = self.state else {
            return Err(self.invalid("walk_away"));
        };
        if let Some(kind) = self.pending {
            return Err(TurnError::LifelinePending(kind));
        }

        let prize = self.ladder.secured_prize(question);
        Ok(self.finish(TerminalReason::WalkedAway, prize))
    }

    // === Lifelines ===

    /// Use a lifeline on the current question, calling the provider inline.
    pub fn use_lifeline(
        &mut self,
        kind: LifelineKind,
        advisor: Option<&dyn AdviceProvider>,
    ) -> Result<LifelineOutcome, TurnError> {
        let question = self.assist_question("use_lifeline")?;
        let questions = Arc::clone(&self.questions);
        let current = questions.get(question).ok_or_else(|| self.invalid("use_lifeline"))?;

        let outcome = lifelines::use_lifeline(
            kind,
            current,
            self.player.lifelines_mut(),
            advisor,
            &mut self.rng,
        )?;

        if let LifelineOutcome::FiftyFifty { eliminated } = &outcome {
            self.eliminated = eliminated.clone();
        }
        info!(player = %self.id, question, %kind, "Lifeline used");
        Ok(outcome)
    }

    /// Start a provider-backed lifeline whose reply will arrive later.
    ///
    /// The lifeline is spent immediately. Until the ticket is completed or
    /// discarded, answering and walking away are rejected.
    pub fn begin_lifeline(&mut self, kind: LifelineKind) -> Result<LifelineTicket, TurnError> {
        let question = self.assist_question("begin_lifeline")?;
        let Some(advice) = kind.advice_kind() else {
            return Err(TurnError::InvalidState {
                operation: "begin_lifeline",
                state: format!("{kind} resolves without a provider"),
            });
        };

        let request = AdviceRequest::for_question(self.question_at(question)?);
        self.player.lifelines_mut().consume(kind)?;

        self.pending = Some(kind);
        self.ticket_seq += 1;
        debug!(player = %self.id, question, %kind, "Lifeline request pending");
        Ok(LifelineTicket {
            kind,
            advice,
            question,
            seq: self.ticket_seq,
            request,
        })
    }

    /// Deliver the provider's reply for a pending lifeline.
    pub fn complete_lifeline(
        &mut self,
        ticket: LifelineTicket,
        reply: Result<AdviceReply, AdviceError>,
    ) -> Result<LifelineOutcome, TurnError> {
        self.check_ticket(&ticket, "complete_lifeline")?;
        self.pending = None;

        let question = self.question_at(ticket.question)?;
        let outcome = lifelines::interpret_advice(ticket.advice, question, reply);
        info!(
            player = %self.id,
            question = ticket.question,
            kind = %ticket.kind,
            "Lifeline completed"
        );
        Ok(outcome)
    }

    /// Drop a pending lifeline without a result. It stays spent.
    pub fn discard_lifeline(&mut self, ticket: LifelineTicket) -> Result<(), TurnError> {
        self.check_ticket(&ticket, "discard_lifeline")?;
        self.pending = None;
        debug!(player = %self.id, kind = %ticket.kind, "Lifeline request discarded");
        Ok(())
    }

    // === Internals ===

    fn question_at(&self, index: usize) -> Result<&Question, TurnError> {
        self.questions.get(index).ok_or_else(|| self.invalid("question lookup"))
    }

    fn invalid(&self, operation: &'static str) -> TurnError {
        TurnError::InvalidState {
            operation,
            state: self.state.to_string(),
        }
    }

    /// Lifelines need an unanswered question and no request in flight.
    fn assist_question(&self, operation: &'static str) -> Result<usize, TurnError> {
        let TurnState::AwaitingAnswer { question } = self.state else {
            return Err(self.invalid(operation));
        };
        if let Some(kind) = self.pending {
            return Err(TurnError::LifelinePending(kind));
        }
        Ok(question)
    }

    fn check_ticket(
        &self,
        ticket: &LifelineTicket,
        operation: &'static str,
    ) -> Result<(), TurnError> {
        let matches = self.pending == Some(ticket.kind)
            && ticket.seq == self.ticket_seq
            && self.question_index() == Some(ticket.question);
        if matches {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn finish(&mut self, reason: TerminalReason, prize: Prize) -> PlayerOutcome {
        let outcome = self.player.freeze(reason, prize);
        self.state = TurnState::Terminal { reason, prize };
        self.eliminated.clear();
        self.pending = None;
        info!(
            player = %self.id,
            name = self.player.name(),
            %reason,
            prize,
            answered = outcome.questions_answered,
            "Turn finished"
        );
        outcome
    }
}
