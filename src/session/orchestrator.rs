//! Session orchestration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::content::{validate, QuestionSet, QuizContentProvider};
use crate::core::{GameConfig, GameRng, Player, PlayerId, PlayerOutcome, UserId};
use crate::error::{ContentShapeError, SessionError};
use crate::lifelines::{AdviceProvider, LifelineKind, LifelineOutcome};
use crate::persistence::{PlayerRecord, ResultSink};
use crate::turn::{Resolution, Submission, TurnEngine};

use super::setup::SessionSetup;

/// Whether turns are still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    Results,
}

/// One line of the final ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub record: PlayerRecord,
}

/// Final ranking of a finished session.
///
/// Ordered by prize, highest first; equal prizes keep turn order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    topic: String,
    standings: Vec<Standing>,
}

impl SessionResult {
    fn from_turns(topic: &str, turns: &[TurnEngine]) -> Self {
        let mut standings: Vec<Standing> = turns
            .iter()
            .filter_map(|turn| {
                PlayerRecord::from_player(turn.player()).map(|record| Standing {
                    player: turn.id(),
                    record,
                })
            })
            .collect();
        standings.sort_by(|a, b| b.record.prize.cmp(&a.record.prize));

        Self {
            topic: topic.to_string(),
            standings,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Records in ranking order, as handed to the result sink.
    #[must_use]
    pub fn records(&self) -> Vec<PlayerRecord> {
        self.standings.iter().map(|s| s.record.clone()).collect()
    }

    /// First-ranked standing.
    #[must_use]
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

/// What `advance` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Another player is now active.
    NextPlayer(PlayerId),
    /// Every player is done; results were emitted.
    Finished(SessionResult),
}

/// A multi-player game over one shared question set.
///
/// Players take whole turns in order. Only the active player's engine is
/// reachable mutably, and `advance` is the only way to change who is active.
#[derive(Clone, Debug)]
pub struct Session {
    topic: String,
    owner: Option<UserId>,
    turns: Vec<TurnEngine>,
    active: usize,
    phase: SessionPhase,
    result: Option<SessionResult>,
}

impl Session {
    /// Fetch questions for the setup's topic and build the session.
    ///
    /// Nothing is created if the provider fails or returns a batch that does
    /// not validate.
    pub fn start(
        config: &GameConfig,
        setup: &SessionSetup,
        provider: &dyn QuizContentProvider,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let (names, topic) = setup.normalized(config)?;

        let count = config.question_count();
        let raw = provider.fetch_questions(&topic, count)?;
        let questions = validate(raw, count)?;

        Self::build(config, names, topic, setup.owner().cloned(), questions)
    }

    /// Build a session over an already validated question set.
    pub fn new(
        config: &GameConfig,
        setup: &SessionSetup,
        questions: QuestionSet,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let (names, topic) = setup.normalized(config)?;

        Self::build(config, names, topic, setup.owner().cloned(), questions)
    }

    /// Assemble the turns. `config` and the names and topic are already
    /// checked.
    fn build(
        config: &GameConfig,
        names: Vec<String>,
        topic: String,
        owner: Option<UserId>,
        mut questions: QuestionSet,
    ) -> Result<Self, SessionError> {
        let expected = config.question_count();
        if questions.len() != expected {
            return Err(ContentShapeError::WrongCount {
                expected,
                actual: questions.len(),
            }
            .into());
        }

        let mut rng = GameRng::new(config.seed);
        if config.shuffle_options {
            questions.shuffle_options(&mut rng.for_context("options"));
        }

        let ladder = Arc::new(config.ladder.clone());
        let questions = Arc::new(questions);
        let count = names.len();
        let turns = names
            .into_iter()
            .zip(PlayerId::all(count))
            .map(|(name, id)| {
                let player = Player::new(name);
                TurnEngine::new(id, player, Arc::clone(&ladder), Arc::clone(&questions), rng.fork())
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(players = turns.len(), topic = %topic, questions = expected, "Session started");
        Ok(Self {
            topic,
            owner,
            turns,
            active: 0,
            phase: SessionPhase::Playing,
            result: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Results
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.turns.len()
    }

    /// Players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.turns.iter().map(TurnEngine::player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.turns.get(id.index()).map(TurnEngine::player)
    }

    /// Read-only view of any player's engine.
    #[must_use]
    pub fn turn(&self, id: PlayerId) -> Option<&TurnEngine> {
        self.turns.get(id.index())
    }

    /// The player whose turn it is. `None` once results are out.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        match self.phase {
            SessionPhase::Playing => self.turns.get(self.active).map(TurnEngine::id),
            SessionPhase::Results => None,
        }
    }

    #[must_use]
    pub fn active_turn(&self) -> Option<&TurnEngine> {
        self.active_player().and_then(|id| self.turn(id))
    }

    /// The active player's engine.
    pub fn active_turn_mut(&mut self) -> Result<&mut TurnEngine, SessionError> {
        if self.phase == SessionPhase::Results {
            return Err(SessionError::SessionFinished);
        }
        self.turns.get_mut(self.active).ok_or(SessionError::SessionFinished)
    }

    /// Emitted ranking, once the session has finished.
    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    // === Active player shortcuts ===

    pub fn submit_answer(&mut self, choice: &str) -> Result<Submission, SessionError> {
        Ok(self.active_turn_mut()?.submit_answer(choice)?)
    }

    pub fn resolve(&mut self) -> Result<Resolution, SessionError> {
        Ok(self.active_turn_mut()?.resolve()?)
    }

    pub fn answer(&mut self, choice: &str) -> Result<Resolution, SessionError> {
        Ok(self.active_turn_mut()?.answer(choice)?)
    }

    pub fn walk_away(&mut self) -> Result<PlayerOutcome, SessionError> {
        Ok(self.active_turn_mut()?.walk_away()?)
    }

    pub fn use_lifeline(
        &mut self,
        kind: LifelineKind,
        advisor: Option<&dyn AdviceProvider>,
    ) -> Result<LifelineOutcome, SessionError> {
        Ok(self.active_turn_mut()?.use_lifeline(kind, advisor)?)
    }

    // === Progression ===

    /// Hand the turn to the next unfinished player, or finish the session.
    ///
    /// The active player must be terminal. When nobody is left, the ranking
    /// is written to `sink` for the session owner (anonymous sessions skip
    /// the write) and the session moves to `Results`. A failed write is
    /// returned and the session stays in `Playing`, so calling `advance`
    /// again retries it.
    pub fn advance(&mut self, sink: &mut dyn ResultSink) -> Result<Advance, SessionError> {
        if self.phase == SessionPhase::Results {
            return Err(SessionError::SessionFinished);
        }

        let current = self.turns.get(self.active).ok_or(SessionError::SessionFinished)?;
        if !current.is_terminal() {
            return Err(SessionError::PrematureAdvance { active: current.id() });
        }

        let next = (self.active + 1..self.turns.len()).find(|&i| !self.turns[i].is_terminal());
        if let Some(next) = next {
            self.active = next;
            let id = self.turns[next].id();
            debug!(player = %id, name = self.turns[next].player().name(), "Next player");
            return Ok(Advance::NextPlayer(id));
        }

        let result = SessionResult::from_turns(&self.topic, &self.turns);
        match &self.owner {
            Some(owner) => sink.record(owner, &result.records())?,
            None => debug!("Anonymous session; results not persisted"),
        }

        self.phase = SessionPhase::Results;
        self.result = Some(result.clone());
        info!(
            topic = %self.topic,
            leader = result.leader().map(|s| s.record.name.as_str()),
            prize = result.leader().map(|s| s.record.prize),
            "Session finished"
        );
        Ok(Advance::Finished(result))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::content::RawQuestion;
    use crate::error::{ContentError, PersistenceError};
    use crate::ladder::PrizeLadder;
    use crate::persistence::MemoryResultStore;

    fn raw_questions(n: usize) -> Vec<RawQuestion> {
        (0..n)
            .map(|i| {
                let options = ["right", "w1", "w2", "w3"].map(|o| format!("{o}{i}"));
                RawQuestion::new(format!("Q{i}"), options, format!("right{i}"))
            })
            .collect()
    }

    fn questions(n: usize) -> QuestionSet {
        validate(raw_questions(n), n).unwrap()
    }

    fn short_config() -> GameConfig {
        GameConfig::default().with_ladder(PrizeLadder::new(vec![100, 500, 1000], vec![1]).unwrap())
    }

    /// Refuses every write.
    struct BrokenSink;

    impl ResultSink for BrokenSink {
        fn record(
            &mut self,
            user: &UserId,
            _records: &[PlayerRecord],
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::InvalidUser(user.to_string()))
        }

        fn history(&self, _user: &UserId) -> Result<Vec<PlayerRecord>, PersistenceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_new_rejects_wrong_question_count() {
        let setup = SessionSetup::new("Maths", ["Ada"]);
        let err = Session::new(&short_config(), &setup, questions(4)).unwrap_err();
        assert!(matches!(err, SessionError::ContentShape(_)));
    }

    /// Counts fetches and serves a fixed batch.
    struct Counting {
        calls: Cell<usize>,
    }

    impl QuizContentProvider for Counting {
        fn fetch_questions(
            &self,
            _topic: &str,
            count: usize,
        ) -> Result<Vec<RawQuestion>, ContentError> {
            self.calls.set(self.calls.get() + 1);
            Ok(raw_questions(count))
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = short_config().with_history_limit(0);
        let setup = SessionSetup::new("Maths", ["Ada"]);

        let err = Session::new(&config, &setup, questions(3)).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_start_checks_setup_before_fetching() {
        let provider = Counting { calls: Cell::new(0) };

        let err = Session::start(&short_config(), &SessionSetup::new("  ", ["Ada"]), &provider)
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyTopic));
        assert_eq!(provider.calls.get(), 0);

        let setup = SessionSetup::new(" Maths ", [" Ada ", "Bob"]).with_owner(UserId::new("ada"));
        let session = Session::start(&short_config(), &setup, &provider).unwrap();
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(session.topic(), "Maths");
        assert_eq!(session.owner(), Some(&UserId::new("ada")));
        assert_eq!(session.player(PlayerId::new(0)).unwrap().name(), "Ada");
    }

    #[test]
    fn test_first_player_active() {
        let setup = SessionSetup::new("Maths", ["Ada", "Bob"]);
        let session = Session::new(&short_config(), &setup, questions(3)).unwrap();

        assert_eq!(session.active_player(), Some(PlayerId::new(0)));
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.player_count(), 2);
    }

    #[test]
    fn test_premature_advance_rejected() {
        let setup = SessionSetup::new("Maths", ["Ada", "Bob"]);
        let mut session = Session::new(&short_config(), &setup, questions(3)).unwrap();
        let mut sink = MemoryResultStore::default();

        session.answer("right0").unwrap();
        let err = session.advance(&mut sink).unwrap_err();

        assert!(matches!(
            err,
            SessionError::PrematureAdvance { active } if active == PlayerId::new(0)
        ));
        assert_eq!(session.active_player(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_sink_failure_keeps_session_playing() {
        let setup = SessionSetup::new("Maths", ["Ada"]).with_owner(UserId::new("ada"));
        let mut session = Session::new(&short_config(), &setup, questions(3)).unwrap();
        session.walk_away().unwrap();

        assert!(matches!(session.advance(&mut BrokenSink), Err(SessionError::Persistence(_))));
        assert_eq!(session.phase(), SessionPhase::Playing);

        let mut sink = MemoryResultStore::default();
        assert!(matches!(session.advance(&mut sink), Ok(Advance::Finished(_))));
        assert_eq!(sink.history(&UserId::new("ada")).unwrap().len(), 1);
    }

    #[test]
    fn test_anonymous_session_not_persisted() {
        let setup = SessionSetup::new("Maths", ["Ada"]);
        let mut session = Session::new(&short_config(), &setup, questions(3)).unwrap();
        session.walk_away().unwrap();

        let mut sink = BrokenSink;
        assert!(matches!(session.advance(&mut sink), Ok(Advance::Finished(_))));
        assert!(session.is_finished());
    }

    #[test]
    fn test_finished_session_rejects_everything() {
        let setup = SessionSetup::new("Maths", ["Ada"]);
        let mut session = Session::new(&short_config(), &setup, questions(3)).unwrap();
        let mut sink = MemoryResultStore::default();
        session.walk_away().unwrap();
        session.advance(&mut sink).unwrap();

        assert!(matches!(session.advance(&mut sink), Err(SessionError::SessionFinished)));
        assert!(matches!(session.active_turn_mut(), Err(SessionError::SessionFinished)));
        assert!(session.active_player().is_none());
        assert!(session.result().is_some());
    }

    #[test]
    fn test_shuffled_options_are_deterministic() {
        let config = short_config().with_shuffled_options().with_seed(11);
        let setup = SessionSetup::new("Maths", ["Ada"]);

        let a = Session::new(&config, &setup, questions(3)).unwrap();
        let b = Session::new(&config, &setup, questions(3)).unwrap();

        let options = |s: &Session| {
            let question = s.active_turn().unwrap().current_question().unwrap();
            question.options().to_vec()
        };
        assert_eq!(options(&a), options(&b));
    }
}
