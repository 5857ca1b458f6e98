//! Session setup inputs.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, UserId};
use crate::error::SessionError;

/// Who is playing, on what topic, and on whose behalf.
///
/// Names need not be unique. Turn order is the order given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSetup {
    player_names: Vec<String>,
    topic: String,
    owner: Option<UserId>,
}

impl SessionSetup {
    pub fn new<I, S>(topic: impl Into<String>, player_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            topic: topic.into(),
            owner: None,
        }
    }

    /// Persist results under `user` when the session finishes.
    #[must_use]
    pub fn with_owner(mut self, user: UserId) -> Self {
        self.owner = Some(user);
        self
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    #[must_use]
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// Check the inputs against `config`, returning trimmed names and topic.
    pub(crate) fn normalized(
        &self,
        config: &GameConfig,
    ) -> Result<(Vec<String>, String), SessionError> {
        let count = self.player_names.len();
        if count < config.min_players || count > config.max_players {
            return Err(SessionError::PlayerCount {
                count,
                min: config.min_players,
                max: config.max_players,
            });
        }

        let names = self
            .player_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                if name.is_empty() {
                    Err(SessionError::EmptyPlayerName { index })
                } else {
                    Ok(name.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        Ok((names, topic.to_string()))
    }
}
