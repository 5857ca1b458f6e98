//! Offline advice provider.
//!
//! Stands in for a remote advisor: seeded, deterministic per question, and
//! always contract-conforming for audience polls.

use crate::core::GameRng;
use crate::error::AdviceError;

use super::advice::{AdviceProvider, AdviceRequest};

/// Share range for the correct option in a simulated poll.
const CORRECT_SHARE_MIN: usize = 40;
const CORRECT_SHARE_MAX: usize = 70;

/// Seeded stand-in for a remote advisor.
#[derive(Clone, Debug)]
pub struct SimulatedAdvisor {
    seed: u64,
    /// Probability the friend names the correct answer.
    friend_accuracy: f64,
}

impl SimulatedAdvisor {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            friend_accuracy: 0.8,
        }
    }

    /// Set how often the friend is right (clamped to 0..=1).
    #[must_use]
    pub fn with_friend_accuracy(mut self, accuracy: f64) -> Self {
        self.friend_accuracy = accuracy.clamp(0.0, 1.0);
        self
    }

    fn rng_for(&self, request: &AdviceRequest, purpose: &str) -> GameRng {
        GameRng::new(self.seed).for_context(&format!("{purpose}:{}", request.prompt))
    }
}

impl AdviceProvider for SimulatedAdvisor {
    fn audience_poll(&self, request: &AdviceRequest) -> Result<Vec<(String, f64)>, AdviceError> {
        let wrong: Vec<&String> = request
            .options
            .iter()
            .filter(|o| **o != request.correct_answer)
            .collect();
        if wrong.len() + 1 != request.options.len() || wrong.len() != 3 {
            let reason = "question does not have four distinct options";
            return Err(AdviceError::Failed(reason.to_string()));
        }

        let mut rng = self.rng_for(request, "audience");
        let correct = rng.gen_range_usize(CORRECT_SHARE_MIN..CORRECT_SHARE_MAX + 1);
        let rest = 100 - correct;
        let cap = correct - 1;

        // Split `rest` three ways with every part below `correct`.
        let a = rng.gen_range_usize(0..rest.min(cap) + 1);
        let b_min = (rest - a).saturating_sub(cap);
        let b = rng.gen_range_usize(b_min..(rest - a).min(cap) + 1);
        let mut parts = [a, b, rest - a - b];
        rng.shuffle(&mut parts);

        let mut poll = Vec::with_capacity(request.options.len());
        let mut parts = parts.into_iter();
        for option in &request.options {
            let share = if *option == request.correct_answer {
                correct
            } else {
                parts.next().unwrap_or(0)
            };
            poll.push((option.clone(), share as f64));
        }
        Ok(poll)
    }

    fn phone_advice(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let mut rng = self.rng_for(request, "phone");

        let pick = if rng.gen_bool(self.friend_accuracy) {
            Some(&request.correct_answer)
        } else {
            let wrong: Vec<&String> = request
                .options
                .iter()
                .filter(|o| **o != request.correct_answer)
                .collect();
            rng.choose(&wrong).copied()
        };

        match pick {
            Some(answer) => Ok(format!(
                "Hmm, I think it's \"{answer}\", but I wouldn't bet the house on it."
            )),
            None => Err(AdviceError::Failed("no options to choose from".to_string())),
        }
    }
}
