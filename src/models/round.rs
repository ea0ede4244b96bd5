//! Round, Secret and the per-player SecretCard.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used when a category has no words or questions.
pub const PLACEHOLDER_WORD: &str = "Mystery";
/// Imposter-side prompt of the placeholder question pair.
pub const PLACEHOLDER_IMPOSTER_QUESTION: &str = "Describe something mysterious.";

/// Which kind of secret a round uses.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Crew sees a word, imposters see nothing but the category.
    #[default]
    Word,
    /// Crew answers the real question, imposters answer a similar one.
    Question,
}

/// A question-mode prompt pair. Both prompts are non-empty and distinct.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuestionPair {
    pub real: String,
    pub imposter: String,
}

impl QuestionPair {
    /// Build a pair, or None if either prompt is empty or both are the same.
    pub fn new(real: impl Into<String>, imposter: impl Into<String>) -> Option<Self> {
        let real = real.into().trim().to_string();
        let imposter = imposter.into().trim().to_string();
        if real.is_empty() || imposter.is_empty() || real.eq_ignore_ascii_case(&imposter) {
            return None;
        }
        Some(Self { real, imposter })
    }

    pub fn placeholder() -> Self {
        Self {
            real: PLACEHOLDER_WORD.to_string(),
            imposter: PLACEHOLDER_IMPOSTER_QUESTION.to_string(),
        }
    }
}

/// The round's secret.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Secret {
    Word(String),
    Question(QuestionPair),
}

impl Secret {
    pub fn mode(&self) -> GameMode {
        match self {
            Secret::Word(_) => GameMode::Word,
            Secret::Question(_) => GameMode::Question,
        }
    }
}

/// What one player is shown when they look at the device.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum SecretCard {
    /// Crew member in word mode.
    Word { word: String },
    /// Imposter in word mode: only the category is revealed.
    Imposter { category: String },
    /// Any player in question mode; imposters get the imposter prompt.
    Question { question: String },
}

/// One play of the game, from secret assignment through vote resolution.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number within the room.
    pub number: u32,
    pub mode: GameMode,
    pub category: String,
    pub secret: Secret,
    pub imposter_ids: Vec<PlayerId>,
    /// Roster order at build time; the reveal cursor walks this.
    pub player_order: Vec<PlayerId>,
    /// Question mode: one entry per player, None until answered. Word mode: empty.
    pub answers: HashMap<PlayerId, Option<String>>,
    pub reveal_cursor: usize,
    pub started_at: DateTime<Utc>,
}

impl Round {
    pub fn is_imposter(&self, player_id: PlayerId) -> bool {
        self.imposter_ids.contains(&player_id)
    }

    /// The card shown to `player_id`, or None if they are not in this round.
    pub fn card_for(&self, player_id: PlayerId) -> Option<SecretCard> {
        if !self.player_order.contains(&player_id) {
            return None;
        }
        let imposter = self.is_imposter(player_id);
        let card = match (&self.secret, imposter) {
            (Secret::Word(_), true) => SecretCard::Imposter {
                category: self.category.clone(),
            },
            (Secret::Word(word), false) => SecretCard::Word { word: word.clone() },
            (Secret::Question(pair), true) => SecretCard::Question {
                question: pair.imposter.clone(),
            },
            (Secret::Question(pair), false) => SecretCard::Question {
                question: pair.real.clone(),
            },
        };
        Some(card)
    }

    /// Pass-the-device: next player whose turn it is to look, advancing the cursor.
    pub fn reveal_next(&mut self) -> Option<PlayerId> {
        let id = self.player_order.get(self.reveal_cursor).copied()?;
        self.reveal_cursor += 1;
        Some(id)
    }

    pub fn reveal_finished(&self) -> bool {
        self.reveal_cursor >= self.player_order.len()
    }

    /// Record an answer (question mode only). Returns false if the player is not in the round.
    pub fn record_answer(&mut self, player_id: PlayerId, answer: impl Into<String>) -> bool {
        match self.answers.get_mut(&player_id) {
            Some(slot) => {
                *slot = Some(answer.into());
                true
            }
            None => false,
        }
    }

    /// True when every player has answered (always false in word mode).
    pub fn all_answered(&self) -> bool {
        !self.answers.is_empty() && self.answers.values().all(Option::is_some)
    }
}
