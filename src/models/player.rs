//! Player and Vote data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (stable for the lifetime of a room).
pub type PlayerId = Uuid;

/// A cast vote: another player, or an abstain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "target")]
pub enum Vote {
    Player(PlayerId),
    Skip,
}

impl Vote {
    /// Target player id, or None for a skip.
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            Vote::Player(id) => Some(*id),
            Vote::Skip => None,
        }
    }
}

/// A player in a room.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Round-scoped; reassigned every time a round is built.
    pub is_imposter: bool,
    /// None until the player votes this round.
    pub vote: Option<Vote>,
    pub is_ready: bool,
    pub has_seen_secret: bool,
    /// Free-text answer (question mode only).
    pub answer: Option<String>,
    /// Points accumulated across rounds in this room.
    pub score: u32,
}

impl Player {
    /// Create a new player with the given name. Other fields start at zero/false.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_imposter: false,
            vote: None,
            is_ready: false,
            has_seen_secret: false,
            answer: None,
            score: 0,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    /// Clear everything scoped to a single round (keeps id, name, score).
    pub fn reset_round_state(&mut self) {
        self.is_imposter = false;
        self.vote = None;
        self.has_seen_secret = false;
        self.answer = None;
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }
}
