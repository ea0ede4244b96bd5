//! Round outcome: vote tally and points awarded.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Points earned this round, per player.
pub type PointsMap = HashMap<PlayerId, u32>;

/// Derived result of a finished vote. Never stored on its own, always recomputable.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    /// Votes received per candidate (skips excluded).
    pub votes: HashMap<PlayerId, u32>,
    pub skipped_votes: u32,
    /// Always `skipped_votes + votes.values().sum()`.
    pub total_votes: u32,
    pub eliminated: Option<PlayerId>,
    pub tie: bool,
    pub imposter_wins: bool,
    pub imposter_ids: Vec<PlayerId>,
}

impl VoteResult {
    pub fn crew_wins(&self) -> bool {
        !self.imposter_wins
    }

    pub fn votes_for(&self, player_id: PlayerId) -> u32 {
        self.votes.get(&player_id).copied().unwrap_or(0)
    }
}

/// Everything shown on the results screen for one round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub result: VoteResult,
    pub points: PointsMap,
    /// Imposters who have already used their word guess.
    pub guessed: Vec<PlayerId>,
    /// Imposters whose guess matched the secret word.
    pub correct_guesses: Vec<PlayerId>,
}
