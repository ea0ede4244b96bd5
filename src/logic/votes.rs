//! Vote resolution: tally, elimination, tie detection and the winning side.

use crate::models::{Player, PlayerId, Vote, VoteResult};
use std::collections::HashMap;

/// Resolve the final votes of a round.
///
/// The candidate with the strictly highest count is eliminated. Skips compete
/// as their own bucket: a tie at the top (between players, or a player and the
/// skips) eliminates nobody and sets `tie`; skips strictly ahead eliminate
/// nobody without a tie. Crew wins only when an imposter is eliminated.
pub fn resolve_votes(players: &[Player]) -> VoteResult {
    let mut votes: HashMap<PlayerId, u32> = HashMap::new();
    let mut skipped_votes = 0u32;
    for vote in players.iter().filter_map(|p| p.vote) {
        match vote {
            Vote::Player(target) => *votes.entry(target).or_insert(0) += 1,
            Vote::Skip => skipped_votes += 1,
        }
    }
    let total_votes = skipped_votes + votes.values().sum::<u32>();

    let max = votes.values().copied().max().unwrap_or(0);
    let leaders: Vec<PlayerId> = votes
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(&id, _)| id)
        .collect();

    let (eliminated, tie) = if max == 0 || skipped_votes > max {
        (None, false)
    } else if skipped_votes == max || leaders.len() > 1 {
        (None, true)
    } else {
        (leaders.first().copied(), false)
    };

    let imposter_ids: Vec<PlayerId> = players
        .iter()
        .filter(|p| p.is_imposter)
        .map(|p| p.id)
        .collect();

    let crew_wins = !tie && eliminated.is_some_and(|id| imposter_ids.contains(&id));

    log::debug!(
        "Resolved {} vote(s) ({} skipped): eliminated {:?}, tie {}, imposters win {}",
        total_votes,
        skipped_votes,
        eliminated,
        tie,
        !crew_wins
    );

    VoteResult {
        votes,
        skipped_votes,
        total_votes,
        eliminated,
        tie,
        imposter_wins: !crew_wins,
        imposter_ids,
    }
}
