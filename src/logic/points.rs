//! Points: one per winning-side player, plus the imposter word-guess bonus.

use crate::models::{Player, PlayerId, PointsMap, Round, Secret, VoteResult};

/// Points earned this round. Winning side gets 1 each, everyone else 0.
pub fn points_for(players: &[Player], result: &VoteResult) -> PointsMap {
    players
        .iter()
        .map(|p| {
            let is_imposter = result.imposter_ids.contains(&p.id);
            let won = is_imposter == result.imposter_wins;
            (p.id, u32::from(won))
        })
        .collect()
}

/// Whether `guess` matches the round's secret word (trimmed, case-insensitive).
/// Always false in question mode.
pub fn is_correct_word_guess(round: &Round, guess: &str) -> bool {
    match &round.secret {
        Secret::Word(word) => {
            let guess = guess.trim();
            !guess.is_empty() && guess.to_lowercase() == word.trim().to_lowercase()
        }
        Secret::Question(_) => false,
    }
}

/// Apply the word-guess bonus: +1 to `player_id` if they are an imposter and guessed right.
/// Returns whether the bonus was awarded.
pub fn award_word_guess(
    points: &mut PointsMap,
    round: &Round,
    player_id: PlayerId,
    guess: &str,
) -> bool {
    if !round.is_imposter(player_id) || !is_correct_word_guess(round, guess) {
        return false;
    }
    *points.entry(player_id).or_insert(0) += 1;
    true
}
