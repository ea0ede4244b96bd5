//! Round construction: pick the secret, choose imposters, initialize answer and reveal state.

use crate::categories::SecretSource;
use crate::logic::rng::{shuffled_indices, RandomSource};
use crate::models::{GameMode, PlayerId, QuestionPair, Round, Secret, PLACEHOLDER_WORD};
use chrono::Utc;
use std::collections::HashMap;

/// Largest legal imposter count for `n` players: crew always keeps a majority.
pub fn max_imposters(player_count: usize) -> usize {
    (player_count.saturating_sub(1) / 2).max(1)
}

/// Clamp a requested imposter count to `1..=max_imposters(n)`.
pub fn clamp_imposter_count(requested: u32, player_count: usize) -> usize {
    (requested as usize).clamp(1, max_imposters(player_count))
}

/// Pick the secret for a round. Empty or missing pools fall back to the placeholder.
pub fn pick_secret(
    mode: GameMode,
    category: &str,
    source: &dyn SecretSource,
    rng: &mut dyn RandomSource,
) -> Secret {
    match mode {
        GameMode::Word => {
            let word = source
                .words(category)
                .filter(|words| !words.is_empty())
                .map(|words| words[rng.below(words.len())].clone())
                .unwrap_or_else(|| {
                    log::debug!("No words for category '{}', using placeholder", category);
                    PLACEHOLDER_WORD.to_string()
                });
            Secret::Word(word)
        }
        GameMode::Question => {
            let pair = source
                .questions(category)
                .filter(|pool| !pool.is_empty())
                .map(|pool| pool[rng.below(pool.len())].clone())
                .unwrap_or_else(|| {
                    log::debug!("No questions for category '{}', using placeholder", category);
                    QuestionPair::placeholder()
                });
            Secret::Question(pair)
        }
    }
}

/// Build a new round for `players` (in roster order).
///
/// `imposter_count` is raised to at least 1 and capped at the number of
/// players; clamping to the legal maximum is the caller's job (see
/// [`clamp_imposter_count`]). Never fails.
pub fn build_round(
    players: &[PlayerId],
    mode: GameMode,
    imposter_count: u32,
    category: &str,
    source: &dyn SecretSource,
    rng: &mut dyn RandomSource,
) -> Round {
    build_numbered_round(1, players, mode, imposter_count, category, source, rng)
}

/// Same as [`build_round`], with an explicit round number.
pub fn build_numbered_round(
    number: u32,
    players: &[PlayerId],
    mode: GameMode,
    imposter_count: u32,
    category: &str,
    source: &dyn SecretSource,
    rng: &mut dyn RandomSource,
) -> Round {
    let secret = pick_secret(mode, category, source, rng);

    let k = (imposter_count.max(1) as usize).min(players.len());
    let imposter_ids: Vec<PlayerId> = shuffled_indices(players.len(), rng)
        .into_iter()
        .take(k)
        .map(|i| players[i])
        .collect();

    let answers: HashMap<PlayerId, Option<String>> = match mode {
        GameMode::Question => players.iter().map(|&id| (id, None)).collect(),
        GameMode::Word => HashMap::new(),
    };

    log::debug!(
        "Built round {} ({:?}, category '{}') with {} imposter(s) among {} players",
        number,
        mode,
        category,
        imposter_ids.len(),
        players.len()
    );

    Round {
        number,
        mode,
        category: category.to_string(),
        secret,
        imposter_ids,
        player_order: players.to_vec(),
        answers,
        reveal_cursor: 0,
        started_at: Utc::now(),
    }
}
