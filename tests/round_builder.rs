//! Integration tests for round building: imposter selection, secrets, answers and reveal.

use imposter_party::{
    build_round, clamp_imposter_count, max_imposters, shuffled_indices, CategoryStore, GameMode,
    PlayerId, PseudoRandom, RandomSource, Secret, SecretCard, PLACEHOLDER_IMPOSTER_QUESTION,
    PLACEHOLDER_WORD,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Always returns the same value (clamped below `upper`).
struct Fixed(usize);

impl RandomSource for Fixed {
    fn below(&mut self, upper: usize) -> usize {
        self.0.min(upper.saturating_sub(1))
    }
}

fn ids(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn imposter_count_is_normalized_and_distinct() {
    let store = CategoryStore::builtin();
    let mut rng = PseudoRandom::seeded(7);
    for n in 3..=10 {
        let players = ids(n);
        for k in 0..=12u32 {
            let round = build_round(&players, GameMode::Word, k, "animals", &store, &mut rng);
            let expected = (k.max(1) as usize).min(n);
            assert_eq!(round.imposter_ids.len(), expected, "n={n} k={k}");
            let unique: HashSet<_> = round.imposter_ids.iter().collect();
            assert_eq!(unique.len(), expected);
            assert!(round.imposter_ids.iter().all(|id| players.contains(id)));
        }
    }
}

#[test]
fn imposter_selection_is_roughly_uniform() {
    let store = CategoryStore::builtin();
    let mut rng = PseudoRandom::seeded(42);
    let players = ids(5);
    let trials = 20_000;
    let mut counts: HashMap<PlayerId, u32> = HashMap::new();
    for _ in 0..trials {
        let round = build_round(&players, GameMode::Word, 2, "animals", &store, &mut rng);
        for id in round.imposter_ids {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    // Each player is picked with probability 2/5.
    let expected = trials as f64 * 2.0 / 5.0;
    for id in &players {
        let c = counts.get(id).copied().unwrap_or(0) as f64;
        assert!((c - expected).abs() < expected * 0.1, "count {c} vs expected {expected}");
    }
}

#[test]
fn fisher_yates_is_driven_by_the_random_source() {
    assert_eq!(shuffled_indices(4, &mut Fixed(0)), vec![1, 2, 3, 0]);
    assert_eq!(shuffled_indices(4, &mut Fixed(usize::MAX)), vec![0, 1, 2, 3]);
    assert!(shuffled_indices(0, &mut Fixed(0)).is_empty());
}

#[test]
fn shuffled_indices_is_a_permutation() {
    let mut rng = PseudoRandom::seeded(3);
    let mut perm = shuffled_indices(12, &mut rng);
    perm.sort_unstable();
    assert_eq!(perm, (0..12).collect::<Vec<_>>());
}

#[test]
fn legal_imposter_maximum_keeps_crew_majority() {
    assert_eq!(max_imposters(0), 1);
    assert_eq!(max_imposters(3), 1);
    assert_eq!(max_imposters(4), 1);
    assert_eq!(max_imposters(5), 2);
    assert_eq!(max_imposters(7), 3);
    assert_eq!(clamp_imposter_count(10, 7), 3);
    assert_eq!(clamp_imposter_count(0, 5), 1);
    assert_eq!(clamp_imposter_count(2, 6), 2);
}

#[test]
fn word_round_picks_from_category_and_has_no_answers() {
    let mut store = CategoryStore::new();
    store.add_word("colours", "teal");
    let players = ids(4);
    let round = build_round(&players, GameMode::Word, 1, "colours", &store, &mut Fixed(0));
    assert_eq!(round.secret, Secret::Word("teal".to_string()));
    assert_eq!(round.imposter_ids, vec![players[1]]);
    assert!(round.answers.is_empty());
    assert_eq!(round.reveal_cursor, 0);
    assert_eq!(round.player_order, players);
}

#[test]
fn question_round_starts_with_an_empty_answer_per_player() {
    let mut store = CategoryStore::new();
    store.add_question("habits", "How often do you run?", "How often do you swim?");
    let players = ids(5);
    let mut rng = PseudoRandom::seeded(11);
    let round = build_round(&players, GameMode::Question, 1, "habits", &store, &mut rng);
    assert_eq!(round.answers.len(), 5);
    assert!(round.answers.values().all(Option::is_none));
    assert!(!round.all_answered());

    let imposter = round.imposter_ids[0];
    let crew = *players.iter().find(|id| **id != imposter).unwrap();
    assert_eq!(
        round.card_for(imposter),
        Some(SecretCard::Question {
            question: "How often do you swim?".to_string()
        })
    );
    assert_eq!(
        round.card_for(crew),
        Some(SecretCard::Question {
            question: "How often do you run?".to_string()
        })
    );
}

#[test]
fn missing_category_falls_back_to_placeholder() {
    let store = CategoryStore::new();
    let players = ids(3);
    let mut rng = PseudoRandom::seeded(1);

    let word = build_round(&players, GameMode::Word, 1, "nope", &store, &mut rng);
    assert_eq!(word.secret, Secret::Word(PLACEHOLDER_WORD.to_string()));

    let question = build_round(&players, GameMode::Question, 1, "nope", &store, &mut rng);
    match question.secret {
        Secret::Question(pair) => {
            assert_eq!(pair.real, PLACEHOLDER_WORD);
            assert_eq!(pair.imposter, PLACEHOLDER_IMPOSTER_QUESTION);
        }
        other => panic!("expected question, got {other:?}"),
    }
}

#[test]
fn word_cards_hide_the_word_from_imposters() {
    let mut store = CategoryStore::new();
    store.add_word("food", "ramen");
    let players = ids(4);
    let round = build_round(&players, GameMode::Word, 1, "food", &store, &mut Fixed(0));
    assert_eq!(
        round.card_for(players[1]),
        Some(SecretCard::Imposter {
            category: "food".to_string()
        })
    );
    assert_eq!(
        round.card_for(players[0]),
        Some(SecretCard::Word {
            word: "ramen".to_string()
        })
    );
    assert_eq!(round.card_for(Uuid::new_v4()), None);
}

#[test]
fn reveal_cursor_walks_the_roster_once() {
    let store = CategoryStore::builtin();
    let players = ids(3);
    let mut round = build_round(&players, GameMode::Word, 1, "animals", &store, &mut Fixed(0));
    let mut seen = Vec::new();
    while let Some(id) = round.reveal_next() {
        seen.push(id);
    }
    assert_eq!(seen, players);
    assert!(round.reveal_finished());
    assert_eq!(round.reveal_next(), None);
}

#[test]
fn tiny_rosters_do_not_panic() {
    let store = CategoryStore::builtin();
    let mut rng = PseudoRandom::seeded(5);
    let none = build_round(&[], GameMode::Word, 3, "animals", &store, &mut rng);
    assert!(none.imposter_ids.is_empty());
    let one = ids(1);
    let single = build_round(&one, GameMode::Word, 3, "animals", &store, &mut rng);
    assert_eq!(single.imposter_ids, one);
}
