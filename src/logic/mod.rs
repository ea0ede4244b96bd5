//! Game logic: randomness, round building, vote resolution, points and room phases.

mod phases;
mod points;
mod rng;
mod round_builder;
mod votes;

pub use phases::{
    all_answered, cast_vote, close_voting, mark_seen, open_voting, return_to_lobby, start_round,
    submit_answer, submit_imposter_guess,
};
pub use points::{award_word_guess, is_correct_word_guess, points_for};
pub use rng::{
    detect_random_source, shuffled_indices, PseudoRandom, RandomSource, SecureRandom,
};
pub use round_builder::{
    build_numbered_round, build_round, clamp_imposter_count, max_imposters, pick_secret,
};
pub use votes::resolve_votes;
