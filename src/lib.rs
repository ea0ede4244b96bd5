//! Find-the-imposter party game: library with models, round building, vote resolution and room phases.

pub mod categories;
pub mod logic;
pub mod models;

pub use categories::{CategoryError, CategoryStore, SecretSource};
pub use logic::{
    all_answered, award_word_guess, build_numbered_round, build_round, cast_vote,
    clamp_imposter_count, close_voting, detect_random_source, is_correct_word_guess, mark_seen,
    max_imposters, open_voting, pick_secret, points_for, resolve_votes, return_to_lobby,
    shuffled_indices, start_round, submit_answer, submit_imposter_guess, PseudoRandom,
    RandomSource, SecureRandom,
};
pub use models::{
    GameMode, Player, PlayerId, PlayerSummary, PointsMap, QuestionPair, Room, RoomError, RoomId,
    RoomPhase, RoomSettings, RoomView, Round, RoundOutcome, RoundView, Secret, SecretCard, Vote,
    VoteResult, MIN_PLAYERS, PLACEHOLDER_IMPOSTER_QUESTION, PLACEHOLDER_WORD,
};
