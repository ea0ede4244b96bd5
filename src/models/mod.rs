//! Data structures for the party game: players, rounds, rooms and outcomes.

mod outcome;
mod player;
mod room;
mod round;
mod view;

pub use outcome::{PointsMap, RoundOutcome, VoteResult};
pub use player::{Player, PlayerId, Vote};
pub use room::{Room, RoomError, RoomId, RoomPhase, RoomSettings, MIN_PLAYERS};
pub use round::{
    GameMode, QuestionPair, Round, Secret, SecretCard, PLACEHOLDER_IMPOSTER_QUESTION,
    PLACEHOLDER_WORD,
};
pub use view::{PlayerSummary, RoomView, RoundView};
