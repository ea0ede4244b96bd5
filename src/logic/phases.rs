//! Room phase transitions: Lobby -> Playing -> Voting -> Results -> (Lobby | Playing).

use crate::categories::SecretSource;
use crate::logic::points::{award_word_guess, points_for};
use crate::logic::rng::RandomSource;
use crate::logic::round_builder::{build_numbered_round, clamp_imposter_count};
use crate::logic::votes::resolve_votes;
use crate::models::{
    GameMode, PlayerId, Room, RoomError, RoomPhase, RoundOutcome, Vote, MIN_PLAYERS,
};

/// Start a new round (host only, from Lobby or Results).
///
/// Needs at least 3 players. Starting from the lobby after a round has been
/// played also needs everyone ready. The configured imposter count is clamped
/// to the legal maximum for the current roster.
pub fn start_round(
    room: &mut Room,
    actor: PlayerId,
    source: &dyn SecretSource,
    rng: &mut dyn RandomSource,
) -> Result<(), RoomError> {
    room.require_host(actor)?;
    if !matches!(room.phase, RoomPhase::Lobby | RoomPhase::Results) {
        return Err(RoomError::InvalidState);
    }
    if room.players.len() < MIN_PLAYERS {
        return Err(RoomError::NotEnoughPlayers {
            required: MIN_PLAYERS,
        });
    }
    if room.phase == RoomPhase::Lobby && room.rounds_played > 0 && !room.all_ready() {
        return Err(RoomError::PlayersNotReady);
    }

    let imposter_count = clamp_imposter_count(room.settings.imposter_count, room.players.len());
    let round = build_numbered_round(
        room.rounds_played + 1,
        &room.player_ids(),
        room.settings.mode,
        imposter_count as u32,
        &room.settings.category,
        source,
        rng,
    );

    for p in &mut room.players {
        p.reset_round_state();
        p.is_imposter = round.is_imposter(p.id);
    }
    room.round = Some(round);
    room.outcome = None;
    room.phase = RoomPhase::Playing;
    Ok(())
}

/// Record that a player has looked at their secret card (Playing only).
pub fn mark_seen(room: &mut Room, player_id: PlayerId) -> Result<(), RoomError> {
    room.require_phase(RoomPhase::Playing)?;
    let p = room
        .player_mut(player_id)
        .ok_or(RoomError::PlayerNotFound(player_id))?;
    p.has_seen_secret = true;
    Ok(())
}

/// Submit or replace a player's answer (question mode, Playing only).
/// Returns true once every player has answered.
pub fn submit_answer(
    room: &mut Room,
    player_id: PlayerId,
    answer: &str,
) -> Result<bool, RoomError> {
    room.require_phase(RoomPhase::Playing)?;
    if room.settings.mode != GameMode::Question {
        return Err(RoomError::WrongMode);
    }
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(RoomError::EmptyAnswer);
    }
    let round = room.round.as_mut().ok_or(RoomError::InvalidState)?;
    if round.mode != GameMode::Question {
        return Err(RoomError::WrongMode);
    }
    if !round.record_answer(player_id, answer) {
        return Err(RoomError::PlayerNotFound(player_id));
    }
    let all_answered = round.all_answered();
    let p = room
        .player_mut(player_id)
        .ok_or(RoomError::PlayerNotFound(player_id))?;
    p.answer = Some(answer.to_string());
    Ok(all_answered)
}

/// True when the current round is in question mode and everyone has answered.
pub fn all_answered(room: &Room) -> bool {
    room.round.as_ref().is_some_and(|r| r.all_answered())
}

/// Move from Playing to Voting (host only).
pub fn open_voting(room: &mut Room, actor: PlayerId) -> Result<(), RoomError> {
    room.require_host(actor)?;
    room.require_phase(RoomPhase::Playing)?;
    room.phase = RoomPhase::Voting;
    Ok(())
}

/// Cast a player's single vote for this round (Voting only).
///
/// When the last vote lands the round is resolved and the room moves to
/// Results. Returns whether that happened.
pub fn cast_vote(room: &mut Room, voter: PlayerId, vote: Vote) -> Result<bool, RoomError> {
    room.require_phase(RoomPhase::Voting)?;
    if let Vote::Player(target) = vote {
        if target == voter || room.player(target).is_none() {
            return Err(RoomError::InvalidVoteTarget);
        }
    }
    let p = room
        .player_mut(voter)
        .ok_or(RoomError::PlayerNotFound(voter))?;
    if p.has_voted() {
        return Err(RoomError::AlreadyVoted);
    }
    p.vote = Some(vote);

    if room.all_voted() {
        resolve_round(room);
        return Ok(true);
    }
    Ok(false)
}

/// Force voting closed (host only). Missing votes count as not cast.
pub fn close_voting(room: &mut Room, actor: PlayerId) -> Result<(), RoomError> {
    room.require_host(actor)?;
    room.require_phase(RoomPhase::Voting)?;
    resolve_round(room);
    Ok(())
}

/// Compute outcome and points, credit scores, move to Results.
/// Only reachable from Voting, so each round is resolved exactly once.
fn resolve_round(room: &mut Room) {
    let result = resolve_votes(&room.players);
    let points = points_for(&room.players, &result);
    for p in &mut room.players {
        p.add_points(points.get(&p.id).copied().unwrap_or(0));
    }
    log::info!(
        "Room {} round {} resolved: {}",
        room.id,
        room.rounds_played + 1,
        if result.imposter_wins { "imposters win" } else { "crew wins" }
    );
    room.outcome = Some(RoundOutcome {
        result,
        points,
        guessed: Vec::new(),
        correct_guesses: Vec::new(),
    });
    room.rounds_played += 1;
    room.phase = RoomPhase::Results;
}

/// An imposter's one guess at the secret word (word mode, Results only).
/// A correct guess earns one extra point. Returns whether it was correct.
pub fn submit_imposter_guess(
    room: &mut Room,
    player_id: PlayerId,
    guess: &str,
) -> Result<bool, RoomError> {
    room.require_phase(RoomPhase::Results)?;
    let round = room.round.as_ref().ok_or(RoomError::InvalidState)?;
    if round.mode != GameMode::Word {
        return Err(RoomError::WrongMode);
    }
    if room.player(player_id).is_none() {
        return Err(RoomError::PlayerNotFound(player_id));
    }
    if !round.is_imposter(player_id) {
        return Err(RoomError::NotImposter);
    }
    let outcome = room.outcome.as_mut().ok_or(RoomError::InvalidState)?;
    if outcome.guessed.contains(&player_id) {
        return Err(RoomError::AlreadyGuessed);
    }
    outcome.guessed.push(player_id);
    let correct = award_word_guess(&mut outcome.points, round, player_id, guess);
    if correct {
        outcome.correct_guesses.push(player_id);
        if let Some(p) = room.player_mut(player_id) {
            p.add_points(1);
        }
    }
    Ok(correct)
}

/// Go back to the lobby after a round (host only). Clears round state and readiness.
pub fn return_to_lobby(room: &mut Room, actor: PlayerId) -> Result<(), RoomError> {
    room.require_host(actor)?;
    room.require_phase(RoomPhase::Results)?;
    for p in &mut room.players {
        p.reset_round_state();
        p.is_ready = false;
    }
    room.round = None;
    room.outcome = None;
    room.phase = RoomPhase::Lobby;
    Ok(())
}
