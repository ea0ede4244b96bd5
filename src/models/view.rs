//! Per-player views of a room (for API responses). Hides what the viewer must not see.

use crate::models::outcome::RoundOutcome;
use crate::models::player::{Player, PlayerId, Vote};
use crate::models::room::{Room, RoomId, RoomPhase, RoomSettings};
use crate::models::round::{GameMode, Secret, SecretCard};
use serde::{Deserialize, Serialize};

/// One roster entry as seen by the viewer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub has_seen_secret: bool,
    pub has_voted: bool,
    pub has_answered: bool,
    pub score: u32,
    /// Known for the viewer themself, and for everyone once results are in.
    pub is_imposter: Option<bool>,
    /// Visible from Voting onwards.
    pub answer: Option<String>,
    /// Visible in Results only.
    pub vote: Option<Vote>,
}

impl PlayerSummary {
    fn from_player(p: &Player, room: &Room, viewer: PlayerId) -> Self {
        let revealed = room.phase == RoomPhase::Results;
        let answers_open = matches!(room.phase, RoomPhase::Voting | RoomPhase::Results);
        Self {
            id: p.id,
            name: p.name.clone(),
            is_host: room.is_host(p.id),
            is_ready: p.is_ready,
            has_seen_secret: p.has_seen_secret,
            has_voted: p.has_voted(),
            has_answered: p.answer.is_some(),
            score: p.score,
            is_imposter: (revealed || p.id == viewer).then_some(p.is_imposter),
            answer: if answers_open || p.id == viewer {
                p.answer.clone()
            } else {
                None
            },
            vote: if revealed || p.id == viewer { p.vote } else { None },
        }
    }
}

/// The current round as seen by the viewer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub number: u32,
    pub mode: GameMode,
    pub category: String,
    /// The viewer's own card.
    pub card: Option<SecretCard>,
    /// The full secret, Results only.
    pub secret: Option<Secret>,
}

/// Room state as returned to one player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub me: PlayerId,
    pub host_id: PlayerId,
    pub phase: RoomPhase,
    pub settings: RoomSettings,
    pub rounds_played: u32,
    pub players: Vec<PlayerSummary>,
    pub round: Option<RoundView>,
    pub outcome: Option<RoundOutcome>,
}

impl RoomView {
    pub fn for_player(room: &Room, viewer: PlayerId) -> Self {
        let revealed = room.phase == RoomPhase::Results;
        let round = room.round.as_ref().map(|r| RoundView {
            number: r.number,
            mode: r.mode,
            category: r.category.clone(),
            card: r.card_for(viewer),
            secret: revealed.then(|| r.secret.clone()),
        });
        Self {
            id: room.id,
            me: viewer,
            host_id: room.host_id,
            phase: room.phase,
            settings: room.settings.clone(),
            rounds_played: room.rounds_played,
            players: room
                .players
                .iter()
                .map(|p| PlayerSummary::from_player(p, room, viewer))
                .collect(),
            round,
            outcome: if revealed { room.outcome.clone() } else { None },
        }
    }
}

impl Room {
    /// What `viewer` is allowed to see of this room.
    pub fn view_for(&self, viewer: PlayerId) -> RoomView {
        RoomView::for_player(self, viewer)
    }
}
