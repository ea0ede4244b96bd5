//! Room, RoomPhase, RoomSettings and RoomError.

use crate::models::outcome::RoundOutcome;
use crate::models::player::{Player, PlayerId};
use crate::models::round::{GameMode, Round};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum roster size to start a round.
pub const MIN_PLAYERS: usize = 3;

/// Errors that can occur during room operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoomError {
    /// Room is not in a phase that allows this action.
    InvalidState,
    /// Only the host may do this.
    NotHost,
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    EmptyName,
    NotEnoughPlayers { required: usize },
    /// After the first round, everyone must be ready before starting from the lobby.
    PlayersNotReady,
    AlreadyVoted,
    /// Vote names an unknown player or the voter themself.
    InvalidVoteTarget,
    EmptyAnswer,
    /// Action does not apply to the current game mode.
    WrongMode,
    NotImposter,
    AlreadyGuessed,
    HostCannotLeave,
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomError::InvalidState => write!(f, "Invalid state for this action"),
            RoomError::NotHost => write!(f, "Only the host can do that"),
            RoomError::PlayerNotFound(_) => write!(f, "Player not found"),
            RoomError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            RoomError::EmptyName => write!(f, "Name must not be empty"),
            RoomError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players to start", required)
            }
            RoomError::PlayersNotReady => write!(f, "Not all players are ready"),
            RoomError::AlreadyVoted => write!(f, "You have already voted this round"),
            RoomError::InvalidVoteTarget => write!(f, "You can only vote for another player"),
            RoomError::EmptyAnswer => write!(f, "Answer must not be empty"),
            RoomError::WrongMode => write!(f, "Not available in this game mode"),
            RoomError::NotImposter => write!(f, "Only an imposter can guess the word"),
            RoomError::AlreadyGuessed => write!(f, "You have already guessed this round"),
            RoomError::HostCannotLeave => write!(f, "The host cannot leave the room"),
        }
    }
}

impl std::error::Error for RoomError {}

/// Unique identifier for a room.
pub type RoomId = Uuid;

/// Current phase of the room. Cycles until the room is torn down.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomPhase {
    /// Joining, readiness and host configuration.
    #[default]
    Lobby,
    /// Players view their secret (and answer, in question mode).
    Playing,
    /// Each player casts one vote.
    Voting,
    /// Outcome and points are shown.
    Results,
}

fn default_category() -> String {
    "animals".to_string()
}

fn default_imposter_count() -> u32 {
    1
}

/// Host-controlled round settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoomSettings {
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default = "default_category")]
    pub category: String,
    /// Requested count; clamped to the legal maximum when a round starts.
    #[serde(default = "default_imposter_count")]
    pub imposter_count: u32,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            category: default_category(),
            imposter_count: default_imposter_count(),
        }
    }
}

/// Full room state: roster, settings, phase and the current round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub host_id: PlayerId,
    pub players: Vec<Player>,
    pub settings: RoomSettings,
    pub phase: RoomPhase,
    pub round: Option<Round>,
    /// Set when voting resolves; cleared when the next round starts.
    pub outcome: Option<RoundOutcome>,
    pub rounds_played: u32,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room in Lobby with the host as its only player.
    pub fn new(host_name: impl Into<String>) -> Result<Self, RoomError> {
        let host_name = host_name.into();
        let host_name = host_name.trim();
        if host_name.is_empty() {
            return Err(RoomError::EmptyName);
        }
        let host = Player::new(host_name);
        Ok(Self {
            id: Uuid::new_v4(),
            host_id: host.id,
            players: vec![host],
            settings: RoomSettings::default(),
            phase: RoomPhase::Lobby,
            round: None,
            outcome: None,
            rounds_played: 0,
            created_at: Utc::now(),
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn is_host(&self, id: PlayerId) -> bool {
        self.host_id == id
    }

    pub(crate) fn require_host(&self, id: PlayerId) -> Result<(), RoomError> {
        if !self.is_host(id) {
            return Err(RoomError::NotHost);
        }
        Ok(())
    }

    pub(crate) fn require_phase(&self, phase: RoomPhase) -> Result<(), RoomError> {
        if self.phase != phase {
            return Err(RoomError::InvalidState);
        }
        Ok(())
    }

    /// Add a player (Lobby only). Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, RoomError> {
        self.require_phase(RoomPhase::Lobby)?;
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(RoomError::EmptyName);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(RoomError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player (Lobby only). The host may remove anyone else; others may only leave.
    pub fn remove_player(&mut self, actor: PlayerId, player_id: PlayerId) -> Result<(), RoomError> {
        self.require_phase(RoomPhase::Lobby)?;
        if player_id == self.host_id {
            return Err(RoomError::HostCannotLeave);
        }
        if actor != player_id && !self.is_host(actor) {
            return Err(RoomError::NotHost);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(RoomError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Toggle readiness (Lobby only).
    pub fn set_ready(&mut self, player_id: PlayerId, ready: bool) -> Result<(), RoomError> {
        self.require_phase(RoomPhase::Lobby)?;
        let p = self
            .player_mut(player_id)
            .ok_or(RoomError::PlayerNotFound(player_id))?;
        p.is_ready = ready;
        Ok(())
    }

    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| p.is_ready)
    }

    /// Update mode, category and imposter count (host, Lobby only).
    pub fn configure(&mut self, actor: PlayerId, settings: RoomSettings) -> Result<(), RoomError> {
        self.require_host(actor)?;
        self.require_phase(RoomPhase::Lobby)?;
        let category = settings.category.trim();
        self.settings = RoomSettings {
            category: if category.is_empty() {
                default_category()
            } else {
                category.to_string()
            },
            imposter_count: settings.imposter_count.max(1),
            mode: settings.mode,
        };
        Ok(())
    }

    pub fn all_voted(&self) -> bool {
        self.players.iter().all(Player::has_voted)
    }
}
