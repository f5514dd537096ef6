//! Session: roster, courts, history and the bookkeeping around them.

use crate::models::court::{locked_players, Court, CourtId, CourtStatus, Side};
use crate::models::history::History;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Player not on the roster.
    PlayerNotFound(PlayerId),
    /// No court with this id.
    CourtNotFound(CourtId),
    /// Player or court name was blank.
    EmptyName,
    /// A court with this name already exists (names are unique, case-insensitive).
    DuplicateCourtName,
    /// Court is playing; it cannot be edited until finished.
    CourtLocked(CourtId),
    /// Player is seated on a playing court.
    PlayerOnCourt(PlayerId),
    /// Court needs four players to start.
    CourtNotFull(CourtId),
    /// Court is not in a state that allows this action.
    InvalidState,
    /// More courts requested than a session allows.
    TooManyCourts { max: usize },
    /// Roster import failed (row or parse error).
    Import(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::PlayerNotFound(_) => write!(f, "Player not found"),
            SessionError::CourtNotFound(_) => write!(f, "Court not found"),
            SessionError::EmptyName => write!(f, "Name must not be empty"),
            SessionError::DuplicateCourtName => write!(f, "A court with this name already exists"),
            SessionError::CourtLocked(_) => write!(f, "Court is in play"),
            SessionError::PlayerOnCourt(_) => write!(f, "Player is on a court in play"),
            SessionError::CourtNotFull(_) => write!(f, "Court needs 4 players to start"),
            SessionError::InvalidState => write!(f, "Invalid state for this action"),
            SessionError::TooManyCourts { max } => write!(f, "At most {} courts per session", max),
            SessionError::Import(msg) => write!(f, "Roster import failed: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Upper bound on courts created with a session.
pub const MAX_COURTS: usize = 64;

/// Tunables for a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Matches starting within this window of a round's start join that round.
    #[serde(with = "minutes")]
    pub round_window: Duration,
    /// Courts created with a new session.
    pub default_courts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_window: Duration::minutes(15),
            default_courts: 2,
        }
    }
}

impl SessionConfig {
    /// Same config with `courts` default courts, at most [`MAX_COURTS`].
    pub fn with_courts(self, courts: usize) -> Result<Self, SessionError> {
        if courts > MAX_COURTS {
            return Err(SessionError::TooManyCourts { max: MAX_COURTS });
        }
        Ok(Self {
            default_courts: courts,
            ..self
        })
    }
}

mod minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        i64::deserialize(d).map(Duration::minutes)
    }
}

/// Full session state: roster, courts in display order, and match history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub players: Vec<Player>,
    pub courts: Vec<Court>,
    #[serde(default)]
    pub history: History,
    pub config: SessionConfig,
}

impl Session {
    /// Create a session with `config.default_courts` empty courts named "Court 1", "Court 2", ...
    pub fn new(config: SessionConfig) -> Self {
        let courts = (1..=config.default_courts)
            .map(|n| Court::new(format!("Court {}", n)))
            .collect();
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            courts,
            history: History::new(),
            config,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, SessionError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SessionError::PlayerNotFound(id))
    }

    pub fn court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    pub fn get_court_mut(&mut self, id: CourtId) -> Result<&mut Court, SessionError> {
        self.courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))
    }

    /// Ids seated on playing courts.
    pub fn locked_player_ids(&self) -> HashSet<PlayerId> {
        locked_players(&self.courts)
    }

    /// Add a player. Returns the new player's id.
    pub fn add_player(&mut self, name: impl Into<String>, level: i32) -> Result<PlayerId, SessionError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let player = Player::new(name, level);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player from the roster and from any open court.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), SessionError> {
        if self.player(id).is_none() {
            return Err(SessionError::PlayerNotFound(id));
        }
        if self.locked_player_ids().contains(&id) {
            return Err(SessionError::PlayerOnCourt(id));
        }
        self.players.retain(|p| p.id != id);
        for court in &mut self.courts {
            court.player_ids.retain(|pid| pid != id);
        }
        Ok(())
    }

    /// Mark a player present or absent. Absent players are taken off open courts.
    pub fn set_player_active(&mut self, id: PlayerId, active: bool) -> Result<(), SessionError> {
        if !active && self.locked_player_ids().contains(&id) {
            return Err(SessionError::PlayerOnCourt(id));
        }
        self.get_player_mut(id)?.is_active = active;
        if !active {
            for court in self.courts.iter_mut().filter(|c| !c.is_playing()) {
                court.player_ids.retain(|pid| pid != id);
            }
        }
        Ok(())
    }

    pub fn set_player_level(&mut self, id: PlayerId, level: i32) -> Result<(), SessionError> {
        self.get_player_mut(id)?.level = level;
        Ok(())
    }

    /// Add an open court at the end of the list. Returns its id.
    /// Court names key match history, so they must be unique (case-insensitive).
    pub fn add_court(&mut self, name: impl Into<String>) -> Result<CourtId, SessionError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let is_duplicate = self
            .courts
            .iter()
            .any(|c| c.name.trim().eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(SessionError::DuplicateCourtName);
        }
        let court = Court::new(name);
        let id = court.id;
        self.courts.push(court);
        Ok(id)
    }

    pub fn remove_court(&mut self, id: CourtId) -> Result<(), SessionError> {
        let court = self.court(id).ok_or(SessionError::CourtNotFound(id))?;
        if court.is_playing() {
            return Err(SessionError::CourtLocked(id));
        }
        self.courts.retain(|c| c.id != id);
        Ok(())
    }

    /// Empty an open court.
    pub fn clear_court(&mut self, id: CourtId) -> Result<(), SessionError> {
        let court = self.get_court_mut(id)?;
        if court.is_playing() {
            return Err(SessionError::CourtLocked(id));
        }
        *court = court.reset();
        Ok(())
    }

    /// Lock a full open court and record the match in history.
    pub fn start_court(&mut self, id: CourtId, now: DateTime<Utc>) -> Result<(), SessionError> {
        let court = self.court(id).ok_or(SessionError::CourtNotFound(id))?;
        if court.is_playing() {
            return Err(SessionError::InvalidState);
        }
        if !court.player_ids.is_full() {
            return Err(SessionError::CourtNotFull(id));
        }
        let names = court
            .player_ids
            .occupied()
            .map(|pid| {
                self.player(pid)
                    .map(|p| p.name.clone())
                    .ok_or(SessionError::PlayerNotFound(pid))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let court_name = court.name.clone();
        let window = self.config.round_window;
        self.history.record_match(court_name.as_str(), names, now, window);
        self.get_court_mut(id)?.status = CourtStatus::Playing;
        log::info!("Court {} started", court_name);
        Ok(())
    }

    /// Finish a playing court: record the winner (if any), reopen and empty it.
    pub fn finish_court(&mut self, id: CourtId, winner: Option<Side>) -> Result<(), SessionError> {
        let court = self.court(id).ok_or(SessionError::CourtNotFound(id))?;
        if !court.is_playing() {
            return Err(SessionError::InvalidState);
        }
        let court_name = court.name.clone();
        if let Some(side) = winner {
            if !self.history.set_winner(&court_name, side) {
                log::warn!("No open match on {} to record a result for", court_name);
            }
        }
        let court = self.get_court_mut(id)?;
        *court = court.reset();
        log::info!("Court {} finished", court_name);
        Ok(())
    }

    /// Empty slots on open courts that point at players no longer on the roster.
    /// Playing courts are left untouched. Returns how many slots were repaired.
    pub fn normalize_courts(&mut self) -> usize {
        let known: HashSet<PlayerId> = self.players.iter().map(|p| p.id).collect();
        let repaired: usize = self
            .courts
            .iter_mut()
            .filter(|c| !c.is_playing())
            .map(|c| c.player_ids.retain(|pid| known.contains(&pid)))
            .sum();
        if repaired > 0 {
            log::warn!("Repaired {} court slot(s) referencing unknown players", repaired);
        }
        repaired
    }
}
