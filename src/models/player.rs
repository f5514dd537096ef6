//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in court slots and lookups).
pub type PlayerId = Uuid;

/// A player on the session roster.
///
/// History refers to players by `name`, not by `id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Present for this session; inactive players are never allocated.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Skill rating, used for distribution and team balance.
    pub level: i32,
}

fn default_active() -> bool {
    true
}

impl Player {
    /// Create a new active player with the given name and level.
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
            level,
        }
    }

    /// Same player, marked inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
