//! Court, CourtStatus and the fixed four-slot CourtSlots.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// Number of slots on a court (two teams of two).
pub const SLOTS_PER_COURT: usize = 4;

/// Whether a court is open for assignment or locked by a match in progress.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtStatus {
    #[default]
    Allocating,
    Playing,
}

/// One side of a court.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Slots 0 and 1.
    TeamA,
    /// Slots 2 and 3.
    TeamB,
}

/// Exactly four ordered slots. Slots {0,1} are team A, slots {2,3} are team B.
///
/// Deserializes from any JSON array; arrays that are not four long are reset to
/// four empty slots.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<PlayerId>>", into = "Vec<Option<PlayerId>>")]
pub struct CourtSlots([Option<PlayerId>; SLOTS_PER_COURT]);

impl CourtSlots {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(slots: [Option<PlayerId>; SLOTS_PER_COURT]) -> Self {
        Self(slots)
    }

    /// Fill the first `ids.len()` slots in order; extra ids are ignored.
    pub fn from_prefix(ids: &[PlayerId]) -> Self {
        let mut slots = [None; SLOTS_PER_COURT];
        for (slot, id) in slots.iter_mut().zip(ids) {
            *slot = Some(*id);
        }
        Self(slots)
    }

    pub fn get(&self, index: usize) -> Option<PlayerId> {
        self.0.get(index).copied().flatten()
    }

    pub fn as_array(&self) -> &[Option<PlayerId>; SLOTS_PER_COURT] {
        &self.0
    }

    pub fn team_a(&self) -> [Option<PlayerId>; 2] {
        [self.0[0], self.0[1]]
    }

    pub fn team_b(&self) -> [Option<PlayerId>; 2] {
        [self.0[2], self.0[3]]
    }

    /// Occupied ids in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.iter().flatten().copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.0.contains(&Some(id))
    }

    /// Empty any slot whose id fails `keep`. Returns how many slots were emptied.
    pub fn retain(&mut self, mut keep: impl FnMut(PlayerId) -> bool) -> usize {
        let mut removed = 0;
        for slot in self.0.iter_mut() {
            if let Some(id) = *slot {
                if !keep(id) {
                    *slot = None;
                    removed += 1;
                }
            }
        }
        removed
    }
}

impl From<Vec<Option<PlayerId>>> for CourtSlots {
    fn from(v: Vec<Option<PlayerId>>) -> Self {
        match <[Option<PlayerId>; SLOTS_PER_COURT]>::try_from(v) {
            Ok(slots) => Self(slots),
            Err(v) => {
                log::warn!(
                    "Court slots had {} entries instead of {}; resetting to empty",
                    v.len(),
                    SLOTS_PER_COURT
                );
                Self::empty()
            }
        }
    }
}

impl From<CourtSlots> for Vec<Option<PlayerId>> {
    fn from(slots: CourtSlots) -> Self {
        slots.0.to_vec()
    }
}

/// A physical court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    /// Display name; also the key match history is recorded under.
    pub name: String,
    #[serde(default)]
    pub status: CourtStatus,
    #[serde(default)]
    pub player_ids: CourtSlots,
}

impl Court {
    /// Create an open, empty court.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CourtStatus::Allocating,
            player_ids: CourtSlots::empty(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == CourtStatus::Playing
    }

    /// Same court with new slots, still open.
    pub fn with_slots(&self, player_ids: CourtSlots) -> Self {
        Self {
            player_ids,
            status: CourtStatus::Allocating,
            ..self.clone()
        }
    }

    /// Same court, open and emptied.
    pub fn reset(&self) -> Self {
        self.with_slots(CourtSlots::empty())
    }
}

/// Ids seated on playing courts.
pub fn locked_players(courts: &[Court]) -> HashSet<PlayerId> {
    courts
        .iter()
        .filter(|c| c.is_playing())
        .flat_map(|c| c.player_ids.occupied())
        .collect()
}
