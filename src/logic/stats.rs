//! Play statistics derived from match history.
//!
//! History identifies players by name. Every name lookup goes through
//! [`player_stats`] and [`play_counts`]; two roster players sharing a name
//! share their statistics.

use crate::models::{Round, Side};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Rest value for a player who has never played. Ranks above any real value.
pub const REST_SENTINEL: u32 = 999;

/// What the priority step needs to know about one player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerStats {
    /// Matches (across all rounds) this name appears in.
    pub played_count: u32,
    /// Index of the most recent round this name appears in.
    pub last_round_index: Option<usize>,
    /// Rounds elapsed since last appearing (inclusive), or [`REST_SENTINEL`].
    pub rest_rounds: u32,
}

/// Statistics for `name` over `history` (oldest round first).
pub fn player_stats(name: &str, history: &[Round]) -> PlayerStats {
    let mut played_count = 0;
    let mut last_round_index = None;
    for (index, round) in history.iter().enumerate() {
        let in_round = round.matches.iter().filter(|m| m.includes(name)).count() as u32;
        if in_round > 0 {
            played_count += in_round;
            last_round_index = Some(index);
        }
    }
    let rest_rounds = match last_round_index {
        Some(index) => (history.len() - index) as u32,
        None => REST_SENTINEL,
    };
    PlayerStats {
        played_count,
        last_round_index,
        rest_rounds,
    }
}

/// Per-name summary for display.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PlayCount {
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub last_played: Option<DateTime<Utc>>,
}

/// Matches played, wins and losses for every name in `history`.
pub fn play_counts(history: &[Round]) -> HashMap<String, PlayCount> {
    let mut counts: HashMap<String, PlayCount> = HashMap::new();
    for m in history.iter().flat_map(|r| r.matches.iter()) {
        for (pos, name) in m.player_names.iter().enumerate() {
            let entry = counts.entry(name.clone()).or_default();
            entry.played += 1;
            entry.last_played = entry.last_played.max(Some(m.started_at));
            let side = if pos < 2 { Side::TeamA } else { Side::TeamB };
            match m.winner {
                Some(w) if w == side => entry.wins += 1,
                Some(_) => entry.losses += 1,
                None => {}
            }
        }
    }
    counts
}
