//! Match history: rounds of matches, grouped by start time.

use crate::models::court::Side;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A match played on a court. Players are recorded by name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub court_name: String,
    /// Names in slot order: team A first, then team B.
    pub player_names: Vec<String>,
    pub started_at: DateTime<Utc>,
    /// None until a result is recorded.
    #[serde(default)]
    pub winner: Option<Side>,
}

impl MatchRecord {
    pub fn new(court_name: impl Into<String>, player_names: Vec<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            court_name: court_name.into(),
            player_names,
            started_at,
            winner: None,
        }
    }

    pub fn includes(&self, name: &str) -> bool {
        self.player_names.iter().any(|n| n == name)
    }
}

/// Matches that started within one grouping window of each other.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub sequence: u32,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl Round {
    pub fn new(sequence: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            sequence,
            started_at,
            matches: Vec::new(),
        }
    }
}

/// Chronological list of rounds, oldest first. Append/amend only.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    rounds: Vec<Round>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Append a match. Joins the latest round if it started less than `window`
    /// before `started_at`, otherwise opens a new round.
    pub fn record_match(
        &mut self,
        court_name: impl Into<String>,
        player_names: Vec<String>,
        started_at: DateTime<Utc>,
        window: Duration,
    ) {
        let record = MatchRecord::new(court_name, player_names, started_at);
        if let Some(round) = self
            .rounds
            .last_mut()
            .filter(|r| started_at - r.started_at < window)
        {
            round.matches.push(record);
            return;
        }
        let sequence = self.rounds.last().map_or(1, |r| r.sequence + 1);
        log::info!("Opening round {} at {}", sequence, started_at);
        let mut round = Round::new(sequence, started_at);
        round.matches.push(record);
        self.rounds.push(round);
    }

    /// Record the winner of the most recent unfinished match on `court_name`.
    /// Returns false if there is no such match.
    pub fn set_winner(&mut self, court_name: &str, winner: Side) -> bool {
        let found = self
            .rounds
            .iter_mut()
            .rev()
            .flat_map(|r| r.matches.iter_mut().rev())
            .find(|m| m.court_name == court_name && m.winner.is_none());
        match found {
            Some(m) => {
                m.winner = Some(winner);
                true
            }
            None => false,
        }
    }
}
