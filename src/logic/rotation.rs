//! Session-level operations: run an allocation over a session and report standings.

use crate::logic::allocate::allocate;
use crate::logic::random::allocate_random;
use crate::logic::stats::{play_counts, player_stats};
use crate::logic::tie_break::TieBreak;
use crate::models::{Player, PlayerId, Session};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

/// Replace the session's courts with a smart allocation.
pub fn allocate_courts<D: TieBreak + ?Sized>(session: &mut Session, draw: &mut D) {
    session.normalize_courts();
    session.courts = allocate(
        &session.players,
        &session.courts,
        session.history.rounds(),
        draw,
    );
    log_filled(session, "smart");
}

/// Replace the session's courts with a random allocation.
pub fn allocate_courts_random<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) {
    session.normalize_courts();
    session.courts = allocate_random(&session.players, &session.courts, rng);
    log_filled(session, "random");
}

fn log_filled(session: &Session, mode: &str) {
    let filled = session
        .courts
        .iter()
        .filter(|c| !c.is_playing() && c.player_ids.is_full())
        .count();
    log::info!("Session {}: {} allocation filled {} court(s)", session.id, mode, filled);
}

/// One roster player's standing, for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub level: i32,
    pub is_active: bool,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub rest_rounds: u32,
    pub last_played: Option<DateTime<Utc>>,
}

/// Standings for every roster player, fewest matches first (ties by name).
pub fn standings(session: &Session) -> Vec<PlayerStanding> {
    let rounds = session.history.rounds();
    let counts = play_counts(rounds);
    let mut out: Vec<PlayerStanding> = session
        .players
        .iter()
        .map(|p: &Player| {
            let stats = player_stats(&p.name, rounds);
            let count = counts.get(&p.name).cloned().unwrap_or_default();
            PlayerStanding {
                id: p.id,
                name: p.name.clone(),
                level: p.level,
                is_active: p.is_active,
                played: stats.played_count,
                wins: count.wins,
                losses: count.losses,
                rest_rounds: stats.rest_rounds,
                last_played: count.last_played,
            }
        })
        .collect();
    out.sort_by(|a, b| a.played.cmp(&b.played).then_with(|| a.name.cmp(&b.name)));
    out
}
