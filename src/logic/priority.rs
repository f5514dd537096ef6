//! Selection queue: who most deserves a court slot.

use crate::logic::stats::{player_stats, PlayerStats};
use crate::logic::tie_break::TieBreak;
use crate::models::{Player, Round};
use std::cmp::Ordering;

/// A player with the values they are ranked by.
#[derive(Clone, Copy, Debug)]
pub struct Ranked<'a> {
    pub player: &'a Player,
    pub stats: PlayerStats,
    pub tie_break: f64,
}

impl Ranked<'_> {
    /// Fewer matches first, then longer rest, then higher tie-break.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.stats
            .played_count
            .cmp(&other.stats.played_count)
            .then_with(|| other.stats.rest_rounds.cmp(&self.stats.rest_rounds))
            .then_with(|| other.tie_break.total_cmp(&self.tie_break))
    }
}

/// Rank `players` by priority. One draw is taken per player, in roster order.
pub fn priority_queue<'a, D: TieBreak + ?Sized>(
    players: &[&'a Player],
    history: &[Round],
    draw: &mut D,
) -> Vec<Ranked<'a>> {
    let mut queue: Vec<Ranked<'a>> = players
        .iter()
        .map(|&player| Ranked {
            player,
            stats: player_stats(&player.name, history),
            tie_break: draw.draw(),
        })
        .collect();
    queue.sort_by(Ranked::priority_cmp);
    queue
}
