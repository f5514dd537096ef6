//! Random assignment mode: same court contract as smart allocation, no ranking.

use crate::logic::allocate::{eligible_players, fillable_courts};
use crate::models::{Court, CourtSlots, Player, PlayerId, SLOTS_PER_COURT};
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly permute `items` in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Shuffle eligible players and seat them four at a time on open courts, in
/// court order. Playing courts pass through; leftover open courts are emptied.
pub fn allocate_random<R: Rng + ?Sized>(roster: &[Player], courts: &[Court], rng: &mut R) -> Vec<Court> {
    let mut pool: Vec<PlayerId> = eligible_players(roster, courts)
        .iter()
        .map(|p| p.id)
        .collect();
    let open = courts.iter().filter(|c| !c.is_playing()).count();
    let fillable = fillable_courts(open, pool.len());
    shuffle(&mut pool, rng);

    let mut chunks = pool
        .chunks_exact(SLOTS_PER_COURT)
        .take(fillable)
        .map(CourtSlots::from_prefix);

    courts
        .iter()
        .map(|court| {
            if court.is_playing() {
                return court.clone();
            }
            match chunks.next() {
                Some(slots) => court.with_slots(slots),
                None => court.reset(),
            }
        })
        .collect()
}
