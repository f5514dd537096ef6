//! Smart allocation: fill open courts with the players who most deserve a game.

use crate::logic::balance::balance_court;
use crate::logic::priority::priority_queue;
use crate::logic::snake::snake_distribute;
use crate::logic::tie_break::{ThreadDraw, TieBreak};
use crate::models::{locked_players, Court, Player, Round, SLOTS_PER_COURT};

/// Number of open courts that can be completely filled.
pub fn fillable_courts(open_courts: usize, eligible_players: usize) -> usize {
    open_courts.min(eligible_players / SLOTS_PER_COURT)
}

/// Active players not seated on a playing court, in roster order.
pub fn eligible_players<'a>(roster: &'a [Player], courts: &[Court]) -> Vec<&'a Player> {
    let locked = locked_players(courts);
    roster
        .iter()
        .filter(|p| p.is_active && !locked.contains(&p.id))
        .collect()
}

/// Compute a new court assignment.
///
/// 1. Playing courts and their players are left alone.
/// 2. Eligible players are ranked by matches played (fewest first), rounds
///    rested (most first), then a random draw.
/// 3. The top `4 * fillable_courts` are taken.
/// 4. They are dealt by level, descending, in snake order over the first
///    `fillable_courts` open courts.
/// 5. Each court is split `[best, worst, second, third]`.
///
/// Open courts that get nobody are emptied. The output has the same courts
/// in the same order as `courts`.
pub fn allocate<D: TieBreak + ?Sized>(
    roster: &[Player],
    courts: &[Court],
    history: &[Round],
    draw: &mut D,
) -> Vec<Court> {
    let eligible = eligible_players(roster, courts);
    let open = courts.iter().filter(|c| !c.is_playing()).count();
    let fillable = fillable_courts(open, eligible.len());

    let queue = priority_queue(&eligible, history, draw);
    let mut selected: Vec<&Player> = queue
        .iter()
        .take(fillable * SLOTS_PER_COURT)
        .map(|r| r.player)
        .collect();
    selected.sort_by(|a, b| b.level.cmp(&a.level));

    log::debug!(
        "Allocating {} of {} eligible players onto {} of {} open courts",
        selected.len(),
        eligible.len(),
        fillable,
        open
    );

    let mut dealt = snake_distribute(selected, fillable)
        .into_iter()
        .map(|players| balance_court(&players));

    courts
        .iter()
        .map(|court| {
            if court.is_playing() {
                return court.clone();
            }
            match dealt.next() {
                Some(slots) => court.with_slots(slots),
                None => court.reset(),
            }
        })
        .collect()
}

/// [`allocate`] with tie-breaks from the thread-local RNG.
pub fn allocate_with_thread_rng(roster: &[Player], courts: &[Court], history: &[Round]) -> Vec<Court> {
    allocate(roster, courts, history, &mut ThreadDraw)
}
