//! Court rotation logic: the allocation engine, its helpers, and session operations.

mod allocate;
mod balance;
mod priority;
mod random;
mod roster_import;
mod rotation;
mod snake;
mod stats;
mod tie_break;

pub use allocate::{allocate, allocate_with_thread_rng, eligible_players, fillable_courts};
pub use balance::balance_court;
pub use priority::{priority_queue, Ranked};
pub use random::{allocate_random, shuffle};
pub use roster_import::{import_roster_csv, parse_roster_csv};
pub use rotation::{allocate_courts, allocate_courts_random, standings, PlayerStanding};
pub use snake::{snake_distribute, snake_order, Direction, SnakeWalk};
pub use stats::{play_counts, player_stats, PlayCount, PlayerStats, REST_SENTINEL};
pub use tie_break::{FixedDraws, SeededDraw, ThreadDraw, TieBreak};
