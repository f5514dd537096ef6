//! Court rotation: fair allocation of players onto shared courts, with models and session logic.

pub mod logic;
pub mod models;

pub use logic::{
    allocate, allocate_courts, allocate_courts_random, allocate_random, allocate_with_thread_rng,
    balance_court, eligible_players, fillable_courts, import_roster_csv, parse_roster_csv,
    play_counts, player_stats, priority_queue, shuffle, snake_distribute, snake_order, standings,
    Direction, FixedDraws, PlayCount, PlayerStanding, PlayerStats, Ranked, SeededDraw, SnakeWalk,
    ThreadDraw, TieBreak, REST_SENTINEL,
};
pub use models::{
    locked_players, Court, CourtId, CourtSlots, CourtStatus, History, MatchRecord, Player,
    PlayerId, Round, Session, SessionConfig, SessionError, SessionId, Side, MAX_COURTS,
    SLOTS_PER_COURT,
};
