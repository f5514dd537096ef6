//! Data structures for a court session: players, courts, match history, session state.

mod court;
mod history;
mod player;
mod session;

pub use court::{locked_players, Court, CourtId, CourtSlots, CourtStatus, Side, SLOTS_PER_COURT};
pub use history::{History, MatchRecord, Round};
pub use player::{Player, PlayerId};
pub use session::{Session, SessionConfig, SessionError, SessionId, MAX_COURTS};
