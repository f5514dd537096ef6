//! Roster import from CSV: `name,level[,active]` with a header row.

use crate::models::{Player, Session, SessionError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    level: i32,
    #[serde(default)]
    active: Option<bool>,
}

/// Parse roster rows. Blank names are rejected with their row number.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<Player>, SessionError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut players = Vec::new();
    for (i, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = row.map_err(|e| SessionError::Import(e.to_string()))?;
        if row.name.is_empty() {
            return Err(SessionError::Import(format!("row {}: empty name", i + 1)));
        }
        let mut player = Player::new(row.name, row.level);
        player.is_active = row.active.unwrap_or(true);
        players.push(player);
    }
    Ok(players)
}

/// Append every row of a CSV roster to the session. Nothing is added if any row fails.
/// Returns how many players were added.
pub fn import_roster_csv<R: Read>(session: &mut Session, reader: R) -> Result<usize, SessionError> {
    let players = parse_roster_csv(reader)?;
    let added = players.len();
    session.players.extend(players);
    log::info!("Imported {} player(s) into session {}", added, session.id);
    Ok(added)
}
