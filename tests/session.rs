//! Integration tests for session bookkeeping: roster, courts, history recording.

use chrono::{Duration, TimeZone, Utc};
use court_rotation::{
    allocate_courts, allocate_courts_random, import_roster_csv, standings, Court, CourtSlots,
    CourtStatus, SeededDraw, Session, SessionConfig, SessionError, Side, MAX_COURTS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session_with_players(n: usize) -> Session {
    let mut s = Session::new(SessionConfig::default());
    for i in 0..n {
        s.add_player(format!("P{i}"), i as i32).unwrap();
    }
    s
}

#[test]
fn new_session_has_default_courts() {
    let s = Session::new(SessionConfig::default());
    assert_eq!(s.courts.len(), 2);
    assert_eq!(s.courts[0].name, "Court 1");
    assert!(s.courts.iter().all(|c| c.status == CourtStatus::Allocating));
    assert!(s.history.is_empty());
}

#[test]
fn court_count_is_capped() {
    let config = SessionConfig::default();
    assert_eq!(config.with_courts(6).unwrap().default_courts, 6);
    assert_eq!(
        config.with_courts(MAX_COURTS + 1),
        Err(SessionError::TooManyCourts { max: MAX_COURTS })
    );
}

#[test]
fn duplicate_court_names_are_rejected() {
    let mut s = session_with_players(0);
    assert_eq!(s.add_court("court 1 "), Err(SessionError::DuplicateCourtName));
    assert_eq!(s.add_court("COURT 2"), Err(SessionError::DuplicateCourtName));
    assert!(s.add_court("Court 3").is_ok());
    assert_eq!(s.courts.len(), 3);
}

#[test]
fn finishing_a_court_records_the_result_on_its_own_match() {
    let mut s = session_with_players(8);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(12));
    let (c1, c2) = (s.courts[0].id, s.courts[1].id);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
    s.start_court(c1, t0).unwrap();
    s.start_court(c2, t0 + Duration::minutes(1)).unwrap();

    s.finish_court(c1, Some(Side::TeamA)).unwrap();
    let matches = &s.history.rounds()[0].matches;
    assert_eq!(matches[0].court_name, "Court 1");
    assert_eq!(matches[0].winner, Some(Side::TeamA));
    assert_eq!(matches[1].winner, None);
}

#[test]
fn blank_names_are_rejected() {
    let mut s = session_with_players(0);
    assert_eq!(s.add_player("   ", 3), Err(SessionError::EmptyName));
    assert_eq!(s.add_court(""), Err(SessionError::EmptyName));
}

#[test]
fn start_and_finish_records_history() {
    let mut s = session_with_players(8);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(1));
    let court_id = s.courts[0].id;
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();

    s.start_court(court_id, t0).unwrap();
    assert_eq!(s.courts[0].status, CourtStatus::Playing);
    assert_eq!(s.history.len(), 1);
    assert_eq!(s.history.rounds()[0].matches[0].player_names.len(), 4);

    s.finish_court(court_id, Some(Side::TeamA)).unwrap();
    assert_eq!(s.courts[0].status, CourtStatus::Allocating);
    assert!(s.courts[0].player_ids.is_empty());
    assert_eq!(s.history.rounds()[0].matches[0].winner, Some(Side::TeamA));
}

#[test]
fn matches_within_window_share_a_round() {
    let mut s = session_with_players(8);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(2));
    let (c1, c2) = (s.courts[0].id, s.courts[1].id);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();

    s.start_court(c1, t0).unwrap();
    s.start_court(c2, t0 + Duration::minutes(10)).unwrap();
    assert_eq!(s.history.len(), 1);
    assert_eq!(s.history.rounds()[0].matches.len(), 2);

    s.finish_court(c1, None).unwrap();
    allocate_courts(&mut s, &mut SeededDraw::from_seed(3));
    s.start_court(c1, t0 + Duration::minutes(20)).unwrap();
    assert_eq!(s.history.len(), 2);
    assert_eq!(s.history.rounds()[1].sequence, 2);
}

#[test]
fn start_exactly_one_window_later_opens_a_new_round() {
    let mut s = session_with_players(8);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(13));
    let (c1, c2) = (s.courts[0].id, s.courts[1].id);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();

    s.start_court(c1, t0).unwrap();
    s.start_court(c2, t0 + Duration::minutes(15)).unwrap();
    assert_eq!(s.history.len(), 2);
    assert_eq!(s.history.rounds()[1].sequence, 2);
    assert_eq!(s.history.rounds()[1].matches.len(), 1);
}

#[test]
fn playing_courts_survive_allocation_untouched() {
    let mut s = session_with_players(8);
    let court_id = s.courts[0].id;
    let seated: Vec<_> = s.players[..3].iter().map(|p| p.id).collect();
    let stranger = uuid::Uuid::new_v4();
    s.courts[0].player_ids =
        CourtSlots::new([Some(seated[0]), Some(seated[1]), Some(seated[2]), Some(stranger)]);
    s.courts[0].status = CourtStatus::Playing;
    let before = s.courts[0].clone();

    allocate_courts(&mut s, &mut SeededDraw::from_seed(14));
    assert_eq!(s.court(court_id), Some(&before));
    assert!(s.courts[1].player_ids.is_full());
    assert!(seated.iter().all(|id| !s.courts[1].player_ids.contains(*id)));
}

#[test]
fn next_allocation_prefers_players_who_sat_out() {
    let mut s = session_with_players(8);
    s.courts.truncate(1);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(4));
    let first: Vec<_> = s.courts[0].player_ids.occupied().collect();
    let court_id = s.courts[0].id;
    s.start_court(court_id, Utc::now()).unwrap();
    s.finish_court(court_id, None).unwrap();

    allocate_courts(&mut s, &mut SeededDraw::from_seed(5));
    assert!(first.iter().all(|id| !s.courts[0].player_ids.contains(*id)));
}

#[test]
fn cannot_start_a_partial_court() {
    let mut s = session_with_players(3);
    let court_id = s.courts[0].id;
    let ids: Vec<_> = s.players.iter().map(|p| p.id).collect();
    s.courts[0].player_ids = CourtSlots::from_prefix(&ids);
    assert_eq!(
        s.start_court(court_id, Utc::now()),
        Err(SessionError::CourtNotFull(court_id))
    );
}

#[test]
fn locked_courts_and_their_players_are_protected() {
    let mut s = session_with_players(4);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(6));
    let court_id = s.courts[0].id;
    s.start_court(court_id, Utc::now()).unwrap();
    let seated = s.courts[0].player_ids.get(0).unwrap();

    assert_eq!(s.remove_player(seated), Err(SessionError::PlayerOnCourt(seated)));
    assert_eq!(s.set_player_active(seated, false), Err(SessionError::PlayerOnCourt(seated)));
    assert_eq!(s.remove_court(court_id), Err(SessionError::CourtLocked(court_id)));
    assert_eq!(s.clear_court(court_id), Err(SessionError::CourtLocked(court_id)));
    assert_eq!(s.start_court(court_id, Utc::now()), Err(SessionError::InvalidState));
}

#[test]
fn deactivating_a_player_takes_them_off_open_courts() {
    let mut s = session_with_players(4);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(7));
    let id = s.courts[0].player_ids.get(2).unwrap();
    s.set_player_active(id, false).unwrap();
    assert!(!s.courts[0].player_ids.contains(id));
    assert_eq!(s.courts[0].player_ids.occupied_count(), 3);
}

#[test]
fn normalize_drops_unknown_players() {
    let mut s = session_with_players(2);
    let stranger = uuid::Uuid::new_v4();
    let known = s.players[0].id;
    s.courts[0].player_ids = CourtSlots::from_prefix(&[known, stranger]);
    assert_eq!(s.normalize_courts(), 1);
    assert!(s.courts[0].player_ids.contains(known));
    assert!(!s.courts[0].player_ids.contains(stranger));
}

#[test]
fn malformed_slot_arrays_are_reset_on_load() {
    let id = uuid::Uuid::new_v4();
    let json = format!(
        r#"{{"id":"{}","name":"Court 9","status":"allocating","player_ids":["{}",null]}}"#,
        uuid::Uuid::new_v4(),
        id
    );
    let court: Court = serde_json::from_str(&json).unwrap();
    assert!(court.player_ids.is_empty());
    assert_eq!(court.player_ids.as_array().len(), 4);
}

#[test]
fn random_allocation_fills_full_courts_only() {
    let mut s = session_with_players(6);
    allocate_courts_random(&mut s, &mut StdRng::seed_from_u64(8));
    assert!(s.courts[0].player_ids.is_full());
    assert!(s.courts[1].player_ids.is_empty());
}

#[test]
fn csv_import_adds_rows() {
    let mut s = session_with_players(0);
    let csv = "name,level,active\nAnna,7,true\nBen,4,false\nCleo,5,\n";
    assert_eq!(import_roster_csv(&mut s, csv.as_bytes()).unwrap(), 3);
    assert_eq!(s.players.len(), 3);
    assert_eq!(s.players[0].name, "Anna");
    assert!(!s.players[1].is_active);
    assert!(s.players[2].is_active);
}

#[test]
fn csv_import_is_all_or_nothing() {
    let mut s = session_with_players(0);
    let csv = "name,level\nAnna,7\nBen,notanumber\n";
    assert!(matches!(
        import_roster_csv(&mut s, csv.as_bytes()),
        Err(SessionError::Import(_))
    ));
    assert!(s.players.is_empty());
}

#[test]
fn standings_count_wins_and_losses() {
    let mut s = session_with_players(4);
    allocate_courts(&mut s, &mut SeededDraw::from_seed(9));
    let court_id = s.courts[0].id;
    let team_a: Vec<_> = s.courts[0].player_ids.team_a().iter().flatten().copied().collect();
    let team_b: Vec<_> = s.courts[0].player_ids.team_b().iter().flatten().copied().collect();
    assert_eq!((team_a.len(), team_b.len()), (2, 2));
    s.start_court(court_id, Utc::now()).unwrap();
    s.finish_court(court_id, Some(Side::TeamA)).unwrap();

    let table = standings(&s);
    assert_eq!(table.len(), 4);
    for row in &table {
        assert_eq!(row.played, 1);
        assert_eq!(row.rest_rounds, 1);
        if team_a.contains(&row.id) {
            assert_eq!((row.wins, row.losses), (1, 0));
        } else {
            assert!(team_b.contains(&row.id));
            assert_eq!((row.wins, row.losses), (0, 1));
        }
    }
}
