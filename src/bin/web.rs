//! Single binary web server: JSON API over in-memory court sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, ROUND_WINDOW_MINUTES (default 15), SESSION_TIMEOUT_HOURS (default 12).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use court_rotation::{
    allocate_courts, allocate_courts_random, allocate_with_thread_rng, import_roster_csv,
    standings, Court, CourtId, Player, PlayerId, Round, Session, SessionConfig, SessionError,
    SessionId, Side, ThreadDraw,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

struct AppData {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    config: SessionConfig,
}

type AppState = Data<AppData>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    courts: Option<usize>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    level: i32,
}

#[derive(Deserialize)]
struct SetActiveBody {
    active: bool,
}

#[derive(Deserialize)]
struct SetLevelBody {
    level: i32,
}

#[derive(Deserialize)]
struct AddCourtBody {
    name: String,
}

#[derive(Deserialize)]
struct FinishCourtBody {
    winner: Option<Side>,
}

/// Stateless allocation: a full snapshot in, new courts out.
#[derive(Deserialize)]
struct AllocateBody {
    roster: Vec<Player>,
    courts: Vec<Court>,
    #[serde(default)]
    history: Vec<Round>,
}

#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: CourtId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

fn bad_request(e: SessionError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a session, refresh its activity time, apply `f`, and answer with the session.
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> Result<(), SessionError>,
{
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match f(&mut *s) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => {
            log::debug!("Session {}: rejected: {}", id, e);
            bad_request(e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-rotation",
    })
}

/// Run the allocation engine on a posted snapshot. Nothing is stored.
#[post("/api/allocate")]
async fn api_allocate(body: Json<AllocateBody>) -> HttpResponse {
    let courts = allocate_with_thread_rng(&body.roster, &body.courts, &body.history);
    HttpResponse::Ok().json(courts)
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let mut config = state.config;
    if let Some(courts) = body.as_ref().and_then(|b| b.courts) {
        config = match config.with_courts(courts) {
            Ok(c) => c,
            Err(e) => return bad_request(e),
        };
    }
    let session = Session::new(config);
    let id = session.id;
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {} with {} court(s)", id, config.default_courts);
    let response = HttpResponse::Ok().json(&session);
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |_| Ok(()))
}

#[get("/api/sessions/{id}/stats")]
async fn api_session_stats(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(standings(&entry.session))
        }
        None => not_found(),
    }
}

#[post("/api/sessions/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SessionPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    with_session(&state, path.id, |s| s.add_player(body.name.as_str(), body.level).map(|_| ()))
}

/// Import players from a CSV body: `name,level[,active]` with header.
#[post("/api/sessions/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<SessionPath>, body: Bytes) -> HttpResponse {
    with_session(&state, path.id, |s| import_roster_csv(s, body.as_ref()).map(|_| ()))
}

#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    with_session(&state, path.id, |s| s.remove_player(path.player_id))
}

#[put("/api/sessions/{id}/players/{player_id}/active")]
async fn api_set_player_active(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<SetActiveBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| s.set_player_active(path.player_id, body.active))
}

#[put("/api/sessions/{id}/players/{player_id}/level")]
async fn api_set_player_level(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<SetLevelBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| s.set_player_level(path.player_id, body.level))
}

#[post("/api/sessions/{id}/courts")]
async fn api_add_court(state: AppState, path: Path<SessionPath>, body: Json<AddCourtBody>) -> HttpResponse {
    with_session(&state, path.id, |s| s.add_court(body.name.as_str()).map(|_| ()))
}

#[delete("/api/sessions/{id}/courts/{court_id}")]
async fn api_remove_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    with_session(&state, path.id, |s| s.remove_court(path.court_id))
}

#[post("/api/sessions/{id}/courts/{court_id}/clear")]
async fn api_clear_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    with_session(&state, path.id, |s| s.clear_court(path.court_id))
}

/// Lock a full court; its match is recorded in history.
#[post("/api/sessions/{id}/courts/{court_id}/start")]
async fn api_start_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    with_session(&state, path.id, |s| s.start_court(path.court_id, Utc::now()))
}

#[post("/api/sessions/{id}/courts/{court_id}/finish")]
async fn api_finish_court(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Option<Json<FinishCourtBody>>,
) -> HttpResponse {
    let winner = body.and_then(|b| b.winner);
    with_session(&state, path.id, |s| s.finish_court(path.court_id, winner))
}

/// Smart allocation over every open court.
#[post("/api/sessions/{id}/allocate")]
async fn api_allocate_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        allocate_courts(s, &mut ThreadDraw);
        Ok(())
    })
}

#[post("/api/sessions/{id}/allocate/random")]
async fn api_allocate_session_random(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        allocate_courts_random(s, &mut rand::thread_rng());
        Ok(())
    })
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = env_or("HOST", "0.0.0.0".to_string());
    let port: u16 = env_or("PORT", 8080);
    let round_window_minutes: i64 = env_or("ROUND_WINDOW_MINUTES", 15);
    let timeout_hours: u64 = env_or("SESSION_TIMEOUT_HOURS", 12);
    let inactivity_timeout = Duration::from_secs(timeout_hours * 3600);

    let config = SessionConfig {
        round_window: chrono::Duration::minutes(round_window_minutes),
        ..SessionConfig::default()
    };
    log::info!("Starting server at http://{}:{}", host, port);

    let state = Data::new(AppData {
        sessions: RwLock::new(HashMap::new()),
        config,
    });

    // Background task: every 30 minutes, remove sessions inactive past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.sessions.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_allocate)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_session_stats)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_player_active)
            .service(api_set_player_level)
            .service(api_add_court)
            .service(api_remove_court)
            .service(api_clear_court)
            .service(api_start_court)
            .service(api_finish_court)
            .service(api_allocate_session)
            .service(api_allocate_session_random)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
