//! Single binary web server: REST API over in-memory party rooms.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, CATEGORIES_CSV (category file), ROOM_INACTIVITY_HOURS.
//!
//! Each browser is bound to one player per room through a cookie session, so a
//! client can only write its own ready flag, answer, vote and guess.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use imposter_party::{
    cast_vote, close_voting, detect_random_source, mark_seen, open_voting, return_to_lobby,
    start_round, submit_answer, submit_imposter_guess, CategoryStore, PlayerId, RandomSource,
    Room, RoomError, RoomId, RoomSettings, Vote,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

/// Per-room entry: room data + last activity time (for auto-cleanup).
struct RoomEntry {
    room: Room,
    last_activity: Instant,
}

type Rooms = RwLock<HashMap<RoomId, RoomEntry>>;

/// In-memory state: many rooms by ID. Idle entries are removed by the cleanup task.
type AppState = Data<Rooms>;

/// Shuffle source, selected once at startup.
type RngState = Data<Mutex<Box<dyn RandomSource + Send>>>;

/// Server settings from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    categories_csv: Option<String>,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let categories_csv = std::env::var("CATEGORIES_CSV").ok().filter(|p| !p.is_empty());
        let hours: u64 = std::env::var("ROOM_INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(6);
        Self {
            host,
            port,
            categories_csv,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct CategoriesResponse {
    words: Vec<String>,
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct CreateRoomBody {
    host_name: String,
}

#[derive(Deserialize)]
struct JoinRoomBody {
    name: String,
}

#[derive(Deserialize)]
struct ReadyBody {
    ready: bool,
}

#[derive(Deserialize)]
struct AnswerBody {
    answer: String,
}

#[derive(Deserialize)]
struct VoteBody {
    vote: Vote,
}

#[derive(Deserialize)]
struct GuessBody {
    guess: String,
}

/// Path segment: room id (e.g. /api/rooms/{id})
#[derive(Deserialize)]
struct RoomPath {
    id: RoomId,
}

/// Path segments: room id and player id (e.g. /api/rooms/{id}/players/{player_id})
#[derive(Deserialize)]
struct RoomPlayerPath {
    id: RoomId,
    player_id: PlayerId,
}

fn session_key(room_id: RoomId) -> String {
    format!("room:{}", room_id)
}

fn session_player(session: &Session, room_id: RoomId) -> Option<PlayerId> {
    session
        .get::<PlayerId>(&session_key(room_id))
        .ok()
        .flatten()
}

fn error_json(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn room_error_response(e: RoomError) -> HttpResponse {
    match e {
        RoomError::NotHost => HttpResponse::Forbidden().json(error_json(e)),
        RoomError::PlayerNotFound(_) => HttpResponse::NotFound().json(error_json(e)),
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Run `op` on a room as the session's player and respond with that player's view.
fn with_room<F>(rooms: &Rooms, session: &Session, room_id: RoomId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Room, PlayerId) -> Result<(), RoomError>,
{
    let player_id = match session_player(session, room_id) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(error_json("Not in this room")),
    };
    let mut g = match rooms.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&room_id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No room")),
    };
    if entry.room.player(player_id).is_none() {
        return HttpResponse::Unauthorized().json(error_json("Not in this room"));
    }
    entry.last_activity = Instant::now();
    match op(&mut entry.room, player_id) {
        Ok(()) => HttpResponse::Ok().json(entry.room.view_for(player_id)),
        Err(e) => room_error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "imposter-party",
    })
}

/// Category names available for each game mode.
#[get("/api/categories")]
async fn api_categories(categories: Data<CategoryStore>) -> HttpResponse {
    HttpResponse::Ok().json(CategoriesResponse {
        words: categories.word_categories(),
        questions: categories.question_categories(),
    })
}

/// Create a room; the caller becomes its host.
#[post("/api/rooms")]
async fn api_create_room(state: AppState, session: Session, body: Json<CreateRoomBody>) -> HttpResponse {
    let room = match Room::new(body.host_name.as_str()) {
        Ok(r) => r,
        Err(e) => return room_error_response(e),
    };
    let (id, host_id) = (room.id, room.host_id);
    if session.insert(session_key(id), host_id).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let view = room.view_for(host_id);
    g.insert(
        id,
        RoomEntry {
            room,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created room {}", id);
    HttpResponse::Ok().json(view)
}

/// Get the caller's view of a room.
#[get("/api/rooms/{id}")]
async fn api_get_room(state: AppState, session: Session, path: Path<RoomPath>) -> HttpResponse {
    with_room(&state, &session, path.id, |_, _| Ok(()))
}

/// Join a room (Lobby only). Rejoining from the same session returns the existing player.
#[post("/api/rooms/{id}/players")]
async fn api_join_room(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<JoinRoomBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No room")),
    };
    entry.last_activity = Instant::now();
    if let Some(existing) = session_player(&session, path.id) {
        if entry.room.player(existing).is_some() {
            return HttpResponse::Ok().json(entry.room.view_for(existing));
        }
    }
    let player_id = match entry.room.add_player(body.name.as_str()) {
        Ok(id) => id,
        Err(e) => return room_error_response(e),
    };
    if session.insert(session_key(path.id), player_id).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(entry.room.view_for(player_id))
}

/// Remove a player (host kicks, or a player leaves). Lobby only.
#[delete("/api/rooms/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, session: Session, path: Path<RoomPlayerPath>) -> HttpResponse {
    let target = path.player_id;
    let response = with_room(&state, &session, path.id, |room, me| {
        room.remove_player(me, target)
    });
    if response.status().is_success() && session_player(&session, path.id) == Some(target) {
        session.remove(&session_key(path.id));
    }
    response
}

#[put("/api/rooms/{id}/ready")]
async fn api_set_ready(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<ReadyBody>,
) -> HttpResponse {
    with_room(&state, &session, path.id, |room, me| room.set_ready(me, body.ready))
}

/// Host configures mode, category and imposter count (Lobby only).
#[put("/api/rooms/{id}/settings")]
async fn api_configure(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<RoomSettings>,
) -> HttpResponse {
    let settings = body.into_inner();
    with_room(&state, &session, path.id, |room, me| room.configure(me, settings))
}

/// Host starts a round (Lobby or Results -> Playing).
#[post("/api/rooms/{id}/start")]
async fn api_start_round(
    state: AppState,
    categories: Data<CategoryStore>,
    rng: RngState,
    session: Session,
    path: Path<RoomPath>,
) -> HttpResponse {
    let mut rng = match rng.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    with_room(&state, &session, path.id, |room, me| {
        start_round(room, me, categories.get_ref(), &mut **rng)
    })
}

#[post("/api/rooms/{id}/seen")]
async fn api_mark_seen(state: AppState, session: Session, path: Path<RoomPath>) -> HttpResponse {
    with_room(&state, &session, path.id, mark_seen)
}

/// Submit an answer (question mode). Voting opens once everyone has answered.
#[post("/api/rooms/{id}/answer")]
async fn api_submit_answer(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<AnswerBody>,
) -> HttpResponse {
    with_room(&state, &session, path.id, |room, me| {
        if submit_answer(room, me, &body.answer)? {
            let host = room.host_id;
            open_voting(room, host)?;
        }
        Ok(())
    })
}

/// Host opens voting (Playing -> Voting).
#[post("/api/rooms/{id}/voting/open")]
async fn api_open_voting(state: AppState, session: Session, path: Path<RoomPath>) -> HttpResponse {
    with_room(&state, &session, path.id, open_voting)
}

/// Cast the caller's vote. The last vote resolves the round.
#[post("/api/rooms/{id}/vote")]
async fn api_cast_vote(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<VoteBody>,
) -> HttpResponse {
    let vote = body.vote;
    with_room(&state, &session, path.id, |room, me| cast_vote(room, me, vote).map(|_| ()))
}

/// Host forces voting closed (Voting -> Results).
#[post("/api/rooms/{id}/voting/close")]
async fn api_close_voting(state: AppState, session: Session, path: Path<RoomPath>) -> HttpResponse {
    with_room(&state, &session, path.id, close_voting)
}

/// Imposter guesses the secret word (word mode, Results).
#[post("/api/rooms/{id}/guess")]
async fn api_guess_word(
    state: AppState,
    session: Session,
    path: Path<RoomPath>,
    body: Json<GuessBody>,
) -> HttpResponse {
    with_room(&state, &session, path.id, |room, me| {
        submit_imposter_guess(room, me, &body.guess).map(|_| ())
    })
}

/// Host returns the room to the lobby (Results -> Lobby).
#[post("/api/rooms/{id}/lobby")]
async fn api_return_to_lobby(state: AppState, session: Session, path: Path<RoomPath>) -> HttpResponse {
    with_room(&state, &session, path.id, return_to_lobby)
}

fn load_categories(config: &ServerConfig) -> CategoryStore {
    match &config.categories_csv {
        Some(path) => match CategoryStore::from_csv_path(path) {
            Ok(store) => {
                log::info!("Loaded categories from {}", path);
                store
            }
            Err(e) => {
                log::error!("{}; using builtin categories", e);
                CategoryStore::builtin()
            }
        },
        None => CategoryStore::builtin(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));
    let categories = Data::new(load_categories(&config));
    let rng: RngState = Data::new(Mutex::new(detect_random_source()));
    let session_key = Key::generate();

    // Background task: every 30 minutes, remove rooms idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive room(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .app_data(categories.clone())
            .app_data(rng.clone())
            .service(api_health)
            .service(api_categories)
            .service(api_create_room)
            .service(api_get_room)
            .service(api_join_room)
            .service(api_remove_player)
            .service(api_set_ready)
            .service(api_configure)
            .service(api_start_round)
            .service(api_mark_seen)
            .service(api_submit_answer)
            .service(api_open_voting)
            .service(api_cast_vote)
            .service(api_close_voting)
            .service(api_guess_word)
            .service(api_return_to_lobby)
    })
    .bind(bind)?
    .run()
    .await
}
