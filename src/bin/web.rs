//! Single binary web server: JSON API over one Americano tournament controller.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, DATA_DIR (snapshot/history files), SCORE_TOTAL (fixed score total).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use americano_tournament_web::{
    default_court_names, export, AppConfig, JsonFileStore, MatchId, ScorePolicy, TeamId,
    TournamentConfig, TournamentController, TournamentError,
};
use serde::Deserialize;
use std::sync::RwLock;

/// The one live controller; every handler takes the lock for its whole operation.
type AppState = Data<RwLock<TournamentController<JsonFileStore>>>;

/// Policy applied when a start request does not choose one.
type DefaultPolicy = Data<ScorePolicy>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct StartTournamentBody {
    names: Vec<String>,
    /// Number of courts, named "Court 1".."Court n". Ignored when `court_names` is given.
    #[serde(default)]
    courts: Option<usize>,
    #[serde(default)]
    court_names: Option<Vec<String>>,
    /// Overrides SCORE_TOTAL for this tournament; 0 disables the check.
    #[serde(default)]
    score_total: Option<u32>,
}

#[derive(Deserialize)]
struct ScoreBody {
    score: u32,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Deserialize)]
struct TeamScorePath {
    id: MatchId,
    team_id: TeamId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else if matches!(e, TournamentError::InvalidState(_)) {
        HttpResponse::Conflict().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn tournament_json(ctrl: &TournamentController<JsonFileStore>, warnings: Vec<String>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "state": ctrl.state(),
        "tournament": ctrl.tournament(),
        "warnings": warnings,
    }))
}

/// Tournament JSON plus any persistence warnings raised by the operation just run.
fn tournament_response(ctrl: &mut TournamentController<JsonFileStore>) -> HttpResponse {
    let warnings = ctrl.take_warnings();
    tournament_json(ctrl, warnings)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "americano-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    tournament_json(&g, Vec::new())
}

/// Start a tournament from a name list (fails if one already exists).
#[post("/api/tournament")]
async fn api_start_tournament(
    state: AppState,
    default_policy: DefaultPolicy,
    body: Json<StartTournamentBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let court_names = body
        .court_names
        .unwrap_or_else(|| default_court_names(body.courts.unwrap_or(1)));
    let score_policy = match body.score_total {
        Some(0) => ScorePolicy::Unrestricted,
        Some(total) => ScorePolicy::FixedTotal(total),
        None => **default_policy,
    };
    let config = TournamentConfig {
        court_names,
        score_policy,
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let started = g.start(&body.names, config).map(|_| ());
    match started {
        Ok(()) => tournament_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Current round's matches (null once completed or before start).
#[get("/api/rounds/current")]
async fn api_current_round(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.current_round())
}

#[put("/api/matches/{id}/teams/{team_id}/score")]
async fn api_record_score(state: AppState, path: Path<TeamScorePath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.record_score(path.id, path.team_id, body.score) {
        Ok(()) => tournament_response(&mut g),
        Err(e) => error_response(&e),
    }
}

#[post("/api/matches/{id}/confirm")]
async fn api_confirm_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.confirm_match(path.id) {
        Ok(_) => tournament_response(&mut g),
        Err(e) => error_response(&e),
    }
}

#[post("/api/matches/{id}/reopen")]
async fn api_reopen_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.reopen_match(path.id) {
        Ok(()) => tournament_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Confirm every pending match of the current round.
#[post("/api/rounds/current/confirm")]
async fn api_confirm_round(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.confirm_round() {
        Ok(_) => tournament_response(&mut g),
        Err(e) => error_response(&e),
    }
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.standings())
}

#[get("/api/history")]
async fn api_history(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.history())
}

#[get("/api/export/json")]
async fn api_export_json(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.tournament() else {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    };
    match export::results_json(t) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                "Content-Disposition",
                format!(
                    "attachment; filename=\"americano-tournament-{}.json\"",
                    t.created_at.format("%Y-%m-%d")
                ),
            ))
            .body(json),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/export/csv")]
async fn api_export_csv(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.tournament() else {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    };
    match export::standings_csv(t) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Discard the live tournament (history is kept).
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset();
    tournament_response(&mut g)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    log::info!("Data directory: {}", config.data_dir.display());
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let controller = TournamentController::resume(JsonFileStore::new(&config.data_dir));
    let state = Data::new(RwLock::new(controller));
    let default_policy = Data::new(config.score_policy);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(default_policy.clone())
            .service(api_health)
            .service(favicon)
            .service(api_get_tournament)
            .service(api_start_tournament)
            .service(api_current_round)
            .service(api_record_score)
            .service(api_confirm_match)
            .service(api_reopen_match)
            .service(api_confirm_round)
            .service(api_standings)
            .service(api_history)
            .service(api_export_json)
            .service(api_export_csv)
            .service(api_reset)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
