use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::State;
use axum::response::{ErrorResponse, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use herodraft_model::{Hero, HeroId, PlayerId, PlayerStatus};
use http::StatusCode;
use log::{debug, info};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::services::ServeDir;

use crate::herodraft::config::Config;
use crate::herodraft::round::RoundSnapshot;
use crate::herodraft::{Assignment, DraftError, DraftSettings, RoundCoordinator};
use crate::utils::{print_err, ResultExt as _};

const PLAYER_ID_LEN: usize = 16;

struct AppState {
    config: Config,
    coordinator: Arc<RoundCoordinator>,
}

type AppStateArg = State<Arc<AppState>>;

fn draft_error(e: DraftError) -> ErrorResponse {
    let status = match &e {
        DraftError::InvalidState { .. } => StatusCode::CONFLICT,
        DraftError::IllegalSelection { .. } => StatusCode::BAD_REQUEST,
        DraftError::HeroAlreadyAssigned(_) => StatusCode::CONFLICT,
        DraftError::NoCandidatesAvailable => StatusCode::NOT_FOUND,
        DraftError::RoleExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    debug!("Request failed: {e}");
    (status, Json(json!({ "error": e.to_string() }))).into()
}

fn new_player_id() -> PlayerId {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PLAYER_ID_LEN)
        .map(char::from)
        .collect::<String>()
        .into()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinBody {
    player_id: Option<PlayerId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinResponse {
    player_id: PlayerId,
    status: PlayerStatus,
}

async fn join(State(state): AppStateArg, Json(body): Json<JoinBody>) -> Json<JoinResponse> {
    debug!("join({body:?})");
    let player_id = body.player_id.unwrap_or_else(new_player_id);
    let status = state.coordinator.join(&player_id);
    Json(JoinResponse { player_id, status })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartDraftBody {
    player_id: PlayerId,
    hero_count: Option<usize>,
    change_count: Option<usize>,
    /// Comma separated, e.g. "1,2,3".
    difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartDraftResponse {
    hero_count: usize,
    candidates: Vec<Hero>,
}

async fn start_draft(
    State(state): AppStateArg,
    Json(body): Json<StartDraftBody>,
) -> axum::response::Result<Json<StartDraftResponse>> {
    debug!("start_draft({body:?})");
    let settings = DraftSettings::from_request(
        &state.config,
        body.hero_count,
        body.change_count,
        body.difficulty.as_deref(),
    );
    let candidates = state
        .coordinator
        .start_draft(&body.player_id, &settings)
        .map_err(draft_error)?;
    Ok(Json(StartDraftResponse {
        hero_count: settings.hero_count,
        candidates,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmSelectionBody {
    player_id: PlayerId,
    hero_id: HeroId,
}

async fn confirm_selection(
    State(state): AppStateArg,
    Json(body): Json<ConfirmSelectionBody>,
) -> axum::response::Result<impl IntoResponse> {
    debug!("confirm_selection({body:?})");
    state
        .coordinator
        .confirm_hero(&body.player_id, body.hero_id)
        .map_err(draft_error)?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerBody {
    player_id: PlayerId,
}

async fn assignment(
    State(state): AppStateArg,
    Json(body): Json<PlayerBody>,
) -> axum::response::Result<Json<Assignment>> {
    debug!("assignment({body:?})");
    match state.coordinator.get_assignment(&body.player_id) {
        Ok(assignment) => Ok(Json(assignment)),
        Err(DraftError::InvalidState { .. }) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No hero confirmed yet" })),
        )
            .into()),
        Err(e) => Err(draft_error(e)),
    }
}

#[derive(Debug, Serialize)]
struct PlayerStatusResponse {
    status: Option<PlayerStatus>,
}

async fn player_status(
    State(state): AppStateArg,
    Json(body): Json<PlayerBody>,
) -> Json<PlayerStatusResponse> {
    Json(PlayerStatusResponse {
        status: state.coordinator.player_status(&body.player_id),
    })
}

async fn round(State(state): AppStateArg) -> Json<RoundSnapshot> {
    Json(state.coordinator.snapshot())
}

fn router(shared_state: Arc<AppState>) -> Router {
    let image_dir = shared_state.config.image_dir.clone();
    let static_serving_dir = shared_state.config.static_serving_dir.clone();
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route("/join", post(join))
                .route("/start_draft", post(start_draft))
                .route("/confirm_selection", post(confirm_selection))
                .route("/assignment", post(assignment))
                .route("/player_status", post(player_status))
                .route("/round", get(round))
                .with_state(shared_state),
        )
        .nest_service("/images", ServeDir::new(image_dir))
        .fallback_service(ServeDir::new(static_serving_dir))
}

pub async fn serve(config: Config, coordinator: Arc<RoundCoordinator>) {
    let serving_addr = config.serving_addr.clone();
    let app = router(Arc::new(AppState {
        config,
        coordinator,
    }));
    let listener = match tokio::net::TcpListener::bind(&serving_addr)
        .await
        .with_context(|| format!("Cannot bind {serving_addr}"))
    {
        Ok(listener) => listener,
        Err(e) => {
            print_err(&e);
            return;
        }
    };
    info!("Serving on {serving_addr}");
    axum::serve(listener, app)
        .await
        .context("Api server failed")
        .print_err();
}
