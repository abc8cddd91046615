// File: giftbot-server/src/routes.rs

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use giftbot_common::Error;
use giftbot_core::platforms::wos::WosClient;
use giftbot_core::repositories::postgres::player::PlayerRepository;
use giftbot_core::services::redemption_service::RedemptionService;
use giftbot_core::services::roster_service::RosterService;

pub type Redemption = RedemptionService<WosClient, PlayerRepository>;
pub type Roster = RosterService<WosClient, PlayerRepository>;

#[derive(Clone)]
pub struct AppState {
    pub redemption: Arc<Redemption>,
    pub roster: Arc<Roster>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/send/{gift_code}", get(send_gift_code))
        .route("/players", get(list_players).post(register_player))
        .route("/players/{fid}", delete(remove_player))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    fid: i64,
}

/// Runs one sequential redemption pass. Responds with the ordered record
/// list, or the single `{code, message}` object when the code does not
/// exist at all.
async fn send_gift_code(
    State(state): State<AppState>,
    Path(gift_code): Path<String>,
) -> Response {
    match state.redemption.redeem_for_all(&gift_code).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_players(State(state): State<AppState>) -> Response {
    match state.roster.list().await {
        Ok(players) => Json(players).into_response(),
        Err(e) => error_response(e),
    }
}

async fn register_player(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Response {
    match state.roster.register(body.fid).await {
        Ok(player) => (StatusCode::CREATED, Json(player)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn remove_player(State(state): State<AppState>, Path(fid): Path<i64>) -> Response {
    match state.roster.remove(fid).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: Error) -> Response {
    let status = match &e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::AlreadyExists(_) => StatusCode::CONFLICT,
        Error::Ineligible(_) => StatusCode::BAD_REQUEST,
        Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Error::Vendor(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
