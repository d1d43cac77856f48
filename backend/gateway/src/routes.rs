//! API handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use rconbridge_commands::{paginate, validate_count};
use rconbridge_core::{ActionOutcome, BridgeError, CatalogPage, PlayerStatus};
use rconbridge_players::{fetch_players, fetch_status, validate_username, GameMode};

use crate::error::{bad_body, bad_query, ApiError};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub start: Option<usize>,
    pub count: Option<usize>,
}

/// Fields a client may change on a player. Absent keys are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerPatch {
    pub exp: Option<i64>,
    pub op: Option<bool>,
    pub gamemode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActionBody {
    pub seconds: Option<i64>,
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "rconbridge",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /` and `GET /commands`
pub async fn list_commands(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> ApiResult<CatalogPage> {
    let Query(query) = query.map_err(bad_query)?;
    let count = query.count.unwrap_or(DEFAULT_PAGE_SIZE);
    validate_count(count)?;
    let catalog = state.catalog.get(&state.session).await?;
    let page = paginate(&catalog, query.start.unwrap_or(0), count)?;
    Ok(Json(page))
}

/// `GET /users`
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let players = fetch_players(&state.session).await?;
    Ok(Json(json!({
        "total": players.len(),
        "results": players,
    })))
}

/// `GET /users/:username`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<PlayerStatus> {
    Ok(Json(fetch_status(&state.session, &username).await?))
}

/// `PATCH /users/:username`
///
/// Every present key is checked before any command is sent, then applied in
/// exp, op, gamemode order. Returns the refreshed status.
pub async fn patch_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    body: Result<Json<PlayerPatch>, JsonRejection>,
) -> ApiResult<PlayerStatus> {
    let Json(patch) = body.map_err(bad_body)?;
    if patch.exp.is_none() && patch.op.is_none() && patch.gamemode.is_none() {
        return Err(BridgeError::invalid("body must set at least one of exp, op, gamemode").into());
    }

    validate_username(&username)?;
    if let Some(exp) = patch.exp {
        if exp < 0 {
            return Err(BridgeError::invalid(format!("exp must not be negative, got {exp}")).into());
        }
    }
    let mode = patch
        .gamemode
        .as_deref()
        .map(str::parse::<GameMode>)
        .transpose()?;

    info!(username = %username, ?patch, "Updating player");
    if let Some(exp) = patch.exp {
        accepted(state.actions.set_experience(&username, exp).await?)?;
    }
    if let Some(op) = patch.op {
        accepted(state.actions.grant_privilege(&username, op).await?)?;
    }
    if let Some(mode) = mode {
        accepted(state.actions.set_game_mode(&username, mode.as_str()).await?)?;
    }

    Ok(Json(fetch_status(&state.session, &username).await?))
}

/// `PATCH /users/:username/do/:action`
pub async fn player_action(
    State(state): State<Arc<AppState>>,
    Path((username, action)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<ActionOutcome> {
    let outcome = match action.as_str() {
        "burn" => {
            let body: ActionBody = if body.is_empty() {
                ActionBody::default()
            } else {
                serde_json::from_slice(&body)
                    .map_err(|e| BridgeError::invalid(format!("invalid action body: {e}")))?
            };
            state.actions.ignite(&username, body.seconds).await?
        }
        "feed" => state.actions.feed(&username).await?,
        "heal" => state.actions.heal(&username).await?,
        other => {
            return Err(BridgeError::invalid(format!(
                "unknown action `{other}`; valid actions: burn, feed, heal"
            ))
            .into());
        }
    };
    Ok(Json(outcome))
}

/// `POST /users/:username/toggle_fly`
pub async fn toggle_fly(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let enabled = state.actions.toggle_flight(&username).await?;
    Ok(Json(json!({ "fly_mode": enabled })))
}

/// `POST /users/:username/toggle_god`
pub async fn toggle_god(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let enabled = state.actions.toggle_invulnerability(&username).await?;
    Ok(Json(json!({ "god_mode": enabled })))
}

fn accepted(outcome: ActionOutcome) -> Result<(), BridgeError> {
    if outcome.success {
        Ok(())
    } else {
        Err(BridgeError::Rejected(outcome.message))
    }
}
