//! Router assembly and the HTTP listener.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::routes;
use crate::state::AppState;

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::list_commands))
        .route("/commands", get(routes::list_commands))
        .route("/health", get(routes::health))
        .route("/users", get(routes::list_users))
        .route("/users/:username", get(routes::get_user).patch(routes::patch_user))
        .route("/users/:username/do/:action", patch(routes::player_action))
        .route("/users/:username/toggle_fly", post(routes::toggle_fly))
        .route("/users/:username/toggle_god", post(routes::toggle_god))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `bind` until `shutdown` resolves.
#[instrument(skip(state, shutdown))]
pub async fn start_server(
    bind: &str,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {bind}"))?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP API stopped");
    Ok(())
}
