//! HTTP API handlers

pub mod trip;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::services::trip::TripService;

/// Shared application state
pub struct AppState {
    pub trips: TripService,
}

/// Build the axum router with all API routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", post(trip::plan_trip))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Bind and serve the API
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// `GET /health` — liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
