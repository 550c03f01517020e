//! Root, health and liveness endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::time::Duration;

use crate::AppState;

/// Database probe budget; a slower answer counts as disconnected
const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", state.settings.app_name),
    })
}

/// GET /api/v1/health
///
/// Always 200; `database` reports whether `SELECT 1` succeeded.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match tokio::time::timeout(DB_PROBE_TIMEOUT, crate::db::ping(&state.db)).await {
        Ok(Ok(())) => "connected",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            "disconnected"
        }
        Err(_) => {
            tracing::warn!("Health check database probe timed out");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        database: database.to_string(),
    })
}

/// GET /api/v1/health/live
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
