use std::time::Instant;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the `SELECT 1` probe, absent when it failed.
    pub db_latency_ms: Option<u64>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let probe = campus_db::health_check(&state.pool).await;

    let db_latency_ms = match &probe {
        Ok(()) => Some(started.elapsed().as_millis() as u64),
        Err(err) => {
            tracing::warn!(error = %err, "Database health probe failed");
            None
        }
    };

    Json(HealthResponse {
        status: if probe.is_ok() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy: probe.is_ok(),
        db_latency_ms,
    })
}

/// Root-level routes, mounted outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
