use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    ingest_connected: bool,
    timestamp: String,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

async fn root(State(state): State<AppState>) -> Response {
    let db_healthy = match state.db() {
        Some(db) => db.health_status().await.healthy,
        None => false,
    };

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        database: if db_healthy { "connected" } else { "disconnected" },
        ingest_connected: state.ingest_connected(),
        timestamp: now_iso(),
    };

    // Degraded still answers 200; the process itself is alive and the
    // recommendation path works without the database.
    (StatusCode::OK, Json(response)).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    let response = LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
