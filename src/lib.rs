pub mod config;
pub mod db;
pub mod engine;
pub mod ingest;
pub mod logging;
pub mod response;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::GuidanceEngine;
use crate::state::AppState;

/// Router without database or telemetry wiring; used by integration tests.
pub fn create_app() -> axum::Router {
    let engine = Arc::new(GuidanceEngine::bootstrap());
    let state = AppState::new(None, engine, None);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
