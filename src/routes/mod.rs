mod health;
mod learners;
mod monitor;
mod recommend;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/recommend", post(recommend::recommend))
        .route("/api/register", post(learners::register))
        .route("/api/user/:id", get(learners::get_learner))
        .route("/api/parent/:subject_id", get(monitor::parent_view))
        .nest("/api/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}
