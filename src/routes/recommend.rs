use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::engine::{RecommendError, RecommendRequest};
use crate::response::AppError;
use crate::state::AppState;

pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Response {
    match state.engine().recommend(&request) {
        Ok(roadmap) => Json(roadmap).into_response(),
        Err(RecommendError::InvalidScores) => {
            AppError::validation("Invalid scores format").into_response()
        }
    }
}
