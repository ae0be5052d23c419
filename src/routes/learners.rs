use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::db::operations::{self, NewLearner};
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct RegisteredResponse {
    id: String,
    message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    Json(new): Json<NewLearner>,
) -> Result<Response, AppError> {
    let Some(db) = state.db() else {
        return Err(AppError::unavailable("Database not available"));
    };

    let learner = operations::insert_learner(&db, &new).await.map_err(|e| {
        error!(error = %e, "learner registration failed");
        AppError::internal(e.to_string())
    })?;

    Ok(Json(RegisteredResponse {
        id: learner.id,
        message: "Learner registered successfully",
    })
    .into_response())
}

pub async fn get_learner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(db) = state.db() else {
        return Err(AppError::unavailable("Database not available"));
    };

    let learner = operations::get_learner(&db, &id).await.map_err(|e| {
        error!(error = %e, "learner lookup failed");
        AppError::internal(e.to_string())
    })?;

    match learner {
        Some(learner) => Ok(Json(learner).into_response()),
        None => Err(AppError::not_found("Learner not found")),
    }
}
