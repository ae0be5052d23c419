use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::db::operations;
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ParentViewEntry {
    id: String,
    focus: String,
    timestamp: String,
}

/// Most-recent-first focus telemetry for one subject, capped at 50 rows.
pub async fn parent_view(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(db) = state.db() else {
        return Err(AppError::unavailable("Database not available"));
    };

    let events = operations::recent_focus_events(&db, &subject_id)
        .await
        .map_err(|e| {
            error!(error = %e, subject_id = %subject_id, "telemetry read failed");
            AppError::internal(e.to_string())
        })?;

    let entries: Vec<ParentViewEntry> = events
        .into_iter()
        .map(|event| ParentViewEntry {
            id: event.id,
            focus: event.status,
            timestamp: event
                .received_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        })
        .collect();

    Ok(Json(entries).into_response())
}
