use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use crate::tracker;

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
pub struct NameBody {
    pub name: String,
}

/// POST /api/employees — append an employee. Blank names and a full roster
/// are reported as `added: false`.
pub async fn add_employee(
    State(app): State<AppState>,
    Json(body): Json<NameBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let id = tokio::task::spawn_blocking(move || {
        tracker::lock(&shared).add_employee(&body.name)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if id.is_some() {
        app.changed();
    }
    Ok(Json(serde_json::json!({ "added": id.is_some(), "id": id })))
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

/// PUT /api/employees/:id/name — replace the display name as given.
pub async fn rename_employee(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NameBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let renamed = tokio::task::spawn_blocking(move || {
        tracker::lock(&shared).rename_employee(&id, &body.name)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if renamed {
        app.changed();
    }
    Ok(Json(serde_json::json!({ "renamed": renamed })))
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

/// DELETE /api/employees/:id?confirm=true — remove an employee and its
/// history. Without `confirm=true` nothing happens.
pub async fn remove_employee(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let removed = tokio::task::spawn_blocking(move || {
        tracker::lock(&shared).remove_employee(&id, &params.confirm)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if removed {
        app.changed();
    }
    Ok(Json(serde_json::json!({ "removed": removed })))
}
