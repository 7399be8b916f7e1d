use axum::extract::{Path, State};
use axum::Json;
use strikes_core::StrikesError;

use crate::error::AppError;
use crate::routes::roster::employee_to_json;
use crate::state::AppState;
use crate::tracker;

// ---------------------------------------------------------------------------
// Add strike
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize, Default)]
pub struct StrikeBody {
    #[serde(default)]
    pub reason: Option<String>,
}

/// POST /api/employees/:id/strikes — record a strike. A blank reason is
/// stored as the default reason. The treat announcement, if this strike
/// triggers one, arrives later on /api/notification.
pub async fn add_strike(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StrikeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut tracker = tracker::lock(&shared);
        let recorded = tracker
            .add_strike(&id, body.reason.as_deref())?
            .ok_or_else(|| StrikesError::EmployeeNotFound(id.clone()))?;
        let max_strikes = tracker.roster().limits().max_strikes;
        let employee = tracker
            .roster()
            .get(&id)
            .map(|e| employee_to_json(e, max_strikes));

        Ok::<_, StrikesError>(serde_json::json!({
            "employee": employee,
            "previous_strikes": recorded.previous_strikes,
            "celebrating": recorded.triggers_celebration(),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    app.changed();
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// POST /api/employees/:id/reset — clear one employee's strikes and reasons.
pub async fn reset_strikes(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let reset = tokio::task::spawn_blocking(move || tracker::lock(&shared).reset_strikes(&id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if reset {
        app.changed();
    }
    Ok(Json(serde_json::json!({ "reset": reset })))
}

#[derive(serde::Deserialize)]
pub struct ResetAllBody {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/reset — clear everyone's strikes. Requires `confirm: true`.
pub async fn reset_all(
    State(app): State<AppState>,
    Json(body): Json<ResetAllBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let shared = app.tracker.clone();
    let reset = tokio::task::spawn_blocking(move || tracker::lock(&shared).reset_all(&body.confirm))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if reset {
        app.changed();
    }
    Ok(Json(serde_json::json!({ "reset": reset })))
}

// ---------------------------------------------------------------------------
// Magic reason
// ---------------------------------------------------------------------------

/// POST /api/employees/:id/magic-reason — a generated reason for the strike
/// draft. Never records anything.
pub async fn magic_reason(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reason = tracker::generate_magic_reason(&app.tracker, &app.writer, &id)
        .await
        .ok_or_else(|| AppError::not_found(format!("employee '{id}' not found")))?;
    Ok(Json(serde_json::json!({ "reason": reason })))
}
