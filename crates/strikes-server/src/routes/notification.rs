use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/notification — the current treat announcement, if any.
pub async fn get_notification(State(app): State<AppState>) -> Json<serde_json::Value> {
    match app.board.current() {
        Some(n) => Json(serde_json::json!({
            "message": n.message,
            "posted_at": n.posted_at,
            "expires_at": n.expires_at,
        })),
        None => Json(serde_json::json!({ "message": null })),
    }
}
