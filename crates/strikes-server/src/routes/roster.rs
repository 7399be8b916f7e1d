use axum::extract::State;
use axum::Json;
use strikes_core::employee::Employee;

use crate::state::AppState;
use crate::tracker;

pub(crate) fn employee_to_json(e: &Employee, max_strikes: u32) -> serde_json::Value {
    serde_json::json!({
        "id": e.id,
        "name": e.name,
        "strikes": e.strikes,
        "reasons": e.reasons,
        "treating": e.is_treating(max_strikes),
    })
}

/// GET /api/roster — every employee in roster order, plus the limits the UI
/// enforces.
pub async fn get_roster(State(app): State<AppState>) -> Json<serde_json::Value> {
    let guard = tracker::lock(&app.tracker);
    let roster = guard.roster();
    let limits = roster.limits();
    let employees: Vec<serde_json::Value> = roster
        .employees()
        .iter()
        .map(|e| employee_to_json(e, limits.max_strikes))
        .collect();

    Json(serde_json::json!({
        "employees": employees,
        "full": roster.is_full(),
        "max_employees": limits.max_employees,
        "max_strikes": limits.max_strikes,
        "max_name_len": limits.max_name_len,
    }))
}
