pub mod embed;
pub mod error;
pub mod notify;
pub mod routes;
pub mod state;
pub mod tracker;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;
pub use tracker::Tracker;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Roster
        .route("/api/roster", get(routes::roster::get_roster))
        .route("/api/reset", post(routes::strikes::reset_all))
        // Employees
        .route("/api/employees", post(routes::employees::add_employee))
        .route(
            "/api/employees/{id}",
            axum::routing::delete(routes::employees::remove_employee),
        )
        .route(
            "/api/employees/{id}/name",
            put(routes::employees::rename_employee),
        )
        // Strikes
        .route(
            "/api/employees/{id}/strikes",
            post(routes::strikes::add_strike),
        )
        .route(
            "/api/employees/{id}/reset",
            post(routes::strikes::reset_strikes),
        )
        .route(
            "/api/employees/{id}/magic-reason",
            post(routes::strikes::magic_reason),
        )
        // Notification
        .route(
            "/api/notification",
            get(routes::notification::get_notification),
        )
        .fallback(embed::static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the strike tracker web UI.
///
/// The page is embedded in the binary via rust-embed and talks to the JSON
/// API on the same origin.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let app_state = AppState::new(root)?;
    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("strike tracker listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
