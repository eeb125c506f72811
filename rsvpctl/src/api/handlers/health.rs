use axum::{extract::State, http::StatusCode};

use crate::AppState;

/// Check that the database answers a query against the RSVP table
#[utoipa::path(
    get,
    path = "/check-db-health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = String, content_type = "text/plain"),
        (status = 500, description = "Database unreachable or schema missing", body = String, content_type = "text/plain"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn check_db_health(State(state): State<AppState>) -> (StatusCode, String) {
    match sqlx::query("SELECT 1 FROM form_responses LIMIT 1").fetch_optional(&state.db).await {
        Ok(_) => (StatusCode::OK, "Database is alive".to_string()),
        Err(e) => {
            tracing::error!("Database health check failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {e}"))
        }
    }
}

/// Process liveness; never touches storage
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Process is up", body = String, content_type = "text/plain"))
)]
pub async fn healthz() -> &'static str {
    "OK"
}
