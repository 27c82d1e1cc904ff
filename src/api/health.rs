use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the daemon is running
    pub healthy: bool,
    /// Whether a timetable snapshot has been published yet
    pub timetable_loaded: bool,
    /// Number of trips in the current snapshot
    pub trip_count: usize,
    /// RFC 3339 timestamp of the last successful fetch
    pub last_fetch: Option<String>,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Daemon health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(app): State<AppState>) -> Json<HealthResponse> {
    let timetable = app.state.timetable();

    Json(HealthResponse {
        healthy: true,
        timetable_loaded: timetable.is_some(),
        trip_count: timetable.map(|t| t.trips.len()).unwrap_or(0),
        last_fetch: app.state.last_fetch().map(|t| t.to_rfc3339()),
    })
}
