use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::error::{bad_request, ErrorResponse};
use super::AppState;
use crate::state::DisplayMode;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModeBody {
    /// Display mode code: 0 = departures, 1 = free text.
    pub mode: i32,
}

/// Switch the display mode
#[utoipa::path(
    post,
    path = "/mode",
    request_body = ModeBody,
    responses(
        (status = 200, description = "Mode updated"),
        (status = 400, description = "Malformed body or unknown mode code", body = ErrorResponse)
    ),
    tag = "controls"
)]
pub async fn set_mode(
    State(app): State<AppState>,
    body: Result<Json<ModeBody>, JsonRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;

    let mode = DisplayMode::from_wire(body.mode)
        .ok_or_else(|| bad_request(format!("Unknown mode code {}", body.mode)))?;

    app.state.set_mode(mode);
    info!(?mode, "Display mode updated");
    Ok(StatusCode::OK)
}

/// Read the current display mode
#[utoipa::path(
    get,
    path = "/mode",
    responses(
        (status = 200, description = "Current mode code", body = ModeBody)
    ),
    tag = "controls"
)]
pub async fn get_mode(State(app): State<AppState>) -> Json<ModeBody> {
    Json(ModeBody {
        mode: app.state.mode().wire_code(),
    })
}
