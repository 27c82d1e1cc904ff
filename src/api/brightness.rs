use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::error::{bad_request, ErrorResponse};
use super::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrightnessBody {
    /// Display brightness in percent, 0-100.
    pub brightness: i32,
}

/// Set the display brightness
#[utoipa::path(
    post,
    path = "/brightness",
    request_body = BrightnessBody,
    responses(
        (status = 200, description = "Brightness updated"),
        (status = 400, description = "Malformed body or value outside 0-100", body = ErrorResponse)
    ),
    tag = "controls"
)]
pub async fn set_brightness(
    State(app): State<AppState>,
    body: Result<Json<BrightnessBody>, JsonRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;

    // Out-of-range values are rejected, never clamped.
    let brightness = u8::try_from(body.brightness)
        .ok()
        .filter(|b| *b <= 100)
        .ok_or_else(|| bad_request(format!("Brightness {} outside 0-100", body.brightness)))?;

    app.state.set_brightness(brightness);
    info!(brightness, "Brightness updated");
    Ok(StatusCode::OK)
}

/// Read the current display brightness
#[utoipa::path(
    get,
    path = "/brightness",
    responses(
        (status = 200, description = "Current brightness", body = BrightnessBody)
    ),
    tag = "controls"
)]
pub async fn get_brightness(State(app): State<AppState>) -> Json<BrightnessBody> {
    Json(BrightnessBody {
        brightness: i32::from(app.state.brightness()),
    })
}
