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
pub struct TextBody {
    /// Text shown verbatim while the display is in free-text mode.
    pub text: String,
}

/// Set the free-text override
#[utoipa::path(
    post,
    path = "/text",
    request_body = TextBody,
    responses(
        (status = 200, description = "Text updated"),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    ),
    tag = "controls"
)]
pub async fn set_text(
    State(app): State<AppState>,
    body: Result<Json<TextBody>, JsonRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;

    app.state.set_text(body.text);
    info!("Free text updated");
    Ok(StatusCode::OK)
}
