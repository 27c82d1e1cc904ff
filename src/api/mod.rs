pub mod brightness;
pub mod error;
pub mod health;
pub mod mode;
pub mod text;

pub use error::ErrorResponse;

use axum::routing::{get, post};
use axum::Router;

use crate::state::StateHandle;

#[derive(Clone)]
pub struct AppState {
    pub state: StateHandle,
}

/// Control-plane router. Every endpoint is an independent read or
/// whole-value write against shared state; there is no cross-request
/// coordination.
pub fn router(state: StateHandle) -> Router {
    let app_state = AppState { state };

    Router::new()
        .route(
            "/brightness",
            post(brightness::set_brightness).get(brightness::get_brightness),
        )
        .route("/mode", post(mode::set_mode).get(mode::get_mode))
        .route("/text", post(text::set_text))
        .route("/health", get(health::health_check))
        .with_state(app_state)
}
