pub mod api;
mod config;
mod layout;
mod panel;
mod providers;
mod render;
mod state;
mod sync;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use panel::{sim::SimPanel, Panel};
use providers::timetable::TimetableClient;
use state::SharedState;
use sync::Poller;

#[derive(OpenApi)]
#[openapi(
    info(title = "Departure Board Control API", version = "0.2.0"),
    paths(
        api::brightness::set_brightness,
        api::brightness::get_brightness,
        api::mode::set_mode,
        api::mode::get_mode,
        api::text::set_text,
        api::health::health_check,
    ),
    components(schemas(
        api::ErrorResponse,
        api::brightness::BrightnessBody,
        api::mode::ModeBody,
        api::text::TextBody,
        api::health::HealthResponse,
    )),
    tags(
        (name = "controls", description = "Runtime display controls"),
        (name = "health", description = "Daemon health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Load config
    let config = Config::load("config.yaml").expect("Failed to load config");
    config.validate().expect("Invalid configuration");
    tracing::info!(
        provider = %config.provider_url,
        listen = %config.listen_addr,
        "Loaded configuration"
    );

    // Acquire the display before any worker starts; failure here is fatal.
    let display: Box<dyn Panel> =
        Box::new(SimPanel::new().expect("Failed to initialize display panel"));

    let state = Arc::new(SharedState::new(config.brightness));

    // Start the timetable poller in the background
    let client =
        TimetableClient::new(&config.provider_url).expect("Failed to build timetable client");
    let poller = Poller::new(
        client,
        state.clone(),
        Duration::from_secs(config.poll_interval_secs),
    );
    tokio::spawn(poller.run());

    // Start the render loop on its own thread; device presentation blocks.
    let running = Arc::new(AtomicBool::new(true));
    let render_state = state.clone();
    let render_running = running.clone();
    let render_tick = Duration::from_millis(config.render_tick_ms);
    let render_thread = std::thread::Builder::new()
        .name("render".to_string())
        .spawn(move || render::run(display, render_state, render_running, render_tick))
        .expect("Failed to spawn render thread");

    // Build the control plane
    let app = Router::new()
        .merge(api::router(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind control-plane listener");
    tracing::info!(addr = %config.listen_addr, "Control plane listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Control server failed");

    // In-flight requests have completed; stop the render loop and release
    // the display before exiting.
    tracing::info!("Shutting down");
    running.store(false, Ordering::Relaxed);
    render_thread.join().expect("Render thread panicked");
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
