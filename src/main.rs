// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::controller::{DashboardController, Timings};
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::command_dispatcher::{ChannelDispatcher, run_command_worker};
use crate::infrastructure::config::{load_dashboard_config, load_server_config};
use crate::infrastructure::hass_repository::HassRepository;
use crate::infrastructure::session::InMemorySession;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    background_click, card_activate, card_pointer_cancel, card_pointer_down, card_pointer_up,
    chrome_enter, chrome_leave, close_camera, close_more_info, get_layout, get_ui, health_check,
    hide_radio, log_out, show_radio, surface_pointer_moved, toggle_radio, ui_events,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config()?;
    let dashboard_config = load_dashboard_config()?;
    tracing::info!(
        "Loaded dashboard with {} groups",
        dashboard_config.items.len()
    );

    // Create repository and collaborators (infrastructure layer)
    let session = Arc::new(InMemorySession::new(server_config.home_assistant.token.clone()));
    let repository = Arc::new(HassRepository::new(
        server_config.home_assistant.url.clone(),
        session.clone(),
    ));
    let (dispatcher, commands) = ChannelDispatcher::channel();

    // Create controller and service (application layer)
    let controller = DashboardController::new(
        dashboard_config,
        Timings::from(&server_config.timings),
        Arc::new(dispatcher),
        session,
    );
    let dashboard = DashboardService::new(controller, repository.clone());

    tokio::spawn(run_command_worker(commands, repository));
    tokio::spawn(
        dashboard
            .clone()
            .run_entity_sync(server_config.home_assistant.poll_interval()),
    );
    tokio::spawn(dashboard.clone().run_timers());

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/layout", get(get_layout))
        .route("/ui", get(get_ui))
        .route("/ui/events", get(ui_events))
        .route("/input/cards/:group/:card/pointer-down", post(card_pointer_down))
        .route("/input/cards/:group/:card/pointer-up", post(card_pointer_up))
        .route("/input/cards/:group/:card/pointer-cancel", post(card_pointer_cancel))
        .route("/input/cards/:group/:card/activate", post(card_activate))
        .route("/input/surface/pointer-moved", post(surface_pointer_moved))
        .route("/input/chrome/enter", post(chrome_enter))
        .route("/input/chrome/leave", post(chrome_leave))
        .route("/input/background/click", post(background_click))
        .route("/overlays/camera/close", post(close_camera))
        .route("/overlays/more-info/close", post(close_more_info))
        .route("/overlays/radio/toggle", post(toggle_radio))
        .route("/overlays/radio/show", post(show_radio))
        .route("/overlays/radio/hide", post(hide_radio))
        .route("/session/logout", post(log_out))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = server_config.server.bind;
    tracing::info!("Starting hass-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
