// HTTP request handlers
use crate::application::controller::Activation;
use crate::application::error::DashboardError;
use crate::domain::card::GroupLayout;
use crate::domain::layout::CardKey;
use crate::domain::ui_state::UiSnapshot;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::UnknownCard { .. } => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct PressResponse {
    pub hold_armed: bool,
}

fn wall_clock() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current layout, recomputed from configuration and live entities
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Vec<GroupLayout>> {
    Json(state.dashboard.layout().await)
}

/// Visibility + overlay state
pub async fn get_ui(State(state): State<Arc<AppState>>) -> Json<UiSnapshot> {
    Json(state.dashboard.snapshot().await)
}

/// Stream UI state changes as server-sent events
pub async fn ui_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.dashboard.subscribe();

    let stream = async_stream::stream! {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            match Event::default().event("ui").json_data(&snapshot) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => tracing::warn!("Failed to encode UI snapshot: {}", e),
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn card_pointer_down(
    Path((group, card)): Path<(usize, usize)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PressResponse>, DashboardError> {
    let key = CardKey::new(group, card);
    let hold_armed = state
        .dashboard
        .update(|controller| controller.on_card_pointer_down(key, Instant::now()))
        .await?;
    Ok(Json(PressResponse { hold_armed }))
}

pub async fn card_pointer_up(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_card_pointer_up())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn card_pointer_cancel(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_card_pointer_cancel())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn card_activate(
    Path((group, card)): Path<(usize, usize)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Activation>, DashboardError> {
    let key = CardKey::new(group, card);
    let now = wall_clock();
    let activation = state
        .dashboard
        .update(|controller| controller.on_card_activate(key, now))
        .await?;
    Ok(Json(activation))
}

pub async fn surface_pointer_moved(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_surface_pointer_moved(Instant::now()))
        .await;
    StatusCode::NO_CONTENT
}

pub async fn chrome_enter(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_chrome_enter())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn chrome_leave(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_chrome_leave(Instant::now()))
        .await;
    StatusCode::NO_CONTENT
}

pub async fn background_click(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.on_background_click())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn close_camera(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.close_camera())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn close_more_info(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.close_more_info())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn toggle_radio(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.toggle_radio())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn show_radio(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.show_radio())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn hide_radio(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.hide_radio())
        .await;
    StatusCode::NO_CONTENT
}

pub async fn log_out(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .dashboard
        .update(|controller| controller.log_out())
        .await;
    StatusCode::NO_CONTENT
}
