// HTTP request handlers
use crate::domain::error::DashboardError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

fn error_response(err: DashboardError) -> Response {
    let status = match err {
        DashboardError::UnknownAction { .. } => StatusCode::NOT_FOUND,
        DashboardError::DuplicateAction { .. } => StatusCode::CONFLICT,
        DashboardError::Fetch { .. } | DashboardError::MalformedSnapshot { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List registered actions and whether each is mounted
pub async fn list_actions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.shell.actions().await)
}

/// Metric cards on the page, with their current scale
pub async fn list_cards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.page.cards().await)
}

/// Mount an action (no-op when already mounted)
pub async fn open_action(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.shell.open(&key).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            tracing::warn!("Cannot open action {}: {}", key, e);
            error_response(e)
        }
    }
}

/// Render state of a mounted action
pub async fn get_action(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.shell.view(&key).await {
        Ok(Some(view)) => Json(view).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("client action '{}' is not mounted", key) })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Unmount an action
pub async fn close_action(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.shell.close(&key).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("client action '{}' is not mounted", key) })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
