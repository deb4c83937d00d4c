// Route table for the dashboard shell
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    close_action, get_action, health_check, list_actions, list_cards, open_action,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/actions", get(list_actions))
        .route("/page/cards", get(list_cards))
        .route(
            "/actions/:key",
            get(get_action).post(open_action).delete(close_action),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
