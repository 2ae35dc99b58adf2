use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/display", get(handlers::get_display))
        .route("/api/health", get(handlers::get_health))
        .with_state(state)
}
