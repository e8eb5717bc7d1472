use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/activity", get(handlers::get_activity))
        .route("/api/summary", get(handlers::get_summary))
        .route("/healthz", get(handlers::health))
        .with_state(state)
}
