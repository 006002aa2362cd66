pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::export::handlers as export;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/suggestions",
            get(tailoring::handle_list_suggestions).post(tailoring::handle_submit),
        )
        .route(
            "/api/v1/suggestions/:id/document",
            get(export::handle_download_document),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
