//! API route modules.

pub mod download;
pub mod health;

use axum::Router;

use crate::api::server::AppState;

/// Create the main API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/download", download::router())
        .nest("/health", health::router())
        .with_state(state)
}
