//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/health` - Health check with the selected compute mode
//! - `/api/files` - Upload classification

pub mod files;
pub mod health;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.server.max_upload_bytes;
    let origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(health::router(state.clone()))
        .merge(files::router(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    apply_cors(api_router, &origins)
}
