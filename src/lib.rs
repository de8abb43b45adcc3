// Docling Enhanced - serving wrapper with GPU mode selection and upload classification

pub mod acceleration;
pub mod config;
pub mod detection;
pub mod engine;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use detection::{Detection, DetectionMethod, MimeDetector};
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
