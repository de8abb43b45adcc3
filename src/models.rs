use std::sync::Arc;

use crate::acceleration::{Acceleration, ComputeMode, GpuInfo};
use crate::config::Config;
use crate::detection::{DetectionMethod, MimeDetector};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub detector: Arc<MimeDetector>,
    pub acceleration: Arc<Acceleration>,
}

impl AppState {
    pub fn new(config: Config, acceleration: Acceleration) -> Self {
        Self {
            config,
            detector: Arc::new(MimeDetector::new()),
            acceleration: Arc::new(acceleration),
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub compute_mode: ComputeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuInfo>,
}

/// Classification of a single uploaded part.
#[derive(Debug, serde::Serialize)]
pub struct FileDetection {
    /// Multipart field name
    pub field: Option<String>,
    /// Client-supplied filename, if any
    pub filename: Option<String>,
    /// Client-supplied content type, reduced to `type/subtype`
    pub declared_type: Option<String>,
    pub media_type: Option<&'static str>,
    pub method: DetectionMethod,
    pub supported_image: bool,
    /// Name to persist the part under: the original name or a synthesized one
    pub stored_name: String,
    pub size: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct DetectResponse {
    pub files: Vec<FileDetection>,
}

#[derive(Debug, serde::Serialize)]
pub struct FormatsResponse {
    pub supported_images: Vec<&'static str>,
    pub custom_extensions: Vec<ExtensionMapping>,
}

#[derive(Debug, serde::Serialize)]
pub struct ExtensionMapping {
    pub extension: &'static str,
    pub media_type: &'static str,
}
