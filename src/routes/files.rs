//! Upload classification endpoints
//!
//! - `POST /api/files/detect` - classify every file part of a multipart upload
//!   (plain form fields without a filename are skipped)
//! - `GET /api/files/formats` - list accepted image types and extension overrides

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use crate::detection::MimeDetector;
use crate::models::{AppState, DetectResponse, ExtensionMapping, FileDetection, FormatsResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/files/detect", post(detect_files))
        .route("/api/files/formats", get(list_formats))
        .with_state(state)
}

async fn detect_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DetectResponse>> {
    let mut files = Vec::new();
    let mut unnamed = 0;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty());
        let declared_type = field.content_type().and_then(declared_essence);

        if filename.is_none() && is_form_value(declared_type.as_deref()) {
            debug!(field = field_name.as_deref().unwrap_or_default(), "Skipping form field");
            continue;
        }

        let data = field.bytes().await?;

        let file = classify(&state.detector, field_name, filename, declared_type, &data, unnamed);
        if file.filename.is_none() {
            unnamed += 1;
        }
        files.push(file);
    }

    if files.is_empty() {
        return Err(AppError::InvalidRequest("no files in upload".to_string()));
    }

    info!(count = files.len(), "Classified uploaded files");
    Ok(Json(DetectResponse { files }))
}

async fn list_formats(State(state): State<AppState>) -> Json<FormatsResponse> {
    let custom_extensions = state
        .detector
        .custom_extensions()
        .into_iter()
        .map(|(extension, media_type)| ExtensionMapping {
            extension,
            media_type,
        })
        .collect();

    Json(FormatsResponse {
        supported_images: state.detector.supported_images(),
        custom_extensions,
    })
}

fn classify(
    detector: &MimeDetector,
    field: Option<String>,
    filename: Option<String>,
    declared_type: Option<String>,
    data: &[u8],
    unnamed_index: usize,
) -> FileDetection {
    let detection = detector.detect(filename.as_deref(), Some(data));
    let media_type = detection.media_type;

    let stored_name = match &filename {
        Some(name) => name.clone(),
        None => detector.synthesize_filename(media_type.unwrap_or_default(), unnamed_index),
    };

    info!(
        filename = %stored_name,
        media_type = media_type.unwrap_or("unknown"),
        method = %detection.method,
        "Upload classified"
    );

    FileDetection {
        field,
        filename,
        declared_type,
        media_type,
        method: detection.method,
        supported_image: media_type.is_some_and(|t| detector.is_supported_image(t)),
        stored_name,
        size: data.len() as u64,
    }
}

/// Unnamed parts sent as text (or with no content type, as browsers send
/// ordinary form inputs) are form values, not uploads.
fn is_form_value(declared_type: Option<&str>) -> bool {
    matches!(declared_type, None | Some("text/plain"))
}

/// Reduces a client content type such as `image/PNG; q=1` to `image/png`.
fn declared_essence(content_type: &str) -> Option<String> {
    content_type
        .parse::<mime::Mime>()
        .ok()
        .map(|m| m.essence_str().to_ascii_lowercase())
}
