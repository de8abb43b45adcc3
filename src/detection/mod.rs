//! Content Classification
//!
//! Classifies uploaded files by magic bytes and/or filename extension.
//!
//! Content is trusted over the filename: a renamed file still carries its
//! real signature, so [`MimeDetector::detect`] only consults the filename
//! when the bytes are absent or unrecognised.
//!
//! ```text
//!  bytes ──▶ signature table ──match──▶ (type, "content")
//!                 │ no match
//!                 ▼
//!  name  ──▶ extension tables ─match──▶ (type, "filename")
//!                 │ no match
//!                 ▼
//!             (None, "none")
//! ```

pub mod signatures;
pub mod tables;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

pub use signatures::{Pattern, Signature, SIGNATURES};
use tables::{CUSTOM_EXTENSIONS, DEFAULT_EXTENSIONS, FALLBACK_EXTENSION, SUPPORTED_IMAGES};

/// Which strategy produced a classification.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Content,
    Filename,
    None,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMethod::Content => write!(f, "content"),
            DetectionMethod::Filename => write!(f, "filename"),
            DetectionMethod::None => write!(f, "none"),
        }
    }
}

/// Outcome of [`MimeDetector::detect`]. A missing media type is a normal result.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Detection {
    pub media_type: Option<&'static str>,
    pub method: DetectionMethod,
}

impl Detection {
    fn none() -> Self {
        Self {
            media_type: None,
            method: DetectionMethod::None,
        }
    }
}

/// Immutable classifier; build once and share (`Arc<MimeDetector>`).
#[derive(Debug, Clone)]
pub struct MimeDetector {
    signatures: &'static [Signature],
    custom_types: HashMap<&'static str, &'static str>,
    extensions: HashMap<&'static str, &'static str>,
    supported_images: HashSet<&'static str>,
}

impl Default for MimeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MimeDetector {
    pub fn new() -> Self {
        Self {
            signatures: SIGNATURES,
            custom_types: CUSTOM_EXTENSIONS.iter().copied().collect(),
            extensions: DEFAULT_EXTENSIONS.iter().copied().collect(),
            supported_images: SUPPORTED_IMAGES.iter().copied().collect(),
        }
    }

    /// Detect the media type from leading magic bytes.
    ///
    /// ZIP-based containers (DOCX, PPTX, XLSX, plain archives) share one
    /// header and are reported as no match.
    pub fn detect_from_content(&self, content: &[u8]) -> Option<&'static str> {
        signatures::first_match(self.signatures, content).and_then(|sig| sig.media_type)
    }

    /// Detect the media type from the filename extension (case-insensitive).
    pub fn detect_from_filename(&self, filename: &str) -> Option<&'static str> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| !ext.is_empty())?;

        if let Some(media_type) = self.custom_types.get(ext.as_str()).copied() {
            return Some(media_type);
        }

        mime_guess::from_ext(&ext).first_raw()
    }

    /// Detect using both sources, preferring content over filename.
    ///
    /// Empty content and empty filenames count as absent.
    pub fn detect(&self, filename: Option<&str>, content: Option<&[u8]>) -> Detection {
        if let Some(media_type) = content
            .filter(|bytes| !bytes.is_empty())
            .and_then(|bytes| self.detect_from_content(bytes))
        {
            debug!(media_type, "Detected MIME from content");
            return Detection {
                media_type: Some(media_type),
                method: DetectionMethod::Content,
            };
        }

        if let Some(media_type) = filename
            .filter(|name| !name.is_empty())
            .and_then(|name| self.detect_from_filename(name))
        {
            debug!(media_type, "Detected MIME from filename");
            return Detection {
                media_type: Some(media_type),
                method: DetectionMethod::Filename,
            };
        }

        warn!(filename = filename.unwrap_or_default(), "Could not detect MIME type");
        Detection::none()
    }

    /// Canonical extension for a media type, or `""` when unmapped.
    pub fn extension_for(&self, media_type: &str) -> &'static str {
        self.extensions.get(media_type).copied().unwrap_or("")
    }

    pub fn is_supported_image(&self, media_type: &str) -> bool {
        self.supported_images.contains(media_type)
    }

    /// Builds `file[_<index>]<ext>` for content persisted without a name.
    pub fn synthesize_filename(&self, media_type: &str, index: usize) -> String {
        let ext = match self.extension_for(media_type) {
            "" => FALLBACK_EXTENSION,
            ext => ext,
        };

        if index > 0 {
            format!("file_{}{}", index, ext)
        } else {
            format!("file{}", ext)
        }
    }

    /// Supported image media types, sorted for stable output.
    pub fn supported_images(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.supported_images.iter().copied().collect();
        types.sort_unstable();
        types
    }

    /// Extension overrides consulted before the generic database.
    pub fn custom_extensions(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs: Vec<_> = self.custom_types.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        pairs
    }
}
