// Static lookup tables for the content classifier

/// Extensions that generic extension databases resolve poorly or not at all.
/// Keys are lowercase and carry no leading dot.
pub const CUSTOM_EXTENSIONS: &[(&str, &str)] = &[
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("bmp", "image/bmp"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
];

pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Canonical extension (with leading dot) used when naming persisted content.
pub const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/tiff", ".tiff"),
    ("image/bmp", ".bmp"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    ("image/x-icon", ".ico"),
    ("application/pdf", ".pdf"),
    (DOCX, ".docx"),
    (PPTX, ".pptx"),
    (XLSX, ".xlsx"),
    ("text/html", ".html"),
    ("text/plain", ".txt"),
    ("text/markdown", ".md"),
    ("audio/wav", ".wav"),
    ("audio/mpeg", ".mp3"),
    ("audio/x-wav", ".wav"),
];

/// Image formats the document engine accepts.
pub const SUPPORTED_IMAGES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/tiff",
    "image/bmp",
    "image/webp",
    "image/svg+xml",
    "image/x-icon",
];

/// Extension used when a media type has no canonical extension.
pub const FALLBACK_EXTENSION: &str = ".bin";
