//! Magic-byte signature table
//!
//! Signatures are evaluated top to bottom and the first matching entry
//! decides the outcome. An entry may resolve to `None`, which ends the scan
//! without a match (used for containers that cannot be told apart by their
//! leading bytes alone).

/// Number of leading bytes searched for markers that may appear after a
/// preamble (XML declaration, comments, BOM).
pub const MARKER_WINDOW: usize = 1000;

/// How a signature recognises content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Content starts with the given bytes.
    Prefix(&'static [u8]),
    /// RIFF container carrying the given form type within its 12-byte header.
    RiffForm(&'static [u8]),
    /// Marker occurs anywhere within the first `window` bytes.
    Within {
        marker: &'static [u8],
        window: usize,
    },
}

impl Pattern {
    pub fn matches(&self, content: &[u8]) -> bool {
        match *self {
            Pattern::Prefix(prefix) => content.starts_with(prefix),
            Pattern::RiffForm(form) => {
                content.starts_with(b"RIFF") && contains(head(content, 12), form)
            }
            Pattern::Within { marker, window } => contains(head(content, window), marker),
        }
    }
}

/// A single row of the signature table.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub pattern: Pattern,
    /// `None` marks content that is recognised but deliberately left unclassified.
    pub media_type: Option<&'static str>,
}

impl Signature {
    const fn new(pattern: Pattern, media_type: &'static str) -> Self {
        Self {
            pattern,
            media_type: Some(media_type),
        }
    }

    const fn ambiguous(pattern: Pattern) -> Self {
        Self {
            pattern,
            media_type: None,
        }
    }
}

/// Built-in signatures in priority order.
pub const SIGNATURES: &[Signature] = &[
    Signature::new(Pattern::Prefix(&[0xFF, 0xD8, 0xFF]), "image/jpeg"),
    Signature::new(Pattern::Prefix(b"\x89PNG\r\n\x1a\n"), "image/png"),
    Signature::new(Pattern::Prefix(b"GIF87a"), "image/gif"),
    Signature::new(Pattern::Prefix(b"GIF89a"), "image/gif"),
    Signature::new(Pattern::Prefix(b"BM"), "image/bmp"),
    Signature::new(Pattern::Prefix(b"II\x2a\x00"), "image/tiff"),
    Signature::new(Pattern::Prefix(b"MM\x00\x2a"), "image/tiff"),
    Signature::new(Pattern::RiffForm(b"WEBP"), "image/webp"),
    Signature::new(Pattern::Prefix(b"%PDF"), "application/pdf"),
    // DOCX, PPTX, XLSX and plain archives all share this header.
    Signature::ambiguous(Pattern::Prefix(b"PK\x03\x04")),
    Signature::new(
        Pattern::Within {
            marker: b"<svg",
            window: MARKER_WINDOW,
        },
        "image/svg+xml",
    ),
    Signature::new(Pattern::Prefix(&[0x00, 0x00, 0x01, 0x00]), "image/x-icon"),
];

/// Returns the first signature matching `content`, if any.
pub fn first_match<'a>(signatures: &'a [Signature], content: &[u8]) -> Option<&'a Signature> {
    signatures.iter().find(|sig| sig.pattern.matches(content))
}

fn head(content: &[u8], len: usize) -> &[u8] {
    &content[..content.len().min(len)]
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_requires_full_marker() {
        let pattern = Pattern::Prefix(b"%PDF");
        assert!(pattern.matches(b"%PDF-1.7"));
        assert!(!pattern.matches(b"%PD"));
        assert!(!pattern.matches(b""));
    }

    #[test]
    fn test_riff_form_checks_header_only() {
        let pattern = Pattern::RiffForm(b"WEBP");
        assert!(pattern.matches(b"RIFF\x24\x00\x00\x00WEBPVP8 "));
        // WAVE audio shares the RIFF container
        assert!(!pattern.matches(b"RIFF\x24\x00\x00\x00WAVEfmt "));
        // marker beyond the 12-byte header is ignored
        assert!(!pattern.matches(b"RIFF\x24\x00\x00\x00\x00WEBP"));
        assert!(!pattern.matches(b"RIFF"));
    }

    #[test]
    fn test_within_respects_window() {
        let pattern = Pattern::Within {
            marker: b"<svg",
            window: 16,
        };
        assert!(pattern.matches(b"<svg xmlns=\"\">"));
        assert!(pattern.matches(b"<?xml?>\n<svg>"));

        let mut late = vec![b' '; 16];
        late.extend_from_slice(b"<svg>");
        assert!(!pattern.matches(&late));
    }

    #[test]
    fn test_marker_straddling_window_edge_is_missed() {
        let mut content = vec![b' '; MARKER_WINDOW - 2];
        content.extend_from_slice(b"<svg>");
        let sig = first_match(SIGNATURES, &content);
        assert!(sig.is_none());
    }

    #[test]
    fn test_table_order_is_priority() {
        // an SVG part inside an archive must not win over the archive header
        let mut zip = b"PK\x03\x04".to_vec();
        zip.extend_from_slice(b"word/document.xml <svg");
        let sig = first_match(SIGNATURES, &zip).expect("zip signature should match");
        assert_eq!(sig.media_type, None);
    }

    #[test]
    fn test_every_signature_has_a_reachable_marker() {
        for sig in SIGNATURES {
            let sample: Vec<u8> = match sig.pattern {
                Pattern::Prefix(prefix) => prefix.to_vec(),
                Pattern::RiffForm(form) => {
                    let mut v = b"RIFF\x00\x00\x00\x00".to_vec();
                    v.extend_from_slice(form);
                    v
                }
                Pattern::Within { marker, .. } => marker.to_vec(),
            };
            let found = first_match(SIGNATURES, &sample).expect("sample should match");
            assert_eq!(found.media_type, sig.media_type);
        }
    }
}
