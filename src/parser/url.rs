//! Video-id extraction from pasted URL strings.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::error::ParseError;

/// Regex pattern matching the family of supported YouTube URL shapes:
/// canonical watch links (`?v=`), short `/v/` and `/e/` links, embed links,
/// and `youtu.be` shortened-domain links. Captures the 11-character id.
#[allow(clippy::expect_used)]
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("video id regex is valid") // Static pattern, safe to panic
});

/// Extracts the 11-character video identifier from an arbitrary URL string.
///
/// Returns `None` when the string does not conform to any supported shape.
/// Callers must treat that as a validation failure, not a crash.
///
/// # Examples
///
/// ```
/// use snapstream_core::parser::extract_video_id;
///
/// let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
/// assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
/// assert!(extract_video_id("https://example.com/clip").is_none());
/// ```
#[must_use]
pub fn extract_video_id(input: &str) -> Option<String> {
    let id = VIDEO_ID_PATTERN
        .captures(input)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());
    trace!(matched = id.is_some(), "video id extraction");
    id
}

/// Validates that pasted input is non-empty and returns the trimmed URL.
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] for empty or whitespace-only input.
pub fn validate_input(input: &str) -> Result<String, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    // ==================== Supported URL Shapes ====================

    #[test]
    fn test_extract_video_id_canonical_watch_link() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_short_domain_link() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_embed_link() {
        let id = extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_short_v_link() {
        let id = extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_mobile_host() {
        let id = extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_with_extra_query_parameters() {
        let same_id = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?list=PL590L5WQmH8e&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
        ];
        for url in same_id {
            assert_eq!(extract_video_id(url).as_deref(), Some(ID), "url: {url}");
        }
    }

    // ==================== Non-Conforming Input ====================

    #[test]
    fn test_extract_video_id_rejects_other_hosts() {
        assert!(extract_video_id("https://vimeo.com/123456789").is_none());
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ-like").is_none());
    }

    #[test]
    fn test_extract_video_id_rejects_short_token() {
        // Ten characters is one short of a valid id.
        assert!(extract_video_id("https://youtu.be/dQw4w9WgXc").is_none());
    }

    #[test]
    fn test_extract_video_id_rejects_plain_text() {
        assert!(extract_video_id("just some text").is_none());
        assert!(extract_video_id("").is_none());
    }

    // ==================== Input Validation ====================

    #[test]
    fn test_validate_input_trims_whitespace() {
        let url = validate_input("  https://youtu.be/dQw4w9WgXcQ \n").unwrap();
        assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_validate_input_rejects_empty() {
        assert!(matches!(validate_input(""), Err(ParseError::EmptyInput)));
        assert!(matches!(validate_input("   "), Err(ParseError::EmptyInput)));
    }
}
