//! Error types for input validation.

use thiserror::Error;

/// Errors that can occur while validating pasted input.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input was empty or whitespace-only
    #[error("no URL provided\n  Suggestion: Paste a video link and try again")]
    EmptyInput,

    /// Input did not match any supported video URL shape
    #[error("unsupported video URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    UnsupportedUrl {
        /// The input that failed validation
        url: String,
        /// Why the input is unsupported
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ParseError {
    /// Creates an `UnsupportedUrl` error for input with no extractable video id.
    #[must_use]
    pub fn no_video_id(url: &str) -> Self {
        Self::UnsupportedUrl {
            url: url.to_string(),
            reason: "no video identifier found".to_string(),
            suggestion: "Use a YouTube watch, share, or embed link".to_string(),
        }
    }
}
