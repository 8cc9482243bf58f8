//! Error boundary for the search pipeline.

use thiserror::Error;

use crate::parser::ParseError;
use crate::resolver::{FetchStage, ResolveError};

/// Fallback user message when a failure has no service-provided text.
const GENERIC_USER_MESSAGE: &str =
    "Could not fetch details. The URL may be invalid or the service is temporarily unavailable.";

/// Any failure surfaced by the search pipeline.
///
/// None of these are fatal to the process; all are converted into a single
/// user-visible message string at the orchestrator boundary via
/// [`SearchError::user_message`].
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Input validation or video-id extraction failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A dependency call failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl SearchError {
    /// The single user-visible message for this failure.
    ///
    /// Remote service messages pass through verbatim; everything else maps
    /// to a short actionable string.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(ParseError::EmptyInput) => "Please enter a URL to search.".to_string(),
            Self::Parse(ParseError::UnsupportedUrl { .. }) => {
                "Invalid or unsupported YouTube URL.".to_string()
            }
            Self::Resolve(ResolveError::Fetch { stage, status }) => match stage {
                FetchStage::Metadata => format!("Failed to fetch metadata (status: {status})"),
                FetchStage::Formats => {
                    format!("Failed to fetch download links (status: {status})")
                }
            },
            Self::Resolve(ResolveError::Remote { message }) => message.clone(),
            Self::Resolve(ResolveError::UnsupportedFormat) => {
                "Could not find downloadable formats.".to_string()
            }
            Self::Resolve(
                ResolveError::Client { .. }
                | ResolveError::Network { .. }
                | ResolveError::MalformedResponse { .. },
            ) => GENERIC_USER_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_empty_input() {
        let err = SearchError::from(ParseError::EmptyInput);
        assert_eq!(err.user_message(), "Please enter a URL to search.");
    }

    #[test]
    fn test_user_message_unsupported_url() {
        let err = SearchError::from(ParseError::no_video_id("https://example.com"));
        assert_eq!(err.user_message(), "Invalid or unsupported YouTube URL.");
    }

    #[test]
    fn test_user_message_fetch_statuses_name_the_stage() {
        let meta = SearchError::from(ResolveError::fetch(FetchStage::Metadata, 502));
        assert_eq!(meta.user_message(), "Failed to fetch metadata (status: 502)");

        let formats = SearchError::from(ResolveError::fetch(FetchStage::Formats, 403));
        assert_eq!(
            formats.user_message(),
            "Failed to fetch download links (status: 403)"
        );
    }

    #[test]
    fn test_user_message_remote_passes_through_verbatim() {
        let err = SearchError::from(ResolveError::remote("Rate limited"));
        assert_eq!(err.user_message(), "Rate limited");
    }

    #[test]
    fn test_user_message_unsupported_format() {
        let err = SearchError::from(ResolveError::UnsupportedFormat);
        assert_eq!(err.user_message(), "Could not find downloadable formats.");
    }

    #[test]
    fn test_user_message_transport_failures_use_generic_text() {
        let err = SearchError::from(ResolveError::network(FetchStage::Metadata, "refused"));
        assert!(err.user_message().contains("Could not fetch details"));
    }
}
