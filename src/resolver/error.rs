//! Error types for the metadata and format resolvers.

use std::fmt;

use thiserror::Error;

/// Which external dependency a resolver error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// The oEmbed metadata service.
    Metadata,
    /// The format extraction service.
    Formats,
}

impl FetchStage {
    /// Returns the short name used in log fields and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Formats => "download links",
        }
    }
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while fetching metadata or format options.
///
/// Remote service messages are carried verbatim so they can be surfaced to
/// the user unchanged.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// HTTP client construction failed
    #[error("{stage} client construction failed: {reason}")]
    Client {
        /// Which resolver was being built
        stage: FetchStage,
        /// Builder error text
        reason: String,
    },

    /// The request never produced an HTTP response
    #[error(
        "failed to reach {stage} service: {reason}\n  Suggestion: Check your network connection and try again"
    )]
    Network {
        /// Which dependency was being called
        stage: FetchStage,
        /// Transport error text
        reason: String,
    },

    /// The dependency answered with a non-success HTTP status
    #[error("{stage} request failed with HTTP {status}")]
    Fetch {
        /// Which dependency was being called
        stage: FetchStage,
        /// The HTTP status code received
        status: u16,
    },

    /// The dependency reported a structured error payload
    #[error("{message}")]
    Remote {
        /// Service-provided message, surfaced verbatim
        message: String,
    },

    /// The response body could not be decoded
    #[error("unexpected {stage} response format")]
    MalformedResponse {
        /// Which dependency produced the body
        stage: FetchStage,
    },

    /// The extraction service reported a status this system cannot interpret
    #[error("could not find downloadable formats")]
    UnsupportedFormat,
}

impl ResolveError {
    /// Creates a `Client` error from a builder failure.
    #[must_use]
    pub fn client(stage: FetchStage, reason: &str) -> Self {
        Self::Client {
            stage,
            reason: reason.to_string(),
        }
    }

    /// Creates a `Network` error from a transport failure.
    #[must_use]
    pub fn network(stage: FetchStage, reason: &str) -> Self {
        Self::Network {
            stage,
            reason: reason.to_string(),
        }
    }

    /// Creates a `Fetch` error from a non-success HTTP status.
    #[must_use]
    pub fn fetch(stage: FetchStage, status: u16) -> Self {
        Self::Fetch { stage, status }
    }

    /// Creates a `Remote` error carrying the service-provided message.
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed(stage: FetchStage) -> Self {
        Self::MalformedResponse { stage }
    }
}
