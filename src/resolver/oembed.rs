//! Metadata resolver - fetches title/author/thumbnail via an oEmbed service.
//!
//! The [`MetadataResolver`] calls the noembed oEmbed endpoint for the pasted
//! URL. Browsers cannot call it cross-origin, so the request is indirected
//! through a public relay that forwards the target given in its `quest`
//! query parameter. Single attempt, no retries; a failure here aborts the
//! whole search operation.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{FetchStage, ResolveError};
use super::http_client::build_resolver_http_client;

/// Default relay base used to reach the oEmbed service.
const DEFAULT_RELAY_BASE: &str = "https://api.codetabs.com/v1/proxy";

/// The oEmbed-compatible endpoint queried through the relay.
const OEMBED_ENDPOINT: &str = "https://noembed.com/embed";

/// Raw oEmbed response body. noembed reports lookup failures as a 200 with
/// an `error` field rather than an HTTP error status.
#[derive(Debug, Deserialize)]
struct OembedBody {
    error: Option<String>,
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

/// Metadata for a video as reported by the oEmbed service.
///
/// All fields are optional; callers supply fallback defaults rather than
/// failing on missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Fetches video metadata through the oEmbed relay.
pub struct MetadataResolver {
    client: Client,
    relay_base: String,
}

impl MetadataResolver {
    /// Creates a resolver pointed at the default public relay.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Self::with_relay_base(DEFAULT_RELAY_BASE)
    }

    /// Creates a resolver with a custom relay base (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if HTTP client construction fails.
    pub fn with_relay_base(relay_base: impl Into<String>) -> Result<Self, ResolveError> {
        Ok(Self {
            client: build_resolver_http_client(FetchStage::Metadata)?,
            relay_base: relay_base.into(),
        })
    }

    /// Fetches metadata for the given source URL.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Network`] when the relay cannot be reached
    /// - [`ResolveError::Fetch`] on a non-success HTTP status
    /// - [`ResolveError::Remote`] when the service reports an error payload
    /// - [`ResolveError::MalformedResponse`] when the body is not valid JSON
    #[tracing::instrument(skip(self, url), fields(resolver = "oembed"))]
    pub async fn fetch(&self, url: &str) -> Result<VideoMetadata, ResolveError> {
        let target = format!("{OEMBED_ENDPOINT}?url={}", urlencoding::encode(url));
        let request_url = format!("{}/?quest={target}", self.relay_base);
        debug!("calling oEmbed service through relay");

        let response = self.client.get(&request_url).send().await.map_err(|e| {
            warn!(error = %e, "oEmbed request failed");
            ResolveError::network(FetchStage::Metadata, &e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "oEmbed service returned error status");
            return Err(ResolveError::fetch(FetchStage::Metadata, status.as_u16()));
        }

        let body: OembedBody = response.json().await.map_err(|e| {
            warn!(error = %e, "failed to parse oEmbed response JSON");
            ResolveError::malformed(FetchStage::Metadata)
        })?;

        if let Some(message) = body.error {
            debug!(%message, "oEmbed service reported an error payload");
            return Err(ResolveError::remote(message));
        }

        Ok(VideoMetadata {
            title: body.title,
            author_name: body.author_name,
            thumbnail_url: body.thumbnail_url,
        })
    }
}

impl std::fmt::Debug for MetadataResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataResolver")
            .field("relay_base", &self.relay_base)
            .finish_non_exhaustive()
    }
}
