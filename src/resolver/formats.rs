//! Format resolver - fetches downloadable quality variants from an
//! extraction API.
//!
//! The [`FormatResolver`] POSTs the source URL to a cobalt-style extraction
//! service through a relay that supports forwarded POST bodies and requires
//! a static api-key header. Candidate items are classified into video and
//! audio lists, sized, annotated, and the video list sorted by resolution.

use std::cmp::Ordering;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::media::QualityOption;

use super::error::{FetchStage, ResolveError};
use super::http_client::build_resolver_http_client;

/// Relay prefix used to reach the extraction API from restricted origins.
const DEFAULT_RELAY_BASE: &str = "https://cors.sh/";

/// The extraction API endpoint reached through the relay.
const DEFAULT_API_ENDPOINT: &str = "https://co.wuk.sh/api/json";

const RELAY_API_KEY_HEADER: &str = "x-cors-api-key";
/// Temporary development credential issued by the relay service.
const RELAY_API_KEY: &str = "temp_38896220a8451b6063b4b8b321a6037c";

/// Container labels applied to classified variants.
const VIDEO_CONTAINER: &str = "MP4";
const AUDIO_CONTAINER: &str = "MP3";

/// Fallback message when the service reports an error without text.
const GENERIC_REMOTE_FAILURE: &str = "Failed to get download links.";

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

/// A single candidate item from a picker response. A `stream` response
/// carries the same fields at the top level and is treated as a one-element
/// picker list.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PickerItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    quality: Option<String>,
    size: Option<u64>,
    url: Option<String>,
    audio: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    status: String,
    text: Option<String>,
    picker: Option<Vec<PickerItem>>,
    #[serde(flatten)]
    stream: PickerItem,
}

/// Classified format variants for one source URL.
///
/// An entry never appears in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatLists {
    /// Video variants, descending by the leading numeric portion of the
    /// quality label where parseable.
    pub video: Vec<QualityOption>,
    /// Audio variants in insertion order.
    pub audio: Vec<QualityOption>,
}

/// Fetches downloadable format variants through the extraction relay.
pub struct FormatResolver {
    client: Client,
    endpoint: String,
}

impl FormatResolver {
    /// Creates a resolver pointed at the default relayed extraction API.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Self::with_endpoint(format!("{DEFAULT_RELAY_BASE}{DEFAULT_API_ENDPOINT}"))
    }

    /// Creates a resolver with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if HTTP client construction fails.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ResolveError> {
        Ok(Self {
            client: build_resolver_http_client(FetchStage::Formats)?,
            endpoint: endpoint.into(),
        })
    }

    /// Fetches and classifies format variants for the given source URL.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Network`] when the relay cannot be reached
    /// - [`ResolveError::Fetch`] on a non-success HTTP status
    /// - [`ResolveError::Remote`] when the service reports `status: error`
    /// - [`ResolveError::UnsupportedFormat`] for any unrecognized status
    /// - [`ResolveError::MalformedResponse`] when the body is not valid JSON
    #[tracing::instrument(skip(self, url), fields(resolver = "formats"))]
    pub async fn resolve(&self, url: &str) -> Result<FormatLists, ResolveError> {
        debug!("calling extraction API through relay");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(RELAY_API_KEY_HEADER, RELAY_API_KEY)
            .json(&ExtractRequest { url })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "extraction API request failed");
                ResolveError::network(FetchStage::Formats, &e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "extraction API returned error status");
            return Err(ResolveError::fetch(FetchStage::Formats, status.as_u16()));
        }

        let body: ExtractResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "failed to parse extraction API response JSON");
            ResolveError::malformed(FetchStage::Formats)
        })?;

        match body.status.as_str() {
            "error" => {
                let message = body
                    .text
                    .unwrap_or_else(|| GENERIC_REMOTE_FAILURE.to_string());
                debug!(%message, "extraction API reported an error status");
                Err(ResolveError::remote(message))
            }
            "picker" => Ok(classify(body.picker.unwrap_or_default())),
            "stream" => Ok(classify(vec![body.stream])),
            other => {
                debug!(status = other, "extraction API returned unknown status");
                Err(ResolveError::UnsupportedFormat)
            }
        }
    }
}

impl std::fmt::Debug for FormatResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatResolver")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Partitions candidate items into video and audio lists and sorts the
/// video list descending by resolution.
fn classify(items: Vec<PickerItem>) -> FormatLists {
    let mut lists = FormatLists::default();

    for item in items {
        let size = size_label(item.size);
        match item.kind.as_deref() {
            Some("video") if item.quality.as_deref() != Some("audio") => {
                lists.video.push(QualityOption {
                    quality: item.quality.unwrap_or_else(|| "unknown".to_string()),
                    format: VIDEO_CONTAINER.to_string(),
                    size,
                    itag: None,
                    url: item.url,
                    note: (item.audio == Some(false)).then(|| "Video Only".to_string()),
                });
            }
            Some("audio") => {
                lists.audio.push(QualityOption {
                    quality: item.quality.unwrap_or_else(|| "unknown".to_string()),
                    format: AUDIO_CONTAINER.to_string(),
                    size,
                    itag: None,
                    url: item.url,
                    note: None,
                });
            }
            _ => {}
        }
    }

    sort_by_resolution(&mut lists.video);
    lists
}

/// Converts a size in bytes to a one-decimal megabyte label, or "N/A".
fn size_label(bytes: Option<u64>) -> String {
    match bytes {
        #[allow(clippy::cast_precision_loss)]
        Some(bytes) => format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0),
        None => "N/A".to_string(),
    }
}

/// Parses the leading numeric portion of a quality label ("720p" -> 720).
fn leading_number(quality: &str) -> Option<u32> {
    let digits: String = quality.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Stable descending sort by leading quality number. Entries without a
/// parseable leading number compare equal and retain their relative order.
fn sort_by_resolution(options: &mut [QualityOption]) {
    options.sort_by(|a, b| {
        match (leading_number(&a.quality), leading_number(&b.quality)) {
            (Some(left), Some(right)) => right.cmp(&left),
            _ => Ordering::Equal,
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn video_item(quality: &str, size: Option<u64>) -> PickerItem {
        PickerItem {
            kind: Some("video".to_string()),
            quality: Some(quality.to_string()),
            size,
            url: Some(format!("https://cdn.example/{quality}")),
            audio: None,
        }
    }

    // ==================== Size Labels ====================

    #[test]
    fn test_size_label_one_decimal_megabytes() {
        assert_eq!(size_label(Some(1_048_576)), "1.0 MB");
        assert_eq!(size_label(Some(524_288)), "0.5 MB");
        assert_eq!(size_label(Some(2_097_152)), "2.0 MB");
    }

    #[test]
    fn test_size_label_absent_is_not_available() {
        assert_eq!(size_label(None), "N/A");
    }

    // ==================== Quality Parsing and Sorting ====================

    #[test]
    fn test_leading_number_parses_prefix_digits() {
        assert_eq!(leading_number("720p"), Some(720));
        assert_eq!(leading_number("128kbps"), Some(128));
        assert_eq!(leading_number("best"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_sort_by_resolution_descending() {
        let mut options: Vec<QualityOption> = classify(vec![
            video_item("360p", None),
            video_item("1080p", None),
            video_item("720p", None),
        ])
        .video;
        sort_by_resolution(&mut options);
        let labels: Vec<&str> = options.iter().map(|o| o.quality.as_str()).collect();
        assert_eq!(labels, ["1080p", "720p", "360p"]);
    }

    #[test]
    fn test_sort_by_resolution_non_numeric_retains_relative_order() {
        let lists = classify(vec![
            video_item("best", None),
            video_item("worst", None),
            video_item("720p", None),
        ]);
        let labels: Vec<&str> = lists.video.iter().map(|o| o.quality.as_str()).collect();
        // Non-numeric labels compare equal to everything they meet, so the
        // stable sort leaves "best" and "worst" in insertion order.
        assert_eq!(labels[0], "best");
        assert_eq!(labels[1], "worst");
    }

    // ==================== Classification ====================

    #[test]
    fn test_classify_partitions_video_and_audio() {
        let lists = classify(vec![
            video_item("720p", Some(1_048_576)),
            PickerItem {
                kind: Some("audio".to_string()),
                quality: Some("128kbps".to_string()),
                size: Some(2_097_152),
                url: Some("https://cdn.example/audio".to_string()),
                audio: None,
            },
        ]);
        assert_eq!(lists.video.len(), 1);
        assert_eq!(lists.audio.len(), 1);
        assert_eq!(lists.video[0].format, "MP4");
        assert_eq!(lists.audio[0].format, "MP3");
        assert_eq!(lists.audio[0].size, "2.0 MB");
    }

    #[test]
    fn test_classify_video_with_audio_quality_label_is_skipped_from_video() {
        // A "video" item whose quality label is literally "audio" belongs to
        // neither list.
        let lists = classify(vec![PickerItem {
            kind: Some("video".to_string()),
            quality: Some("audio".to_string()),
            size: None,
            url: None,
            audio: None,
        }]);
        assert!(lists.video.is_empty());
        assert!(lists.audio.is_empty());
    }

    #[test]
    fn test_classify_flags_muted_video_tracks() {
        let mut item = video_item("1080p", None);
        item.audio = Some(false);
        let lists = classify(vec![item]);
        assert_eq!(lists.video[0].note.as_deref(), Some("Video Only"));
    }

    #[test]
    fn test_classify_untyped_item_is_dropped() {
        // A bare stream payload without a type field classifies into neither
        // list; the caller sees empty lists rather than an error.
        let lists = classify(vec![PickerItem {
            kind: None,
            quality: None,
            size: None,
            url: Some("https://cdn.example/stream".to_string()),
            audio: None,
        }]);
        assert!(lists.video.is_empty());
        assert!(lists.audio.is_empty());
    }
}
