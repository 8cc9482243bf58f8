//! Download item types and status definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::{QualityOption, VideoDetails};

/// Speed label for items waiting in the queue. Cosmetic only; no bytes are
/// actually measured.
pub(crate) const INITIAL_SPEED_LABEL: &str = "0 KB/s";

/// Status of a download item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Waiting for the single download slot.
    Queued,
    /// Occupying the download slot.
    Downloading,
    /// Reserved; no code path produces this today.
    Paused,
    /// Finished; scheduled for eviction from the active list.
    Completed,
    /// Could not be serviced (e.g. no direct resource URL).
    Error,
}

impl DownloadStatus {
    /// Returns the display string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Downloading => "downloading",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// True once the item can no longer change state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in the download queue.
///
/// Created on user selection; mutated only by the queue tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadItem {
    /// Unique identifier derived from source id, quality, format, and
    /// creation timestamp, so repeated selections stay distinct.
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub quality: String,
    pub format: String,
    pub size: String,
    /// Direct resource URL from the selected option, when one exists.
    pub resource_url: Option<String>,
    pub status: DownloadStatus,
    /// 0-100, monotonically non-decreasing, terminal at 100.
    pub progress: u8,
    /// Free-text label; cosmetic, never a measured rate.
    pub speed: String,
}

impl DownloadItem {
    /// Builds a queued item from a selected quality option.
    #[must_use]
    pub fn new(video: &VideoDetails, option: &QualityOption, created_at_millis: u64) -> Self {
        Self {
            id: format!(
                "{}-{}-{}-{created_at_millis}",
                video.id, option.quality, option.format
            ),
            title: video.title.clone(),
            thumbnail: video.thumbnail.clone(),
            quality: option.quality.clone(),
            format: option.format.clone(),
            size: option.size.clone(),
            resource_url: option.url.clone(),
            status: DownloadStatus::Queued,
            progress: 0,
            speed: INITIAL_SPEED_LABEL.to_string(),
        }
    }
}

impl fmt::Display for DownloadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DownloadItem {{ id: {}, quality: {}, status: {} }}",
            self.id, self.quality, self.status
        )
    }
}
