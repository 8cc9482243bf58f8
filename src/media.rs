//! Shared media data model: platforms, quality variants, and resolved
//! video/playlist details.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source platform of a media URL.
///
/// Only YouTube is resolvable today; the other variants exist so stored
/// records keep their platform tag if support widens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Instagram,
    Facebook,
    TikTok,
}

impl Platform {
    /// Returns the display name of the platform.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One downloadable variant of a video: a quality label plus container,
/// size label, and (when the service provides one) a direct URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOption {
    /// Quality label as reported by the service ("720p", "128kbps").
    pub quality: String,
    /// Container label ("MP4", "MP3").
    pub format: String,
    /// Human-readable size label ("1.0 MB", "N/A").
    pub size: String,
    /// Stream tag where the service exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itag: Option<u32>,
    /// Direct resource URL, when the service provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Caveat shown next to the variant ("Video Only").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A subtitle track offered alongside a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleOption {
    /// Language code ("en").
    pub language: String,
    /// Display label ("English").
    pub label: String,
    /// Track URL.
    pub url: String,
}

/// A fully resolved video: identity, display metadata, and the classified
/// format lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    /// The URL the user searched for; unique key for the result.
    pub id: String,
    /// The extracted 11-character video id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub title: String,
    pub thumbnail: String,
    /// Display duration; "N/A" when the services do not report one.
    pub duration: String,
    pub author: String,
    pub platform: Platform,
    pub video_qualities: Vec<QualityOption>,
    pub audio_qualities: Vec<QualityOption>,
    pub subtitles: Vec<SubtitleOption>,
}

/// A resolved playlist and the videos it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetails {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub videos: Vec<VideoDetails>,
}

impl PlaylistDetails {
    /// Number of videos in the playlist.
    #[must_use]
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }
}

/// Outcome of a successful search: a single video or a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResult {
    Video(VideoDetails),
    Playlist(PlaylistDetails),
}

impl SearchResult {
    /// Display title of the result.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Video(video) => &video.title,
            Self::Playlist(playlist) => &playlist.title,
        }
    }
}
