//! Search orchestration: validate input, resolve metadata and formats,
//! assemble the result, and track observable search state.
//!
//! The two dependency calls run strictly sequentially (metadata, then
//! formats). Observable state carries a busy flag plus the latest result or
//! error message; a per-operation generation counter ensures a stale
//! completion never overwrites a newer operation's outcome.

mod error;

pub use error::SearchError;

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::media::{Platform, SearchResult, VideoDetails};
use crate::parser::{extract_video_id, validate_input, ParseError};
use crate::resolver::{FormatLists, FormatResolver, MetadataResolver, ResolveError, VideoMetadata};

/// Fallback title when the metadata service omits one.
const DEFAULT_TITLE: &str = "Untitled Video";
/// Fallback author when the metadata service omits one.
const DEFAULT_AUTHOR: &str = "Unknown Author";

/// Observable state of the latest search operation.
#[derive(Debug, Default)]
struct SearchState {
    generation: u64,
    busy: bool,
    result: Option<SearchResult>,
    error: Option<String>,
}

/// A point-in-time copy of the orchestrator's observable state.
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    /// True while a search is in flight.
    pub busy: bool,
    /// Latest committed result, if any.
    pub result: Option<SearchResult>,
    /// Latest committed user-visible error message, if any.
    pub error: Option<String>,
}

/// Sequences the resolution pipeline and owns the observable search state.
#[derive(Debug)]
pub struct SearchOrchestrator {
    metadata: MetadataResolver,
    formats: FormatResolver,
    state: Mutex<SearchState>,
}

impl SearchOrchestrator {
    /// Creates an orchestrator against the default production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Ok(Self::with_resolvers(
            MetadataResolver::new()?,
            FormatResolver::new()?,
        ))
    }

    /// Creates an orchestrator with caller-supplied resolvers (test seam).
    #[must_use]
    pub fn with_resolvers(metadata: MetadataResolver, formats: FormatResolver) -> Self {
        Self {
            metadata,
            formats,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Runs one search operation end to end.
    ///
    /// Clears any previous result/error and sets the busy flag before the
    /// first dependency call; commits the outcome only if no newer search
    /// has started in the meantime. The caller always receives this
    /// operation's own outcome regardless of commit.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on validation or dependency failure. No
    /// partial results are kept.
    #[tracing::instrument(skip_all)]
    pub async fn search(&self, url: &str) -> Result<SearchResult, SearchError> {
        let generation = self.begin();
        let outcome = self.resolve(url).await;
        self.commit(generation, &outcome);
        outcome
    }

    /// Returns a copy of the observable state.
    pub fn snapshot(&self) -> SearchSnapshot {
        let state = self.lock_state();
        SearchSnapshot {
            busy: state.busy,
            result: state.result.clone(),
            error: state.error.clone(),
        }
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock_state();
        state.generation += 1;
        state.busy = true;
        state.result = None;
        state.error = None;
        state.generation
    }

    fn commit(&self, generation: u64, outcome: &Result<SearchResult, SearchError>) {
        let mut state = self.lock_state();
        if state.generation != generation {
            debug!(generation, latest = state.generation, "dropping stale search outcome");
            return;
        }
        state.busy = false;
        match outcome {
            Ok(result) => state.result = Some(result.clone()),
            Err(error) => state.error = Some(error.user_message()),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn resolve(&self, url: &str) -> Result<SearchResult, SearchError> {
        let url = validate_input(url)?;
        let video_id = extract_video_id(&url).ok_or_else(|| ParseError::no_video_id(&url))?;

        let metadata = self.metadata.fetch(&url).await?;
        let formats = self.formats.resolve(&url).await?;

        info!(
            video_variants = formats.video.len(),
            audio_variants = formats.audio.len(),
            "search resolved"
        );
        Ok(SearchResult::Video(assemble(
            url, video_id, metadata, formats,
        )))
    }
}

/// Assembles the final details record, supplying fallback defaults for
/// fields the metadata service may omit.
fn assemble(
    url: String,
    video_id: String,
    metadata: VideoMetadata,
    formats: FormatLists,
) -> VideoDetails {
    VideoDetails {
        id: url,
        video_id: Some(video_id),
        title: metadata.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        thumbnail: metadata.thumbnail_url.unwrap_or_default(),
        duration: "N/A".to_string(),
        author: metadata
            .author_name
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        platform: Platform::YouTube,
        video_qualities: formats.video,
        audio_qualities: formats.audio,
        subtitles: Vec::new(),
    }
}
