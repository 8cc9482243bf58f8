//! Core library for snapstream, a YouTube download helper.
//!
//! The pipeline goes: validate and parse the input URL
//! ([`parser`]), fetch display metadata and downloadable format lists
//! through public relay services ([`resolver`]), assemble the result
//! ([`search`]), then feed selected options through a single-slot download
//! queue ([`queue`]) and record completions in a persisted vault
//! ([`vault`]).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod media;
pub mod parser;
pub mod queue;
pub mod resolver;
pub mod search;
pub mod vault;

pub use media::{Platform, PlaylistDetails, QualityOption, SearchResult, SubtitleOption, VideoDetails};
pub use parser::{extract_video_id, ParseError};
pub use queue::{
    DownloadItem, DownloadQueue, DownloadStatus, TickOutcome, COMPLETED_RETENTION, TICK_INTERVAL,
};
pub use resolver::{FetchStage, FormatLists, FormatResolver, MetadataResolver, ResolveError, VideoMetadata};
pub use search::{SearchError, SearchOrchestrator, SearchSnapshot};
pub use vault::{default_vault_path, VaultStore, VAULT_FILE_NAME};
