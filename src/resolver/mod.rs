//! Resolvers for the two external dependencies of a search.
//!
//! Both services sit behind public CORS relays and are reached with a
//! shared HTTP client policy:
//!
//! - [`MetadataResolver`] - GET to an oEmbed-compatible metadata endpoint
//! - [`FormatResolver`] - POST to a format extraction API carrying a static
//!   relay credential
//!
//! Each resolver takes an endpoint override at construction so integration
//! tests can point it at a local mock server.

mod error;
mod formats;
mod http_client;
mod oembed;

pub use error::{FetchStage, ResolveError};
pub use formats::{FormatLists, FormatResolver};
pub use oembed::{MetadataResolver, VideoMetadata};
