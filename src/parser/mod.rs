//! Input validation and platform video-id extraction.
//!
//! Pure functions, no network. A non-matching link yields a "no match"
//! result (or a typed error from the validating wrappers), never a panic.

mod error;
mod url;

pub use error::ParseError;
pub use url::{extract_video_id, validate_input};
