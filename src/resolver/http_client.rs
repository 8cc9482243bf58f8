//! Shared HTTP client construction policy for resolvers.
//!
//! Centralizes networking defaults so both resolvers stay consistent on
//! timeout, user-agent, and compression.

use std::time::Duration;

use reqwest::Client;

use super::error::{FetchStage, ResolveError};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Shared user-agent for all outbound resolver traffic.
fn resolver_user_agent() -> String {
    format!("snapstream/{}", env!("CARGO_PKG_VERSION"))
}

/// Builds a resolver HTTP client using shared project policy.
///
/// # Errors
///
/// Returns [`ResolveError::Client`] when client construction fails.
pub(crate) fn build_resolver_http_client(stage: FetchStage) -> Result<Client, ResolveError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(resolver_user_agent())
        .gzip(true)
        .build()
        .map_err(|error| ResolveError::client(stage, &error.to_string()))
}
