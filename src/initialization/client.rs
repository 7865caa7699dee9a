//! HTTP client initialization.
//!
//! This module provides the shared probe client used by every check module.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::TCP_CONNECT_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client used for audit probes.
///
/// Creates a `reqwest::Client` with redirects disabled so redirect chains can
/// be tracked manually, hop by hop. No global request timeout is set on the
/// client; each probe applies its own bound (5s for HEAD probes, 10s for
/// content fetches) so that the two timeout classes stay independent.
///
/// # Arguments
///
/// * `user_agent` - User-Agent header value for all outbound requests
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(user_agent: &str) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent.to_string())
        .build()?;
    Ok(Arc::new(client))
}
