//! Shared context for check execution.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CONTENT_FETCH_TIMEOUT, HEAD_PROBE_TIMEOUT};

/// Bundles the shared probe client with the per-probe time bounds.
///
/// One context is created at server startup and shared (immutably) across all
/// requests; checks never hold mutable state between invocations. Tests build
/// contexts with shorter timeouts via [`AuditContext::with_timeouts`].
#[derive(Clone)]
pub struct AuditContext {
    /// HTTP client with redirect auto-following disabled
    pub client: Arc<reqwest::Client>,
    /// Bound for lightweight HEAD probes
    pub head_timeout: Duration,
    /// Bound for content-fetching probes
    pub content_timeout: Duration,
}

impl AuditContext {
    /// Creates a context with the production timeouts (5s HEAD, 10s content).
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            head_timeout: HEAD_PROBE_TIMEOUT,
            content_timeout: CONTENT_FETCH_TIMEOUT,
        }
    }

    /// Creates a context with explicit timeouts.
    pub fn with_timeouts(
        client: Arc<reqwest::Client>,
        head_timeout: Duration,
        content_timeout: Duration,
    ) -> Self {
        Self {
            client,
            head_timeout,
            content_timeout,
        }
    }
}
