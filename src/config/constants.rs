//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, hop limits, and size caps. Keeping them here (rather than
//! scattering literals) keeps probe behavior centrally auditable.

use std::time::Duration;

// Network operation timeouts
/// Timeout for lightweight HEAD probes (robots.txt, sitemaps, redirect hops)
pub const HEAD_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for probes that fetch (or may fetch) document content.
/// Also used for the HTTPS check's HEAD probe, matching the original tool.
pub const CONTENT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

// Input and response size limits
/// Maximum URL length (2048 characters) to prevent DoS attacks via extremely long URLs.
/// This matches common browser and server limits (e.g., IE, Apache, Nginx default limits).
pub const MAX_URL_LENGTH: usize = 2048;
/// Maximum response body size in bytes (2MB)
/// Bodies larger than this are truncated during the streamed read; meta-tag
/// extraction only needs the document head anyway.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a current Chrome build so that probed sites serve the same responses
/// they would serve a browser. Users can override this via the `--user-agent` flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Server defaults
/// Default bind address for the audit API server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default port for the audit API server
pub const DEFAULT_PORT: u16 = 4321;
