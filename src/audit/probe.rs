//! Single-request HTTP probing.
//!
//! Every outbound request the audit engine makes goes through [`probe`]: one
//! request, redirect auto-following disabled on the client, a hard per-probe
//! timeout, and a typed outcome instead of a propagated fault.

use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};
use std::time::Duration;
use thiserror::Error;

use crate::config::MAX_RESPONSE_BODY_SIZE;

/// Outcome of a single probe: status, headers, and (for GET probes) the body.
#[derive(Debug)]
pub struct ProbeResponse {
    /// HTTP status code of the response
    pub status: u16,
    /// Response headers (header-name lookups are case-insensitive)
    pub headers: HeaderMap,
    /// Response body text, populated only when the probe requested it
    pub body: Option<String>,
}

impl ProbeResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is in the 3xx range.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// The `Location` header as a string, if present and representable.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Ways a probe can fail without the audit as a whole failing.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request did not complete within its time bound.
    #[error("request timed out")]
    Timeout,
    /// DNS, connection, or TLS failure.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be read or decoded.
    #[error("body read error: {0}")]
    Body(String),
}

impl From<ProbeError> for crate::error_handling::AuditError {
    fn from(e: ProbeError) -> Self {
        use crate::error_handling::AuditError;
        match e {
            ProbeError::Timeout => AuditError::Timeout,
            ProbeError::Network(detail) => AuditError::Network(detail),
            ProbeError::Body(detail) => AuditError::Parse(detail),
        }
    }
}

/// Performs exactly one HTTP request against the given URL.
///
/// Redirects are never followed (the shared client is built with
/// `redirect::Policy::none()`); a 3xx comes back to the caller as-is. The
/// request is bounded by `timeout`; exceeding it yields [`ProbeError::Timeout`]
/// rather than hanging or panicking.
///
/// # Arguments
///
/// * `client` - Shared client with redirects disabled
/// * `method` - Request method, HEAD for existence probes, GET for content
/// * `url` - Absolute URL to probe
/// * `timeout` - Hard bound for the whole request (including body read)
/// * `read_body` - Whether to read the response body into the result
pub async fn probe(
    client: &Client,
    method: Method,
    url: &Url,
    timeout: Duration,
    read_body: bool,
) -> Result<ProbeResponse, ProbeError> {
    let request = apply_browser_headers(client.request(method, url.clone()));

    // One budget for send and body read together, so a content fetch can
    // never exceed `timeout` in total.
    let exchange = async {
        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_timeout() {
                    return Err(ProbeError::Timeout);
                }
                log::debug!("Probe failed for {}: {}", url, e);
                return Err(ProbeError::Network(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = if read_body {
            Some(read_body_with_limit(response, url).await?)
        } else {
            None
        };

        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result,
        Err(_) => {
            log::debug!("Probe timed out for {}", url);
            Err(ProbeError::Timeout)
        }
    }
}

/// Streams the response body with a size cap.
///
/// Bodies larger than `MAX_RESPONSE_BODY_SIZE` are truncated at the cap; the
/// bytes read so far are still returned since meta-tag extraction only needs
/// the document head. The caller's probe timeout covers this read.
async fn read_body_with_limit(
    response: reqwest::Response,
    url: &Url,
) -> Result<String, ProbeError> {
    let mut stream = response.bytes_stream();
    let mut buf: Vec<u8> = Vec::with_capacity(16 * 1024);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ProbeError::Body(e.to_string()))?;
        if buf.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
            let remaining = MAX_RESPONSE_BODY_SIZE - buf.len();
            buf.extend_from_slice(&chunk[..remaining]);
            log::debug!(
                "Body for {} exceeds {} byte limit, truncating",
                url,
                MAX_RESPONSE_BODY_SIZE
            );
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Applies realistic browser request headers to reduce bot detection.
///
/// Probed sites may serve different content (or block outright) based on
/// header analysis, so all probes present the same browser-like fingerprint.
/// Accept-Encoding is left to reqwest so response bodies arrive decompressed.
fn apply_browser_headers(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        )
        .header(reqwest::header::ACCEPT_LANGUAGE, "de-DE,de;q=0.9,en;q=0.8")
        .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
        .header(reqwest::header::CACHE_CONTROL, "max-age=0")
}
