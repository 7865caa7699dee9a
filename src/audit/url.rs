//! URL validation and normalization.
//!
//! Canonicalizes user-entered strings into absolute URLs and derives the
//! secondary forms (plain-http variant, `www.` variant) the checks probe.

use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AuditError;

/// Validates and normalizes a user-entered URL string.
///
/// Adds an `https://` prefix if the string carries no scheme, then validates
/// that the result is a syntactically valid absolute URL with an http/https
/// scheme. Rejects URLs longer than `MAX_URL_LENGTH` to prevent DoS. All of
/// this happens before any network access.
///
/// # Arguments
///
/// * `input` - The raw URL string supplied by the caller
///
/// # Errors
///
/// Returns `AuditError::MissingUrl` for an empty string and
/// `AuditError::InvalidUrl` for anything that does not parse as an absolute
/// http(s) URL.
pub fn normalize_url(input: &str) -> Result<Url, AuditError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AuditError::MissingUrl);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(AuditError::InvalidUrl(format!(
            "URL exceeds maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        )));
    }

    // Normalize: add https:// prefix if missing
    let normalized = if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        return Err(AuditError::InvalidUrl(format!(
            "URL exceeds maximum length after normalization ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        )));
    }

    // Validate: check syntax and scheme
    match Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => {
                if parsed.host_str().is_none() {
                    return Err(AuditError::InvalidUrl(format!("URL has no host: {input}")));
                }
                Ok(parsed)
            }
            other => Err(AuditError::InvalidUrl(format!(
                "Unsupported scheme '{other}' for URL: {input}"
            ))),
        },
        Err(e) => Err(AuditError::InvalidUrl(format!(
            "Cannot parse URL '{input}': {e}"
        ))),
    }
}

/// A normalized audit target with its derived probe URLs.
///
/// Created per request, immutable, and discarded once the check completes.
#[derive(Debug, Clone)]
pub struct AuditTarget {
    url: Url,
}

impl AuditTarget {
    /// Builds an audit target from a raw user-entered string.
    pub fn from_input(input: &str) -> Result<Self, AuditError> {
        Ok(Self {
            url: normalize_url(input)?,
        })
    }

    /// The normalized absolute URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The origin (`scheme://host[:port]`) of the normalized URL.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The same URL with a plain-http scheme, used to test HTTP→HTTPS enforcement.
    pub fn http_variant(&self) -> Url {
        let mut variant = self.url.clone();
        // set_scheme only fails for scheme pairs we never produce here
        let _ = variant.set_scheme("http");
        variant
    }

    /// The `www.`-host variant, if the normalized host does not already start
    /// with `www.`. Returns `None` for hosts that already carry the prefix and
    /// for IP-address hosts, where a www variant makes no sense.
    pub fn www_variant(&self) -> Option<Url> {
        let host = self.url.host_str()?;
        if host.starts_with("www.") {
            return None;
        }
        if self.url.domain().is_none() {
            // IP literal
            return None;
        }
        let mut variant = self.url.clone();
        variant.set_host(Some(&format!("www.{host}"))).ok()?;
        Some(variant)
    }
}
