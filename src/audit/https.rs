//! HTTPS availability check.
//!
//! Probes the normalized URL once and reports whether the site is served over
//! HTTPS, whether it responded, and a coarse certificate heuristic based on
//! the `Strict-Transport-Security` header. This is header inspection, not real
//! certificate validation.

use reqwest::Method;
use serde::Serialize;

use crate::audit::context::AuditContext;
use crate::audit::probe::probe;
use crate::audit::url::AuditTarget;
use crate::error_handling::AuditError;

/// Result payload of the HTTPS check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsReport {
    /// The normalized URL that was probed
    pub url: String,
    /// Whether the resolved scheme is `https`
    pub https: bool,
    /// Whether the probe got a success-ish (2xx/3xx) response
    pub accessible: bool,
    /// "HSTS enabled" when the response carries Strict-Transport-Security, else "Basic SSL"
    pub certificate: String,
    /// Status code of the response
    pub status_code: u16,
    /// Human-readable findings
    pub recommendations: Vec<String>,
}

/// Runs the HTTPS check against a raw user-supplied URL.
///
/// # Errors
///
/// `MissingUrl`/`InvalidUrl` before any network access; `Timeout`/`Network`
/// when the single probe fails.
pub async fn check_https(ctx: &AuditContext, input: &str) -> Result<HttpsReport, AuditError> {
    let target = AuditTarget::from_input(input)?;

    // The original tool gave this HEAD the content-fetch budget; kept as-is.
    let response = probe(
        &ctx.client,
        Method::HEAD,
        target.url(),
        ctx.content_timeout,
        false,
    )
    .await?;

    let https = target.url().scheme() == "https";
    // 3xx counts as reachable; the probe client never follows redirects itself
    let accessible = response.is_success() || response.is_redirect();
    let certificate = if response
        .headers
        .contains_key("strict-transport-security")
    {
        "HSTS enabled"
    } else {
        "Basic SSL"
    };

    let recommendations = if https {
        vec!["✅ HTTPS ist aktiv".to_string()]
    } else {
        vec![
            "❌ HTTPS nicht aktiv".to_string(),
            "💡 SSL-Zertifikat einrichten".to_string(),
            "💡 HTTP zu HTTPS weiterleiten".to_string(),
        ]
    };

    Ok(HttpsReport {
        url: target.url().to_string(),
        https,
        accessible,
        certificate: certificate.to_string(),
        status_code: response.status,
        recommendations,
    })
}
