//! Redirect hygiene check.
//!
//! Walks the redirect chain from the normalized URL, tests HTTP→HTTPS
//! enforcement via the plain-http variant, and (best-effort) notes whether a
//! `www.` alias redirects. The www probe only ever adds a positive line; all
//! of its failures are silently ignored so that sites without a www alias are
//! not flagged.

use reqwest::{Method, Url};
use serde::Serialize;

use crate::audit::context::AuditContext;
use crate::audit::probe::{probe, ProbeError, ProbeResponse};
use crate::audit::redirects::{resolve_redirect_chain, RedirectHop};
use crate::audit::url::AuditTarget;
use crate::error_handling::AuditError;

/// Result payload of the redirect-hygiene check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectReport {
    /// The normalized URL the chain walk started from
    pub original_url: String,
    /// The URL the chain ended on
    pub final_url: String,
    /// Number of redirects followed
    pub redirect_count: usize,
    /// Every followed hop, in order
    pub redirect_chain: Vec<RedirectHop>,
    /// Whether the plain-http variant redirects to an https location
    pub http_to_https: bool,
    /// Human-readable findings
    pub recommendations: Vec<String>,
}

/// How the plain-http variant of the target behaved.
#[derive(Debug, PartialEq, Eq)]
enum HttpVariantBehavior {
    RedirectsToHttps,
    RedirectsElsewhere,
    NoRedirect,
    Unreachable,
}

/// Runs the redirect-hygiene check against a raw user-supplied URL.
///
/// # Errors
///
/// `MissingUrl`/`InvalidUrl` before any network access; `RedirectTest` when
/// the chain walk itself fails at the network layer. Failures of the
/// http-variant and www-variant probes degrade into recommendation lines
/// instead of failing the check.
pub async fn check_redirects(ctx: &AuditContext, input: &str) -> Result<RedirectReport, AuditError> {
    let target = AuditTarget::from_input(input)?;

    let resolution = resolve_redirect_chain(ctx, target.url())
        .await
        .map_err(|e| AuditError::RedirectTest(e.to_string()))?;

    let mut recommendations = Vec::new();

    match resolution.redirect_count() {
        0 => recommendations.push("✅ Keine Weiterleitungen - direkter Zugriff".to_string()),
        1 => recommendations.push("✅ Saubere Weiterleitung (1 Redirect)".to_string()),
        2..=3 => {
            recommendations.push("⚠️ Mehrere Weiterleitungen vorhanden".to_string());
            recommendations
                .push("💡 Redirect-Kette optimieren für bessere Performance".to_string());
        }
        _ => {
            recommendations.push("❌ Zu viele Weiterleitungen".to_string());
            recommendations.push("💡 Redirect-Kette stark verkürzen".to_string());
        }
    }

    // HTTP to HTTPS enforcement
    let http_variant = target.http_variant();
    let behavior = classify_http_variant(
        probe(
            &ctx.client,
            Method::HEAD,
            &http_variant,
            ctx.head_timeout,
            false,
        )
        .await,
    );
    match behavior {
        HttpVariantBehavior::RedirectsToHttps => {
            recommendations.push("✅ HTTP zu HTTPS Weiterleitung aktiv".to_string());
        }
        HttpVariantBehavior::RedirectsElsewhere => {
            recommendations.push("⚠️ HTTP Weiterleitung führt nicht zu HTTPS".to_string());
        }
        HttpVariantBehavior::NoRedirect => {
            recommendations.push("❌ Keine HTTP zu HTTPS Weiterleitung".to_string());
            recommendations.push("💡 HTTP zu HTTPS Redirect einrichten".to_string());
        }
        HttpVariantBehavior::Unreachable => {
            recommendations.push("⚠️ HTTP-Version nicht erreichbar".to_string());
        }
    }
    let http_to_https = behavior == HttpVariantBehavior::RedirectsToHttps;

    // WWW alias, best-effort: only ever adds a positive note
    if let Some(www_url) = target.www_variant() {
        if let Some(line) = probe_www_variant(ctx, &www_url).await {
            recommendations.push(line);
        }
    }

    let redirect_count = resolution.redirect_count();
    Ok(RedirectReport {
        original_url: target.url().to_string(),
        final_url: resolution.final_url,
        redirect_count,
        redirect_chain: resolution.chain,
        http_to_https,
        recommendations,
    })
}

fn classify_http_variant(outcome: Result<ProbeResponse, ProbeError>) -> HttpVariantBehavior {
    match outcome {
        Ok(resp) if resp.is_redirect() => match resp.location() {
            Some(location) if location.starts_with("https://") => {
                HttpVariantBehavior::RedirectsToHttps
            }
            _ => HttpVariantBehavior::RedirectsElsewhere,
        },
        Ok(_) => HttpVariantBehavior::NoRedirect,
        Err(_) => HttpVariantBehavior::Unreachable,
    }
}

async fn probe_www_variant(ctx: &AuditContext, www_url: &Url) -> Option<String> {
    match probe(&ctx.client, Method::HEAD, www_url, ctx.head_timeout, false).await {
        Ok(resp) if resp.is_redirect() => Some("✅ WWW-Weiterleitung konfiguriert".to_string()),
        // Reachable without redirecting, or not reachable at all: say nothing
        Ok(_) => None,
        Err(e) => {
            log::debug!("www variant probe failed for {}: {}", www_url, e);
            None
        }
    }
}
