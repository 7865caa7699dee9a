//! SEO file availability check (robots.txt and sitemaps).
//!
//! Issues three HEAD probes concurrently against the target origin. The
//! probes are independent: each carries its own timeout and its own failure
//! handling, so a timeout on one never blocks or cancels the others.

use reqwest::{Method, Url};
use serde::Serialize;

use crate::audit::context::AuditContext;
use crate::audit::probe::{probe, ProbeError, ProbeResponse};
use crate::audit::url::AuditTarget;
use crate::error_handling::AuditError;

/// robots.txt presence.
#[derive(Debug, Serialize)]
pub struct RobotsInfo {
    /// Whether `{origin}/robots.txt` answered with a 2xx
    pub exists: bool,
    /// The probed URL
    pub url: String,
}

/// Sitemap presence across the checked locations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapInfo {
    /// Whether either sitemap location answered with a 2xx
    pub exists: bool,
    /// The sitemap URLs that were probed
    pub checked_urls: Vec<String>,
}

/// Result payload of the SEO-files check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFilesReport {
    /// Origin the file probes were issued against
    pub base_url: String,
    /// robots.txt findings
    pub robots: RobotsInfo,
    /// Sitemap findings
    pub sitemap: SitemapInfo,
    /// Human-readable findings
    pub recommendations: Vec<String>,
}

fn probe_found(outcome: &Result<ProbeResponse, ProbeError>) -> bool {
    matches!(outcome, Ok(resp) if resp.is_success())
}

/// Runs the SEO-files check against a raw user-supplied URL.
///
/// A failed or timed-out file probe simply means that file is reported as
/// absent; only an unusable input URL fails the check as a whole.
pub async fn check_seo_files(ctx: &AuditContext, input: &str) -> Result<SeoFilesReport, AuditError> {
    let target = AuditTarget::from_input(input)?;
    let base_url = target.origin();

    let robots_url = parse_derived(&format!("{base_url}/robots.txt"))?;
    let sitemap_url = parse_derived(&format!("{base_url}/sitemap.xml"))?;
    let sitemap_index_url = parse_derived(&format!("{base_url}/sitemap_index.xml"))?;

    // Settle-all: join! waits for every probe; each returns its own Result
    let (robots_outcome, sitemap_outcome, sitemap_index_outcome) = futures::join!(
        probe(
            &ctx.client,
            Method::HEAD,
            &robots_url,
            ctx.head_timeout,
            false
        ),
        probe(
            &ctx.client,
            Method::HEAD,
            &sitemap_url,
            ctx.head_timeout,
            false
        ),
        probe(
            &ctx.client,
            Method::HEAD,
            &sitemap_index_url,
            ctx.head_timeout,
            false
        ),
    );

    let robots_exists = probe_found(&robots_outcome);
    let sitemap_exists = probe_found(&sitemap_outcome) || probe_found(&sitemap_index_outcome);

    let mut recommendations = Vec::new();
    if robots_exists {
        recommendations.push("✅ robots.txt gefunden".to_string());
    } else {
        recommendations.push("❌ robots.txt nicht gefunden".to_string());
        recommendations.push("💡 robots.txt erstellen und hochladen".to_string());
    }
    if sitemap_exists {
        recommendations.push("✅ Sitemap gefunden".to_string());
    } else {
        recommendations.push("❌ Sitemap nicht gefunden".to_string());
        recommendations.push("💡 sitemap.xml erstellen und hochladen".to_string());
        recommendations.push("💡 Sitemap in Search Console einreichen".to_string());
    }

    Ok(SeoFilesReport {
        robots: RobotsInfo {
            exists: robots_exists,
            url: robots_url.to_string(),
        },
        sitemap: SitemapInfo {
            exists: sitemap_exists,
            checked_urls: vec![sitemap_url.to_string(), sitemap_index_url.to_string()],
        },
        base_url,
        recommendations,
    })
}

fn parse_derived(url: &str) -> Result<Url, AuditError> {
    Url::parse(url).map_err(|e| AuditError::Server(format!("Cannot build probe URL {url}: {e}")))
}
