//! Meta-tag quality check.
//!
//! Fetches the document body and classifies title, meta description, favicon,
//! and Open Graph tags against SEO length guidelines. Redirects are resolved
//! first so the check audits the document visitors actually land on.
//! Classification findings are recommendations, not failures: the check
//! succeeds whenever the fetch itself succeeded.

use reqwest::{Method, Url};
use serde::Serialize;

use crate::audit::context::AuditContext;
use crate::audit::probe::probe;
use crate::audit::redirects::resolve_redirect_chain;
use crate::audit::url::AuditTarget;
use crate::error_handling::AuditError;
use crate::parse::{extract_meta_tags, ExtractedMeta};

/// Title length range considered optimal for search result snippets.
const TITLE_OPTIMAL_RANGE: std::ops::RangeInclusive<usize> = 50..=60;
/// Description length range considered optimal for search result snippets.
const DESCRIPTION_OPTIMAL_RANGE: std::ops::RangeInclusive<usize> = 150..=160;

/// Length-classified tag content.
#[derive(Debug, Serialize)]
pub struct TagMetric {
    /// Extracted text (empty when the tag is missing)
    pub content: String,
    /// Character count of the extracted text
    pub length: usize,
    /// Whether the length falls in the optimal range
    pub optimal: bool,
}

/// Favicon link findings.
#[derive(Debug, Serialize)]
pub struct FaviconInfo {
    /// Whether a favicon `<link>` was found
    pub exists: bool,
    /// The href of the favicon link (empty when absent)
    pub url: String,
}

/// Open Graph tag findings.
#[derive(Debug, Serialize)]
pub struct OpenGraphInfo {
    /// `og:title` content
    pub title: String,
    /// `og:description` content
    pub description: String,
    /// True only when both og:title and og:description are non-empty
    pub complete: bool,
}

/// The classified meta tags of the document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTags {
    /// `<title>` classification
    pub title: TagMetric,
    /// Meta description classification
    pub description: TagMetric,
    /// Favicon findings
    pub favicon: FaviconInfo,
    /// Meta keywords content (informational only, no classification)
    pub keywords: String,
    /// Open Graph findings
    pub open_graph: OpenGraphInfo,
}

/// Result payload of the meta-tag check.
#[derive(Debug, Serialize)]
pub struct MetaReport {
    /// The normalized URL the check started from
    pub url: String,
    /// Classified meta tags
    pub meta: MetaTags,
    /// Human-readable findings
    pub recommendations: Vec<String>,
}

/// Runs the meta-tag check against a raw user-supplied URL.
///
/// # Errors
///
/// `MissingUrl`/`InvalidUrl` before any network access; `Timeout`/`Network`
/// when the fetch fails; `Parse` when the final document answers with a
/// non-2xx status or the body cannot be read.
pub async fn check_meta_tags(ctx: &AuditContext, input: &str) -> Result<MetaReport, AuditError> {
    let target = AuditTarget::from_input(input)?;

    // Walk redirects first; a site behind an apex->canonical 301 is audited
    // at its final document, not rejected at the first hop.
    let resolution = resolve_redirect_chain(ctx, target.url()).await?;
    let final_url = Url::parse(&resolution.final_url)
        .map_err(|e| AuditError::Parse(format!("Final URL unparseable: {}", e)))?;

    let response = probe(&ctx.client, Method::GET, &final_url, ctx.content_timeout, true).await?;

    if !response.is_success() {
        return Err(AuditError::Parse(format!("HTTP {}", response.status)));
    }

    let html = response.body.unwrap_or_default();
    let extracted = extract_meta_tags(&html);
    let recommendations = classify(&extracted);

    let title_length = extracted.title.chars().count();
    let description_length = extracted.description.chars().count();

    Ok(MetaReport {
        url: target.url().to_string(),
        meta: MetaTags {
            title: TagMetric {
                optimal: TITLE_OPTIMAL_RANGE.contains(&title_length),
                length: title_length,
                content: extracted.title,
            },
            description: TagMetric {
                optimal: DESCRIPTION_OPTIMAL_RANGE.contains(&description_length),
                length: description_length,
                content: extracted.description,
            },
            favicon: FaviconInfo {
                exists: !extracted.favicon.is_empty(),
                url: extracted.favicon,
            },
            keywords: extracted.keywords,
            open_graph: OpenGraphInfo {
                complete: !extracted.og_title.is_empty() && !extracted.og_description.is_empty(),
                title: extracted.og_title,
                description: extracted.og_description,
            },
        },
        recommendations,
    })
}

/// Builds the recommendation list for a set of extracted tags.
///
/// Five independent sub-checks (title, description, favicon, Open Graph)
/// each contribute their own lines.
fn classify(meta: &ExtractedMeta) -> Vec<String> {
    let mut recommendations = Vec::new();

    // Title
    let title_length = meta.title.chars().count();
    if !meta.title.is_empty() {
        if TITLE_OPTIMAL_RANGE.contains(&title_length) {
            recommendations.push("✅ Title-Länge optimal (50-60 Zeichen)".to_string());
        } else if title_length < *TITLE_OPTIMAL_RANGE.start() {
            recommendations.push("⚠️ Title zu kurz (unter 50 Zeichen)".to_string());
            recommendations.push("💡 Title erweitern für bessere SEO".to_string());
        } else {
            recommendations.push("⚠️ Title zu lang (über 60 Zeichen)".to_string());
            recommendations.push("💡 Title kürzen, wird in SERPs abgeschnitten".to_string());
        }
    } else {
        recommendations.push("❌ Kein Title-Tag gefunden".to_string());
        recommendations.push("💡 Title-Tag hinzufügen".to_string());
    }

    // Description
    let description_length = meta.description.chars().count();
    if !meta.description.is_empty() {
        if DESCRIPTION_OPTIMAL_RANGE.contains(&description_length) {
            recommendations.push("✅ Meta-Description optimal (150-160 Zeichen)".to_string());
        } else if description_length < *DESCRIPTION_OPTIMAL_RANGE.start() {
            recommendations.push("⚠️ Meta-Description zu kurz".to_string());
            recommendations.push("💡 Description erweitern für bessere CTR".to_string());
        } else {
            recommendations.push("⚠️ Meta-Description zu lang".to_string());
            recommendations.push("💡 Description kürzen".to_string());
        }
    } else {
        recommendations.push("❌ Keine Meta-Description gefunden".to_string());
        recommendations.push("💡 Meta-Description hinzufügen".to_string());
    }

    // Favicon
    if !meta.favicon.is_empty() {
        recommendations.push("✅ Favicon gefunden".to_string());
    } else {
        recommendations.push("❌ Kein Favicon gefunden".to_string());
        recommendations.push("💡 Favicon hinzufügen für Branding".to_string());
    }

    // Open Graph
    if !meta.og_title.is_empty() && !meta.og_description.is_empty() {
        recommendations.push("✅ Open Graph Tags vorhanden".to_string());
    } else {
        recommendations.push("⚠️ Open Graph Tags unvollständig".to_string());
        recommendations.push("💡 OG-Tags für Social Media hinzufügen".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn meta_with_title(len: usize) -> ExtractedMeta {
        ExtractedMeta {
            title: "t".repeat(len),
            ..Default::default()
        }
    }

    fn meta_with_description(len: usize) -> ExtractedMeta {
        ExtractedMeta {
            description: "d".repeat(len),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_boundaries() {
        // 50 and 60 are optimal, 49 too short, 61 too long
        assert_eq!(
            classify(&meta_with_title(50))[0],
            "✅ Title-Länge optimal (50-60 Zeichen)"
        );
        assert_eq!(
            classify(&meta_with_title(60))[0],
            "✅ Title-Länge optimal (50-60 Zeichen)"
        );
        assert_eq!(
            classify(&meta_with_title(49))[0],
            "⚠️ Title zu kurz (unter 50 Zeichen)"
        );
        assert_eq!(
            classify(&meta_with_title(61))[0],
            "⚠️ Title zu lang (über 60 Zeichen)"
        );
    }

    #[test]
    fn test_missing_title_is_error_line() {
        let recommendations = classify(&ExtractedMeta::default());
        assert_eq!(recommendations[0], "❌ Kein Title-Tag gefunden");
        assert_eq!(recommendations[1], "💡 Title-Tag hinzufügen");
    }

    #[test]
    fn test_description_boundaries() {
        let optimal = "✅ Meta-Description optimal (150-160 Zeichen)";
        assert!(classify(&meta_with_description(150)).contains(&optimal.to_string()));
        assert!(classify(&meta_with_description(160)).contains(&optimal.to_string()));
        assert!(classify(&meta_with_description(149))
            .contains(&"⚠️ Meta-Description zu kurz".to_string()));
        assert!(classify(&meta_with_description(161))
            .contains(&"⚠️ Meta-Description zu lang".to_string()));
    }

    #[test]
    fn test_open_graph_requires_both_tags() {
        let mut meta = ExtractedMeta {
            og_title: "Titel".to_string(),
            ..Default::default()
        };
        assert!(classify(&meta).contains(&"⚠️ Open Graph Tags unvollständig".to_string()));

        meta.og_description = "Beschreibung".to_string();
        assert!(classify(&meta).contains(&"✅ Open Graph Tags vorhanden".to_string()));
    }

    #[test]
    fn test_umlauts_count_as_single_characters() {
        // 50 chars including umlauts must hit the optimal branch
        let title = "Ä".repeat(50);
        assert_eq!(title.len(), 100); // 2 bytes each in UTF-8
        let meta = ExtractedMeta {
            title,
            ..Default::default()
        };
        assert_eq!(classify(&meta)[0], "✅ Title-Länge optimal (50-60 Zeichen)");
    }

    fn test_context() -> AuditContext {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client");
        AuditContext::with_timeouts(
            Arc::new(client),
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_fetch_and_classify_document() {
        let server = MockServer::start().await;
        let body = format!(
            "<html><head><title>{}</title>\
             <link rel=\"icon\" href=\"/fav.ico\"></head><body></body></html>",
            "x".repeat(55)
        );
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let report = check_meta_tags(&test_context(), &server.uri())
            .await
            .unwrap();
        assert!(report.meta.title.optimal);
        assert_eq!(report.meta.title.length, 55);
        assert!(report.meta.favicon.exists);
        assert!(!report.meta.open_graph.complete);
        assert!(report
            .recommendations
            .contains(&"✅ Title-Länge optimal (50-60 Zeichen)".to_string()));
        assert!(report
            .recommendations
            .contains(&"❌ Keine Meta-Description gefunden".to_string()));
    }

    #[tokio::test]
    async fn test_redirecting_target_is_audited_at_final_document() {
        let server = MockServer::start().await;
        // Apex 301s to the canonical page; the audit must land on /home
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/home"))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/home"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let body = format!(
            "<html><head><title>{}</title></head><body></body></html>",
            "x".repeat(55)
        );
        Mock::given(method("GET"))
            .and(path("/home"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let report = check_meta_tags(&test_context(), &server.uri())
            .await
            .unwrap();
        assert!(report.meta.title.optimal);
        assert_eq!(report.meta.title.length, 55);
    }

    #[tokio::test]
    async fn test_non_success_status_fails_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = check_meta_tags(&test_context(), &server.uri()).await;
        match result {
            Err(AuditError::Parse(detail)) => assert_eq!(detail, "HTTP 404"),
            other => panic!("expected Parse error, got {:?}", other.map(|r| r.url)),
        }
    }
}
