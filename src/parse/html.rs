//! Shallow HTML meta-tag extraction.
//!
//! Extraction is deliberately regex-based rather than a full DOM parse: the
//! meta-tag check only needs a handful of head elements, and pattern matching
//! keeps the fetch-to-classification path fast. This is a scope decision, not
//! a shortcut to fix.

use regex::Regex;
use std::sync::LazyLock;

/// Helper to compile a static regex pattern, panicking with a detailed error
/// message if compilation fails. Only used for compile-time constant patterns.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)<title[^>]*>([^<]*)</title>", "TITLE_PATTERN")
});

static META_DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<meta[^>]*name=['"]description['"][^>]*content=['"]([^'"]*)['"]"#,
        "META_DESCRIPTION_PATTERN",
    )
});

static FAVICON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<link[^>]*rel=['"](?:icon|shortcut icon)['"][^>]*href=['"]([^'"]*)['"]"#,
        "FAVICON_PATTERN",
    )
});

static META_KEYWORDS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<meta[^>]*name=['"]keywords['"][^>]*content=['"]([^'"]*)['"]"#,
        "META_KEYWORDS_PATTERN",
    )
});

static OG_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<meta[^>]*property=['"]og:title['"][^>]*content=['"]([^'"]*)['"]"#,
        "OG_TITLE_PATTERN",
    )
});

static OG_DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<meta[^>]*property=['"]og:description['"][^>]*content=['"]([^'"]*)['"]"#,
        "OG_DESCRIPTION_PATTERN",
    )
});

/// Meta-tag content pulled from a document.
///
/// Every field is the trimmed text of the first match, or empty when the
/// pattern did not match at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMeta {
    /// `<title>` text
    pub title: String,
    /// `<meta name="description">` content
    pub description: String,
    /// Favicon `<link>` href
    pub favicon: String,
    /// `<meta name="keywords">` content
    pub keywords: String,
    /// `<meta property="og:title">` content
    pub og_title: String,
    /// `<meta property="og:description">` content
    pub og_description: String,
}

fn first_capture(pattern: &Regex, html: &str) -> String {
    pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the meta tags relevant to the audit from raw HTML.
pub fn extract_meta_tags(html: &str) -> ExtractedMeta {
    ExtractedMeta {
        title: first_capture(&TITLE_PATTERN, html),
        description: first_capture(&META_DESCRIPTION_PATTERN, html),
        favicon: first_capture(&FAVICON_PATTERN, html),
        keywords: first_capture(&META_KEYWORDS_PATTERN, html),
        og_title: first_capture(&OG_TITLE_PATTERN, html),
        og_description: first_capture(&OG_DESCRIPTION_PATTERN, html),
    }
}
