//! The website audit engine.
//!
//! Everything network-facing lives here: the URL normalizer, the single-shot
//! HTTP probe, the redirect resolver, and the four check modules built on top
//! of them. Each check is a function from a raw URL string to a typed report
//! plus recommendation lines; all four share the [`context::AuditContext`]
//! but no mutable state.

pub mod context;
mod https;
mod meta_tags;
pub mod probe;
pub mod redirects;
mod redirect_hygiene;
mod seo_files;
pub mod url;

pub use context::AuditContext;
pub use https::{check_https, HttpsReport};
pub use meta_tags::{check_meta_tags, MetaReport};
pub use redirect_hygiene::{check_redirects, RedirectReport};
pub use seo_files::{check_seo_files, SeoFilesReport};
pub use url::{normalize_url, AuditTarget};
