//! Response content parsing.

mod html;

pub use html::{extract_meta_tags, ExtractedMeta};
