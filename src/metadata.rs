//! Document-level metadata collection.
//!
//! Collection never fails: every field falls back to an empty string, a
//! mode-supplied default, or `"unknown"` when the host reported nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::{DocumentInfo, ScrollOffset, Viewport};

/// Document ready state as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

impl LoadState {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            _ => Self::Complete,
        }
    }
}

/// Page-level facts attached to every extraction result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub url: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub language: String,
    pub charset: String,
    /// When this metadata was collected. Excluded from the serialized text
    /// forms so identical snapshots keep producing identical text.
    pub timestamp: DateTime<Utc>,
    pub viewport: Viewport,
    pub scroll: ScrollOffset,
    pub load_state: LoadState,
}

/// Collect page metadata from the captured document facts.
///
/// `title_fallback` and `language_fallback` differ between the two
/// extraction modes and are supplied by the caller.
pub fn collect(info: &DocumentInfo, title_fallback: &str, language_fallback: &str) -> PageMetadata {
    PageMetadata {
        title: non_empty_or(&info.title, title_fallback),
        url: info.url.trim().to_string(),
        description: info.description.trim().to_string(),
        keywords: info.keywords.trim().to_string(),
        author: info.author.trim().to_string(),
        language: non_empty_or(&info.language, language_fallback),
        charset: non_empty_or(&info.charset, "unknown"),
        timestamp: Utc::now(),
        viewport: info.viewport,
        scroll: info.scroll,
        load_state: LoadState::parse(&info.ready_state),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
