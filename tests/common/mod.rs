//! Shared fixtures for integration tests.

use pagesift::DocumentInfo;

/// Document facts for a typical test page.
pub fn doc_info(title: &str, url: &str) -> DocumentInfo {
    DocumentInfo {
        title: title.to_string(),
        url: url.to_string(),
        ..DocumentInfo::default()
    }
}
