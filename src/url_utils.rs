//! URL resolution for emitted links and image sources.

use url::Url;

/// Resolve a candidate URL against the page URL.
///
/// Already-absolute candidates (anything with a scheme) pass through
/// untouched; relative candidates are joined onto the base. When neither
/// works the raw candidate is returned, so a missing or unparseable page
/// URL never drops a link.
pub fn absolutize(base: &str, candidate: &str) -> String {
    if candidate.is_empty() || Url::parse(candidate).is_ok() {
        return candidate.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(candidate)) {
        Ok(joined) => joined.to_string(),
        Err(_) => candidate.to_string(),
    }
}
