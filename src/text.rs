//! Text normalization for extracted fragments.

use crate::patterns::{INVISIBLE_CHARS, WHITESPACE_RUNS};
use crate::snapshot::NodeRef;

/// Normalize raw node text: strip zero-width/format characters, map
/// non-breaking spaces to regular spaces, collapse whitespace runs to a
/// single space, and trim both ends.
pub fn clean_text(text: &str) -> String {
    let stripped = INVISIBLE_CHARS.replace_all(text, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Cleaned, space-joined concatenation of only the node's immediate text
/// segments. Nested element text is excluded, which is what lets `div` and
/// `span` containers contribute their own words without swallowing their
/// children.
pub(crate) fn direct_text(node: &NodeRef<'_>) -> String {
    clean_text(&node.own_text().join(" "))
}

/// Character count of cleaned text, the unit every length threshold uses.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
