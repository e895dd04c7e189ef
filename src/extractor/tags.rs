//! Tag catalogs and class filtering for the traversal modes.
//!
//! The two modes intentionally blacklist different tags: the content walk
//! drops form controls entirely (prose only), while the interactive walk
//! keeps them and drops `br`/`hr` noise instead.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::snapshot::NodeRef;

/// Tags the content walk never emits or descends into.
pub static CONTENT_UNWANTED_TAGS: [&str; 9] = [
    "script", "style", "meta", "link", "noscript", "button", "input", "textarea", "select",
];

/// `CONTENT_UNWANTED_TAGS` as a `HashSet`
pub static CONTENT_UNWANTED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONTENT_UNWANTED_TAGS.into_iter().collect());

/// Tags the interactive walk never emits or descends into.
pub static INTERACTIVE_UNWANTED_TAGS: [&str; 7] =
    ["script", "style", "meta", "link", "noscript", "br", "hr"];

/// `INTERACTIVE_UNWANTED_TAGS` as a `HashSet`
pub static INTERACTIVE_UNWANTED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INTERACTIVE_UNWANTED_TAGS.into_iter().collect());

/// Class-attribute substrings that mark boilerplate containers in content
/// mode. Substring matching is deliberate: `class="ad-banner"` and
/// `class="sidebar-ad"` both match `ad`.
pub static UNWANTED_CLASS_SUBSTRINGS: [&str; 7] = [
    "ad",
    "advertisement",
    "popup",
    "modal",
    "overlay",
    "toolbar",
    "navigation",
];

/// Form-control tags cataloged by the interactive walk.
pub static CONTROL_TAGS: [&str; 4] = ["button", "input", "textarea", "select"];

/// Check if the content walk excludes this tag
#[inline]
pub fn is_content_unwanted(tag: &str) -> bool {
    CONTENT_UNWANTED_TAG_SET.contains(tag)
}

/// Check if the interactive walk excludes this tag
#[inline]
pub fn is_interactive_unwanted(tag: &str) -> bool {
    INTERACTIVE_UNWANTED_TAG_SET.contains(tag)
}

/// Check if a class attribute value matches the boilerplate substring list
pub fn class_is_unwanted(class: &str) -> bool {
    let lowered = class.to_ascii_lowercase();
    UNWANTED_CLASS_SUBSTRINGS
        .iter()
        .any(|needle| lowered.contains(needle))
}

/// Check if tag is a form control
#[inline]
pub fn is_control_tag(tag: &str) -> bool {
    CONTROL_TAGS.contains(&tag)
}

/// Heading level for `h1`..`h6`, `None` otherwise
pub fn heading_level(tag: &str) -> Option<usize> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Check if tag is a list container (ul, ol)
#[inline]
pub fn is_list_tag(tag: &str) -> bool {
    tag == "ul" || tag == "ol"
}

/// One rung of the content-root selection ladder.
#[derive(Debug, Clone, Copy)]
pub enum RootRule {
    /// Match by tag name (`main`, `article`).
    Tag(&'static str),
    /// Match by `role` attribute (`[role=main]`).
    Role(&'static str),
    /// Match by class token (`.main-content`).
    Class(&'static str),
    /// Match by element id (`#content`).
    Id(&'static str),
}

/// Content-root selection ladder, in priority order. The document body is
/// the fallback when no rung matches.
pub static CONTENT_ROOT_RULES: [RootRule; 7] = [
    RootRule::Tag("main"),
    RootRule::Role("main"),
    RootRule::Class("main-content"),
    RootRule::Class("content"),
    RootRule::Tag("article"),
    RootRule::Class("article"),
    RootRule::Id("content"),
];

impl RootRule {
    /// Whether a node satisfies this rung.
    pub fn matches(&self, node: &NodeRef<'_>) -> bool {
        match self {
            Self::Tag(tag) => node.tag() == *tag,
            Self::Role(role) => node.attr("role") == Some(role),
            Self::Class(token) => node
                .attr("class")
                .is_some_and(|class| class.split_whitespace().any(|t| t == *token)),
            Self::Id(id) => node.attr("id") == Some(id),
        }
    }
}
