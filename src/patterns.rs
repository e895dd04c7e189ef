//! Compiled regex patterns for text cleaning and affordance detection.
//!
//! All patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Zero-width and directional format characters stripped from extracted
/// text: U+200B..U+200F plus the BOM/zero-width no-break space U+FEFF.
pub static INVISIBLE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\u{200B}-\u{200F}\u{FEFF}]").expect("INVISIBLE_CHARS regex")
});

/// Runs of whitespace collapsed to a single space. `\s` is Unicode-aware,
/// so non-breaking spaces collapse along with ASCII whitespace.
pub static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUNS regex")
});

/// Inline click-handler attribute names marking a clickable container.
pub static CLICK_HANDLER_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^on(?:click|mousedown|mouseup|pointerdown|pointerup)$")
        .expect("CLICK_HANDLER_ATTR regex")
});
