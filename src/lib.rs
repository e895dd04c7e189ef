//! # pagesift
//!
//! Distills a rendered page's visible content into two alternate structured
//! forms:
//!
//! - a condensed, size-bounded **Markdown summary** with extracted links and
//!   page metadata, for downstream summarization and reasoning
//! - a **catalog of interactive elements** (buttons, links, inputs, selects,
//!   clickable containers) carrying synthesized locators, attributes, and a
//!   heuristic importance score, for downstream automation
//!
//! The engine never renders pages or touches a live tree: a hosting runtime
//! implements [`SnapshotProvider`] and delivers an immutable
//! [`DocumentSnapshot`] (an arena of nodes plus document-level facts), and
//! the walk is then deterministic and bounded - at most 1500 node visits and
//! 30000 output characters per run, with nothing persisted across calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagesift::{extract_content, SnapshotBuilder};
//!
//! let mut builder = SnapshotBuilder::new();
//! let body = builder.root();
//! let heading = builder.element(body, "h1");
//! builder.text(heading, "Hi");
//! let snapshot = builder.finish();
//!
//! let result = extract_content(&snapshot)?;
//! assert!(result.content.starts_with("## Hi"));
//! # Ok::<(), pagesift::Error>(())
//! ```

mod error;
mod options;

/// Compiled regex patterns for cleaning and affordance detection.
pub mod patterns;

/// Immutable page snapshots and the provider contract.
pub mod snapshot;

/// Text normalization for extracted fragments.
pub mod text;

/// Best-effort locator synthesis and run-scoped selector counters.
pub mod locator;

/// Markdown rendering for tables, lists, and the output size cap.
pub mod markdown;

/// Importance heuristics for interactive descriptors.
pub mod scoring;

/// Document-level metadata collection.
pub mod metadata;

/// URL resolution for emitted links and image sources.
pub mod url_utils;

/// Extraction pipeline (tag catalogs, state, handlers, traversal engine).
pub mod extractor;

/// Result types for extraction output.
pub mod result;

// Public API - re-exports
pub use error::{Error, Result};
pub use metadata::{LoadState, PageMetadata};
pub use options::Options;
pub use result::{
    ContentExtraction, ContentFragment, ElementAction, ElementKind, InteractiveElement,
    InteractiveExtraction, LinkRecord, SnapshotEntry,
};
pub use snapshot::{
    BoundingBox, ComputedStyle, DocumentInfo, DocumentSnapshot, NodeData, NodeId, NodeRef,
    ScrollOffset, SnapshotBuilder, SnapshotProvider, Viewport,
};

/// Extract a page's content as bounded Markdown using default options.
///
/// Performs one blocking snapshot capture against `provider`, walks the
/// content root in document order, and returns the Markdown condensation
/// with its link records and page metadata.
pub fn extract_content(provider: &dyn SnapshotProvider) -> Result<ContentExtraction> {
    extractor::extract_content(provider, &Options::default())
}

/// Extract a page's content as bounded Markdown with custom options.
pub fn extract_content_with_options(
    provider: &dyn SnapshotProvider,
    options: &Options,
) -> Result<ContentExtraction> {
    extractor::extract_content(provider, options)
}

/// Catalog a page's interactive elements using default options.
///
/// Performs one blocking snapshot capture against `provider` and walks the
/// full body subtree. The result carries descriptors and context fragments
/// in document order; [`InteractiveExtraction::to_text`] renders the capped
/// serialized form.
pub fn extract_interactive(provider: &dyn SnapshotProvider) -> Result<InteractiveExtraction> {
    extractor::extract_interactive(provider, &Options::default())
}

/// Catalog a page's interactive elements with custom options.
pub fn extract_interactive_with_options(
    provider: &dyn SnapshotProvider,
    options: &Options,
) -> Result<InteractiveExtraction> {
    extractor::extract_interactive(provider, options)
}
