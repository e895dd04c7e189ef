//! Traversal engine and extraction orchestration.
//!
//! One engine walks the snapshot in document order under the node budget;
//! a [`WalkMode`] strategy supplies everything the two extraction flavors
//! disagree on: the unwanted-tag set, the class blacklist, the heading
//! offset, and the metadata fallbacks.

use crate::error::{Error, Result};
use crate::markdown;
use crate::metadata;
use crate::options::Options;
use crate::result::{
    ContentExtraction, ContentFragment, InteractiveElement, InteractiveExtraction, LinkRecord,
    SnapshotEntry,
};
use crate::snapshot::{DocumentSnapshot, NodeRef, SnapshotProvider};

use super::handlers::{classify, Classified};
use super::state::ExtractionState;
use super::tags::{class_is_unwanted, is_content_unwanted, is_interactive_unwanted, CONTENT_ROOT_RULES};

/// Traversal strategy: what to skip, how to emit, which fallbacks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Markdown condensation for summarization.
    Content,
    /// Interactive-element cataloging for automation.
    Interactive,
}

impl WalkMode {
    pub(crate) fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }

    fn unwanted(self, tag: &str) -> bool {
        match self {
            Self::Content => is_content_unwanted(tag),
            Self::Interactive => is_interactive_unwanted(tag),
        }
    }

    /// Only the content walk rejects nodes by class substring.
    fn uses_class_blacklist(self) -> bool {
        matches!(self, Self::Content)
    }

    /// Content mode shifts source heading levels down by one.
    pub(crate) fn heading_offset(self) -> usize {
        match self {
            Self::Content => 1,
            Self::Interactive => 0,
        }
    }

    fn title_fallback(self) -> &'static str {
        match self {
            Self::Content => "Untitled",
            Self::Interactive => "Untitled Page",
        }
    }

    fn language_fallback(self) -> &'static str {
        match self {
            Self::Content => "en",
            Self::Interactive => "unknown",
        }
    }
}

/// Document-order output of one walk.
enum Emitted {
    Fragment(ContentFragment),
    Element(InteractiveElement),
}

fn is_wanted(node: &NodeRef<'_>, mode: WalkMode) -> bool {
    if mode.unwanted(node.tag()) {
        return false;
    }
    if mode.uses_class_blacklist() {
        if let Some(class) = node.attr("class") {
            if class_is_unwanted(class) {
                return false;
            }
        }
    }
    true
}

/// Pick the content root: first match of the selection ladder in document
/// order, else the snapshot root.
fn select_content_root(snapshot: &DocumentSnapshot) -> NodeRef<'_> {
    let root = snapshot.root();
    for rule in &CONTENT_ROOT_RULES {
        if rule.matches(&root) {
            return root;
        }
        for node in root.descendants() {
            if rule.matches(&node) {
                return node;
            }
        }
    }
    root
}

fn mark_subtree(node: &NodeRef<'_>, state: &mut ExtractionState) {
    for descendant in node.descendants() {
        state.mark_done(descendant.id());
    }
}

/// Walk `root`'s subtree in document order, classifying each admitted node.
fn walk(
    snapshot: &DocumentSnapshot,
    root: NodeRef<'_>,
    mode: WalkMode,
    options: &Options,
    state: &mut ExtractionState,
) -> Vec<Emitted> {
    let mut out = Vec::new();
    let mut stack = vec![root.id()];

    while let Some(id) = stack.pop() {
        if !state.admit_visit(options.max_visited_nodes) {
            tracing::debug!(budget = options.max_visited_nodes, "node budget exhausted");
            break;
        }
        let Some(node) = snapshot.node(id) else {
            state.record_error(&Error::MalformedSnapshot(format!(
                "node {} out of range",
                id.0
            )));
            continue;
        };
        if state.is_done(id) {
            continue;
        }
        if !node.is_visible() || !is_wanted(&node, mode) {
            continue;
        }

        match classify(&node, mode, options, state, snapshot.document()) {
            Ok(Classified::Fragment { fragment, consume }) => {
                out.push(Emitted::Fragment(fragment));
                state.mark_done(id);
                if consume {
                    mark_subtree(&node, state);
                } else {
                    push_children(&node, &mut stack);
                }
            }
            Ok(Classified::Element { element, consume }) => {
                out.push(Emitted::Element(element));
                state.mark_done(id);
                if consume {
                    mark_subtree(&node, state);
                } else {
                    push_children(&node, &mut stack);
                }
            }
            Ok(Classified::Descend) => {
                state.mark_done(id);
                push_children(&node, &mut stack);
            }
            Ok(Classified::Skip) => {
                state.mark_done(id);
                mark_subtree(&node, state);
            }
            Err(err) => {
                let wrapped = Error::Classification {
                    node: id.0,
                    tag: node.tag().to_string(),
                    reason: err.to_string(),
                };
                state.record_error(&wrapped);
                state.mark_done(id);
                mark_subtree(&node, state);
            }
        }
    }

    out
}

fn push_children(node: &NodeRef<'_>, stack: &mut Vec<crate::snapshot::NodeId>) {
    let children: Vec<_> = node.children().map(|child| child.id()).collect();
    for id in children.into_iter().rev() {
        stack.push(id);
    }
}

/// Run content-mode extraction against a snapshot provider.
pub fn extract_content(
    provider: &dyn SnapshotProvider,
    options: &Options,
) -> Result<ContentExtraction> {
    let snapshot = provider.capture()?;
    tracing::debug!(nodes = snapshot.len(), "content extraction started");

    let mut state = ExtractionState::new();
    let root = select_content_root(&snapshot);
    let emitted = walk(&snapshot, root, WalkMode::Content, options, &mut state);

    let mut parts: Vec<String> = Vec::new();
    let mut links: Vec<LinkRecord> = Vec::new();
    for entry in emitted {
        match entry {
            Emitted::Fragment(fragment) => {
                parts.push(fragment.markdown_text);
                links.extend(fragment.extracted_links);
            }
            // The content classifier never produces descriptors.
            Emitted::Element(_) => {}
        }
    }

    let content = markdown::truncate(parts.join("\n\n"), options.max_output_chars);
    let mode = WalkMode::Content;
    let page = metadata::collect(
        snapshot.document(),
        mode.title_fallback(),
        mode.language_fallback(),
    );
    tracing::debug!(
        visited = state.visited(),
        links = links.len(),
        errors = state.errors.len(),
        "content extraction finished"
    );

    Ok(ContentExtraction {
        title: page.title.clone(),
        url: page.url.clone(),
        content,
        links,
        metadata: page,
        extraction_errors: state.errors,
    })
}

/// Run interactive-mode extraction against a snapshot provider.
pub fn extract_interactive(
    provider: &dyn SnapshotProvider,
    options: &Options,
) -> Result<InteractiveExtraction> {
    let snapshot = provider.capture()?;
    tracing::debug!(nodes = snapshot.len(), "interactive extraction started");

    let mut state = ExtractionState::new();
    let root = snapshot.root();
    let emitted = walk(&snapshot, root, WalkMode::Interactive, options, &mut state);

    let entries: Vec<SnapshotEntry> = emitted
        .into_iter()
        .map(|entry| match entry {
            Emitted::Fragment(fragment) => SnapshotEntry::Text(fragment.markdown_text),
            Emitted::Element(element) => SnapshotEntry::Element(element),
        })
        .collect();

    let mode = WalkMode::Interactive;
    let page = metadata::collect(
        snapshot.document(),
        mode.title_fallback(),
        mode.language_fallback(),
    );
    tracing::debug!(
        visited = state.visited(),
        entries = entries.len(),
        errors = state.errors.len(),
        "interactive extraction finished"
    );

    Ok(InteractiveExtraction {
        metadata: page,
        entries,
        extraction_errors: state.errors,
    })
}
