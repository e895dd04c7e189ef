//! Result types for extraction output.
//!
//! Content extraction produces a bounded Markdown condensation with its
//! link records; the interactive walk produces a document-ordered mix of
//! context fragments and element descriptors, exposed both as a structured
//! list and as a capped serialized text form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markdown;
use crate::metadata::PageMetadata;
use crate::snapshot::BoundingBox;

/// A hyperlink surfaced by content extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,
}

/// One node's emitted Markdown text plus any links it contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFragment {
    pub markdown_text: String,
    pub extracted_links: Vec<LinkRecord>,
}

impl ContentFragment {
    pub(crate) fn text(markdown_text: String) -> Self {
        Self {
            markdown_text,
            extracted_links: Vec::new(),
        }
    }
}

/// Interactive element categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Button,
    Link,
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Image,
    DivClickable,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Image => "image",
            Self::DivClickable => "div_clickable",
        }
    }
}

/// How a caller would operate an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementAction {
    Click,
    Type,
    Select,
}

impl ElementAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Type => "type",
            Self::Select => "select",
        }
    }
}

/// A structured record describing one interactive element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveElement {
    /// Run-scoped record id (`element-1`, `element-2`, ...).
    pub id: String,
    pub kind: ElementKind,
    /// Best-effort locator for re-finding the node.
    pub selector: String,
    /// 1-based occurrence index of `selector` within this run.
    pub selector_index: u32,
    /// Lower-priority locator alternates.
    pub fallback_selectors: Vec<String>,
    pub text: String,
    pub action: ElementAction,
    /// Key attributes, ordered for byte-stable serialization.
    pub attributes: BTreeMap<String, String>,
    pub position: BoundingBox,
    pub is_visible: bool,
    pub is_clickable: bool,
    /// Heuristic importance in `[0, 1]`.
    pub importance: f64,
}

/// Attributes appended inline to a serialized record, in this order.
const RECORD_LINE_ATTRS: [&str; 5] = ["href", "type", "value", "placeholder", "options"];

impl InteractiveElement {
    /// Single-line serialized form used by the interactive text output.
    pub fn to_record_line(&self) -> String {
        let mut line = format!(
            "[{}] <{}> \"{}\" selector={} action={} importance={:.2}",
            self.selector_index,
            self.kind.as_str(),
            self.text,
            self.selector,
            self.action.as_str(),
            self.importance,
        );
        for key in RECORD_LINE_ATTRS {
            if let Some(value) = self.attributes.get(key) {
                line.push(' ');
                line.push_str(key);
                line.push('=');
                line.push_str(value);
            }
        }
        line
    }
}

/// One document-order entry of the interactive walk: a context fragment or
/// an interactive descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotEntry {
    Text(String),
    Element(InteractiveElement),
}

/// Condensed Markdown rendition of a page.
#[derive(Debug, Clone, Serialize)]
pub struct ContentExtraction {
    pub title: String,
    pub url: String,
    /// Markdown condensation, capped at the configured character budget.
    pub content: String,
    /// Links contributed by emitted anchor fragments, in document order.
    pub links: Vec<LinkRecord>,
    pub metadata: PageMetadata,
    /// Per-node classification failures recovered during the walk.
    pub extraction_errors: Vec<String>,
}

/// Catalog of a page's interactive elements with surrounding context.
#[derive(Debug, Clone, Serialize)]
pub struct InteractiveExtraction {
    pub metadata: PageMetadata,
    /// Fragments and descriptors in document order.
    pub entries: Vec<SnapshotEntry>,
    /// Per-node classification failures recovered during the walk.
    pub extraction_errors: Vec<String>,
}

impl InteractiveExtraction {
    /// Ordered interactive descriptors: the uncapped structured form.
    pub fn elements(&self) -> impl Iterator<Item = &InteractiveElement> {
        self.entries.iter().filter_map(|entry| match entry {
            SnapshotEntry::Element(element) => Some(element),
            SnapshotEntry::Text(_) => None,
        })
    }

    /// Serialized `page_info` + `content` text form, capped at `max_chars`
    /// with a truncation marker when exceeded.
    pub fn to_text(&self, max_chars: usize) -> String {
        let mut out = String::new();
        out.push_str("page_info:\n");
        out.push_str(&format!("  title: {}\n", self.metadata.title));
        out.push_str(&format!("  url: {}\n", self.metadata.url));
        out.push_str("\ncontent:\n");
        for entry in &self.entries {
            match entry {
                SnapshotEntry::Text(text) => out.push_str(text),
                SnapshotEntry::Element(element) => out.push_str(&element.to_record_line()),
            }
            out.push('\n');
        }
        markdown::truncate(out, max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_element() -> InteractiveElement {
        let mut attributes = BTreeMap::new();
        attributes.insert("href".to_string(), "https://x.com".to_string());
        InteractiveElement {
            id: "element-1".to_string(),
            kind: ElementKind::Link,
            selector: "a".to_string(),
            selector_index: 1,
            fallback_selectors: Vec::new(),
            text: "X".to_string(),
            action: ElementAction::Click,
            attributes,
            position: BoundingBox::default(),
            is_visible: true,
            is_clickable: true,
            importance: 0.8,
        }
    }

    #[test]
    fn record_line_carries_type_tag_and_key_attributes() {
        let line = sample_element().to_record_line();
        assert_eq!(
            line,
            "[1] <link> \"X\" selector=a action=click importance=0.80 href=https://x.com"
        );
    }

    #[test]
    fn element_kind_serializes_snake_case() {
        assert_eq!(ElementKind::DivClickable.as_str(), "div_clickable");
        let json = match serde_json::to_string(&ElementKind::DivClickable) {
            Ok(json) => json,
            Err(err) => panic!("serialize failed: {err}"),
        };
        assert_eq!(json, "\"div_clickable\"");
    }
}
