//! Element handlers for the classification dispatch.
//!
//! `classify` routes each node by lowercase tag name and produces either a
//! content fragment, an interactive descriptor, or a traversal directive.
//! Handlers that emit a node's whole subtree text ask the walk to consume
//! the subtree so the dedup tracker keeps descendants from re-emitting.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::locator;
use crate::markdown;
use crate::options::Options;
use crate::patterns::CLICK_HANDLER_ATTR;
use crate::result::{ContentFragment, ElementAction, ElementKind, InteractiveElement, LinkRecord};
use crate::scoring;
use crate::snapshot::{DocumentInfo, NodeRef};
use crate::text::{char_len, clean_text, direct_text};
use crate::url_utils;

use super::pipeline::WalkMode;
use super::state::ExtractionState;
use super::tags::{heading_level, is_control_tag, is_list_tag};

/// Attributes copied onto interactive descriptors when present.
const KEPT_ATTRS: [&str; 12] = [
    "id",
    "class",
    "href",
    "src",
    "alt",
    "title",
    "placeholder",
    "value",
    "type",
    "name",
    "role",
    "aria-label",
];

/// Outcome of classifying one node.
pub(crate) enum Classified {
    /// Emit a content fragment. `consume` subsumes the node's subtree.
    Fragment {
        fragment: ContentFragment,
        consume: bool,
    },
    /// Emit an interactive descriptor. `consume` subsumes the subtree.
    Element {
        element: InteractiveElement,
        consume: bool,
    },
    /// Nothing emitted; the walk descends into children.
    Descend,
    /// Nothing emitted; the subtree is skipped.
    Skip,
}

fn text_fragment(markdown_text: String, consume: bool) -> Classified {
    Classified::Fragment {
        fragment: ContentFragment::text(markdown_text),
        consume,
    }
}

/// Classify one visible, wanted node.
pub(crate) fn classify(
    node: &NodeRef<'_>,
    mode: WalkMode,
    options: &Options,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> Result<Classified> {
    let tag = node.tag();

    if let Some(level) = heading_level(tag) {
        return Ok(handle_heading(node, level, mode));
    }
    if is_list_tag(tag) {
        return handle_list(node, mode);
    }
    if is_control_tag(tag) && mode.is_interactive() {
        return Ok(handle_control(node, options, state, info));
    }

    match tag {
        "p" => Ok(handle_paragraph(node, options)),
        "div" | "span" => Ok(handle_container(node, mode, options, state, info)),
        "a" => handle_anchor(node, mode, state, info),
        "table" => Ok(handle_table(node, mode)),
        "blockquote" => Ok(handle_blockquote(node, options)),
        "code" => Ok(handle_code(node)),
        "img" => Ok(handle_image(node, mode, state, info)),
        _ => Ok(handle_leaf_fallback(node, options)),
    }
}

/// Headings emit at the source level in interactive mode and one level
/// deeper in content mode.
fn handle_heading(node: &NodeRef<'_>, level: usize, mode: WalkMode) -> Classified {
    let text = clean_text(&node.collect_text());
    if text.is_empty() {
        return Classified::Skip;
    }
    let marker = "#".repeat(level + mode.heading_offset());
    text_fragment(format!("{marker} {text}"), true)
}

fn handle_paragraph(node: &NodeRef<'_>, options: &Options) -> Classified {
    let text = clean_text(&node.collect_text());
    if char_len(&text) <= options.min_text_len {
        return Classified::Skip;
    }
    text_fragment(text, true)
}

fn handle_blockquote(node: &NodeRef<'_>, options: &Options) -> Classified {
    let text = clean_text(&node.collect_text());
    if char_len(&text) <= options.min_text_len {
        return Classified::Skip;
    }
    text_fragment(format!("> {text}"), true)
}

/// `div`/`span` contribute only their direct text, so their subtree always
/// stays live. Interactive mode upgrades clickable containers to
/// descriptors; content mode ignores the affordance and keeps the text.
fn handle_container(
    node: &NodeRef<'_>,
    mode: WalkMode,
    options: &Options,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> Classified {
    let text = direct_text(node);
    if char_len(&text) <= options.min_text_len {
        return Classified::Descend;
    }

    if mode.is_interactive() && has_click_affordance(node) {
        let attributes = collect_attributes(node, info);
        let element = build_element(
            node,
            ElementKind::DivClickable,
            ElementAction::Click,
            text,
            attributes,
            state,
            info,
        );
        return Classified::Element {
            element,
            consume: false,
        };
    }

    text_fragment(text, false)
}

/// Clickable affordance: inline click-handler attribute, pointer cursor,
/// or an explicit button role.
fn has_click_affordance(node: &NodeRef<'_>) -> bool {
    node.attributes()
        .keys()
        .any(|name| CLICK_HANDLER_ATTR.is_match(name))
        || node.style().cursor == "pointer"
        || node.attr("role") == Some("button")
}

fn handle_anchor(
    node: &NodeRef<'_>,
    mode: WalkMode,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> Result<Classified> {
    let text = clean_text(&node.collect_text());
    let href = url_utils::absolutize(&info.url, node.attr("href").unwrap_or_default());

    if mode.is_interactive() {
        let attributes = collect_attributes(node, info);
        let element = build_element(
            node,
            ElementKind::Link,
            ElementAction::Click,
            text,
            attributes,
            state,
            info,
        );
        return Ok(Classified::Element {
            element,
            consume: true,
        });
    }

    // Anchors inside table rows are already covered by the table renderer.
    if node.ancestor_has_tag(&["tr"])? {
        return Ok(Classified::Skip);
    }
    if text.is_empty() {
        return Ok(Classified::Skip);
    }
    Ok(Classified::Fragment {
        fragment: ContentFragment {
            markdown_text: format!("[{text}]({href})"),
            extracted_links: vec![LinkRecord { text, href }],
        },
        consume: true,
    })
}

/// Tables render as pipe tables in content mode. The interactive walk
/// descends instead, so controls inside rows still reach the catalog.
fn handle_table(node: &NodeRef<'_>, mode: WalkMode) -> Classified {
    if mode.is_interactive() {
        return Classified::Descend;
    }
    let rendered = markdown::render_table(node);
    if rendered.is_empty() {
        return Classified::Skip;
    }
    text_fragment(rendered, true)
}

/// Top-level lists render in content mode; nested lists belong to their
/// ancestor list. The interactive walk descends like it does for tables.
fn handle_list(node: &NodeRef<'_>, mode: WalkMode) -> Result<Classified> {
    if mode.is_interactive() {
        return Ok(Classified::Descend);
    }
    if node.ancestor_has_tag(&["ul", "ol"])? {
        return Ok(Classified::Skip);
    }
    let rendered = markdown::render_list(node);
    if rendered.is_empty() {
        return Ok(Classified::Skip);
    }
    Ok(text_fragment(rendered, true))
}

/// Code keeps its raw whitespace: fenced when the immediate parent is a
/// preformatted block, inline backticks otherwise.
fn handle_code(node: &NodeRef<'_>) -> Classified {
    let raw = node.collect_text();
    if raw.trim().is_empty() {
        return Classified::Skip;
    }
    let in_pre = node.parent().is_some_and(|parent| parent.tag() == "pre");
    if in_pre {
        text_fragment(format!("```\n{raw}\n```"), true)
    } else {
        text_fragment(format!("`{raw}`"), true)
    }
}

fn handle_image(
    node: &NodeRef<'_>,
    mode: WalkMode,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> Classified {
    let alt = node.attr("alt").unwrap_or_default();
    let src = url_utils::absolutize(&info.url, node.attr("src").unwrap_or_default());

    if mode.is_interactive() {
        let attributes = collect_attributes(node, info);
        let element = build_element(
            node,
            ElementKind::Image,
            ElementAction::Click,
            clean_text(alt),
            attributes,
            state,
            info,
        );
        return Classified::Element {
            element,
            consume: true,
        };
    }

    if alt.is_empty() && src.is_empty() {
        return Classified::Skip;
    }
    text_fragment(format!("![{alt}]({src})"), true)
}

/// Form controls are cataloged with a synthesized label and the facts a
/// caller needs to operate them. Content mode never reaches these tags.
fn handle_control(
    node: &NodeRef<'_>,
    options: &Options,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> Classified {
    let tag = node.tag();
    let input_type = node
        .attr("type")
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let kind = match tag {
        "button" => ElementKind::Button,
        "textarea" => ElementKind::Textarea,
        "select" => ElementKind::Select,
        _ => match input_type.as_str() {
            "checkbox" => ElementKind::Checkbox,
            "radio" => ElementKind::Radio,
            _ => ElementKind::Input,
        },
    };

    let action = match tag {
        "button" => ElementAction::Click,
        "select" => ElementAction::Select,
        "textarea" => ElementAction::Type,
        _ => match input_type.as_str() {
            "submit" | "button" | "reset" | "image" | "checkbox" | "radio" => ElementAction::Click,
            _ => ElementAction::Type,
        },
    };

    let label = control_label(node, tag);
    let mut attributes = collect_attributes(node, info);

    if tag == "textarea" {
        if let Some(value) = node.attr("value") {
            let capped: String = value.chars().take(options.max_value_len).collect();
            attributes.insert("value".to_string(), capped);
        }
    }
    if tag == "select" {
        let option_texts: Vec<String> = node
            .children()
            .filter(|child| child.tag() == "option")
            .map(|child| clean_text(&child.collect_text()))
            .filter(|text| !text.is_empty())
            .collect();
        if !option_texts.is_empty() {
            attributes.insert("options".to_string(), option_texts.join(", "));
        }
    }

    let element = build_element(node, kind, action, label, attributes, state, info);
    Classified::Element {
        element,
        consume: true,
    }
}

/// Label fallback chain for controls: placeholder, name, id, aria-label,
/// then a generic per-tag default.
fn control_label(node: &NodeRef<'_>, tag: &str) -> String {
    for attr in ["placeholder", "name", "id", "aria-label"] {
        if let Some(value) = node.attr(attr) {
            let cleaned = clean_text(value);
            if !cleaned.is_empty() {
                return cleaned;
            }
        }
    }
    match tag {
        "button" => "Button",
        "textarea" => "Textarea",
        "select" => "Select",
        _ => "Input",
    }
    .to_string()
}

/// Anything else with no child elements and enough text is plain text.
fn handle_leaf_fallback(node: &NodeRef<'_>, options: &Options) -> Classified {
    if node.children().next().is_none() {
        let text = clean_text(&node.collect_text());
        if char_len(&text) > options.min_text_len {
            return text_fragment(text, true);
        }
    }
    Classified::Descend
}

fn collect_attributes(node: &NodeRef<'_>, info: &DocumentInfo) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for name in KEPT_ATTRS {
        if let Some(value) = node.attr(name) {
            let value = match name {
                "href" | "src" => url_utils::absolutize(&info.url, value),
                _ => value.to_string(),
            };
            attributes.insert(name.to_string(), value);
        }
    }
    attributes
}

#[allow(clippy::too_many_arguments)]
fn build_element(
    node: &NodeRef<'_>,
    kind: ElementKind,
    action: ElementAction,
    text: String,
    attributes: BTreeMap<String, String>,
    state: &mut ExtractionState,
    info: &DocumentInfo,
) -> InteractiveElement {
    let locator = locator::synthesize(node);
    let selector_index = state.selectors.assign(&locator.selector);
    let importance = scoring::importance(node, &text, info.viewport);
    InteractiveElement {
        id: state.next_element_id(),
        kind,
        selector: locator.selector,
        selector_index,
        fallback_selectors: locator.fallbacks,
        text,
        action,
        attributes,
        position: node.bounds(),
        is_visible: true,
        is_clickable: matches!(action, ElementAction::Click | ElementAction::Select),
        importance,
    }
}
