//! Immutable page snapshots and the provider contract.
//!
//! The engine never touches a live tree. The hosting runtime captures the
//! rendered page once per extraction and hands over an arena of nodes plus
//! document-level facts; node identity is the arena index. Snapshots arrive
//! from hosts as JSON (`DocumentSnapshot::from_json`) or are assembled
//! programmatically with [`SnapshotBuilder`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on parent-chain walks. A well-formed tree never gets close;
/// a snapshot with a parent cycle trips this instead of hanging the walk.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Identity of a node within one snapshot arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Computed style facts the host resolves per node.
///
/// Carries the visibility triple plus the cursor, which clickable-container
/// detection needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub opacity: String,
    #[serde(default)]
    pub cursor: String,
}

/// Viewport-relative geometry of a rendered node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// A node takes part in layout only when it has non-zero extent.
    pub fn is_rendered(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// One element in the snapshot arena.
///
/// `text` holds the node's own text segments; child element content lives
/// in the referenced children, never here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default)]
    pub bounds: BoundingBox,
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Scroll offsets of the captured document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Document-level facts captured alongside the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub charset: String,
    /// Raw ready state string as reported by the host
    /// (loading/interactive/complete).
    #[serde(default)]
    pub ready_state: String,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub scroll: ScrollOffset,
}

/// Immutable snapshot of a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    nodes: Vec<NodeData>,
    root: NodeId,
    document: DocumentInfo,
}

impl DocumentSnapshot {
    /// Assemble a snapshot from raw parts, validating every arena index.
    pub fn new(nodes: Vec<NodeData>, root: NodeId, document: DocumentInfo) -> Result<Self> {
        let snapshot = Self {
            nodes,
            root,
            document,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse a snapshot from the host's JSON form and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|err| Error::MalformedSnapshot(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::MalformedSnapshot("empty node arena".to_string()));
        }
        let len = self.nodes.len();
        if self.root.index() >= len {
            return Err(Error::MalformedSnapshot(format!(
                "root {} out of range ({len} nodes)",
                self.root.0
            )));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            for child in &node.children {
                if child.index() >= len {
                    return Err(Error::MalformedSnapshot(format!(
                        "node {index} references missing child {}",
                        child.0
                    )));
                }
            }
            if let Some(parent) = node.parent {
                if parent.index() >= len {
                    return Err(Error::MalformedSnapshot(format!(
                        "node {index} references missing parent {}",
                        parent.0
                    )));
                }
            }
        }
        Ok(())
    }

    /// Document-level facts captured with the tree.
    pub fn document(&self) -> &DocumentInfo {
        &self.document
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes. Validated snapshots never do.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cursor over the snapshot root.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            snapshot: self,
            id: self.root,
        }
    }

    /// Cursor over an arbitrary node, if the id is in range.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id.index() < self.nodes.len() {
            Some(NodeRef { snapshot: self, id })
        } else {
            None
        }
    }
}

/// Borrowed cursor over one snapshot node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    snapshot: &'a DocumentSnapshot,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.snapshot.nodes[self.id.index()]
    }

    /// Arena identity of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name).map(String::as_str)
    }

    /// Full attribute map.
    pub fn attributes(&self) -> &'a BTreeMap<String, String> {
        &self.data().attributes
    }

    /// The node's own text segments (child element text excluded).
    pub fn own_text(&self) -> &'a [String] {
        &self.data().text
    }

    /// Computed style facts for this node.
    pub fn style(&self) -> &'a ComputedStyle {
        &self.data().style
    }

    /// Viewport-relative geometry.
    pub fn bounds(&self) -> BoundingBox {
        self.data().bounds
    }

    /// Parent cursor, if any.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.and_then(|id| self.snapshot.node(id))
    }

    /// Child element cursors in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let snapshot = self.snapshot;
        self.data()
            .children
            .iter()
            .filter_map(move |id| snapshot.node(*id))
    }

    /// Whether this node is rendered: non-zero box, not display:none,
    /// not visibility:hidden, not opacity:0.
    pub fn is_visible(&self) -> bool {
        let style = self.style();
        self.bounds().is_rendered()
            && style.display != "none"
            && style.visibility != "hidden"
            && style.opacity != "0"
    }

    /// Whether any ancestor carries one of `tags`. Depth-bounded so a
    /// snapshot with a parent cycle errors instead of spinning.
    pub(crate) fn ancestor_has_tag(&self, tags: &[&str]) -> Result<bool> {
        let mut depth = 0usize;
        let mut current = self.parent();
        while let Some(node) = current {
            depth += 1;
            if depth > MAX_ANCESTOR_DEPTH {
                return Err(Error::MalformedSnapshot(format!(
                    "ancestor chain of node {} exceeds depth {MAX_ANCESTOR_DEPTH}",
                    self.id.0
                )));
            }
            if tags.contains(&node.tag()) {
                return Ok(true);
            }
            current = node.parent();
        }
        Ok(false)
    }

    /// 1-based position and total count among same-tag siblings. `None`
    /// when the node has no parent.
    pub(crate) fn same_tag_sibling_position(&self) -> Option<(usize, usize)> {
        let parent = self.parent()?;
        let mut position = 0usize;
        let mut count = 0usize;
        for sibling in parent.children() {
            if sibling.tag() == self.tag() {
                count += 1;
                if sibling.id() == self.id {
                    position = count;
                }
            }
        }
        Some((position, count))
    }

    /// Preorder descendants, excluding this node. The visit budget caps at
    /// the arena size, so duplicate child references and cycles terminate.
    pub(crate) fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut budget = self.snapshot.nodes.len();
        let mut stack: Vec<NodeId> = self.data().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if budget == 0 {
                break;
            }
            budget -= 1;
            let Some(node) = self.snapshot.node(id) else {
                continue;
            };
            out.push(node);
            for child in node.data().children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Raw subtree text: own segments then descendants' segments in
    /// document order, space-joined and uncleaned.
    pub(crate) fn collect_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for segment in self.own_text() {
            parts.push(segment.as_str());
        }
        for node in self.descendants() {
            for segment in node.own_text() {
                parts.push(segment.as_str());
            }
        }
        parts.join(" ")
    }
}

/// The Document Snapshot Provider collaborator.
///
/// One blocking [`capture`](SnapshotProvider::capture) call happens per
/// extraction; once the snapshot is delivered, the walk is deterministic
/// and bounded. A host that cannot reach its page returns
/// [`Error::ProviderUnavailable`] or [`Error::SnapshotFailed`].
pub trait SnapshotProvider {
    /// Capture the current rendered document.
    fn capture(&self) -> Result<DocumentSnapshot>;
}

impl SnapshotProvider for DocumentSnapshot {
    fn capture(&self) -> Result<DocumentSnapshot> {
        Ok(self.clone())
    }
}

/// Programmatic snapshot assembly for tests and embedders without a JSON
/// channel. Nodes default to a small visible box; setters adjust geometry
/// and style where a scenario needs it.
#[derive(Debug)]
pub struct SnapshotBuilder {
    nodes: Vec<NodeData>,
    document: DocumentInfo,
}

impl SnapshotBuilder {
    /// Start a snapshot rooted at a `body` element.
    pub fn new() -> Self {
        let root = NodeData {
            tag: "body".to_string(),
            bounds: BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 1280.0,
                height: 720.0,
            },
            ..NodeData::default()
        };
        Self {
            nodes: vec![root],
            document: DocumentInfo::default(),
        }
    }

    /// Id of the implicit root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child element under `parent` and return its id.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            bounds: BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 20.0,
            },
            ..NodeData::default()
        });
        if let Some(parent_data) = self.nodes.get_mut(parent.index()) {
            parent_data.children.push(id);
        }
        id
    }

    /// Append one own-text segment to a node.
    pub fn text(&mut self, node: NodeId, text: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.text.push(text.to_string());
        }
        self
    }

    /// Set an attribute on a node.
    pub fn attr(&mut self, node: NodeId, name: &str, value: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Set a node's bounding box.
    pub fn bounds(&mut self, node: NodeId, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.bounds = BoundingBox {
                x,
                y,
                width,
                height,
            };
        }
        self
    }

    /// Set a node's computed display value.
    pub fn display(&mut self, node: NodeId, value: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.style.display = value.to_string();
        }
        self
    }

    /// Set a node's computed visibility value.
    pub fn visibility(&mut self, node: NodeId, value: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.style.visibility = value.to_string();
        }
        self
    }

    /// Set a node's computed opacity value.
    pub fn opacity(&mut self, node: NodeId, value: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.style.opacity = value.to_string();
        }
        self
    }

    /// Set a node's computed cursor value.
    pub fn cursor(&mut self, node: NodeId, value: &str) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.style.cursor = value.to_string();
        }
        self
    }

    /// Attach document-level facts.
    pub fn document(&mut self, document: DocumentInfo) -> &mut Self {
        self.document = document;
        self
    }

    /// Finish the snapshot. Builder-produced indices are valid by
    /// construction.
    pub fn finish(self) -> DocumentSnapshot {
        DocumentSnapshot {
            nodes: self.nodes,
            root: NodeId(0),
            document: self.document,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
