//! Best-effort locator synthesis for interactive descriptors.
//!
//! A locator is only as stable as the attributes it leans on, so synthesis
//! walks a priority ladder: element id, first class token, positional
//! `nth-of-type`, bare tag. Repeated identical selectors within one run are
//! disambiguated by a 1-based occurrence index from [`SelectorCounters`].

use std::collections::HashMap;

use crate::snapshot::NodeRef;

/// Run-scoped occurrence counters for synthesized selectors.
///
/// Counts grow strictly with document order, which is what keeps
/// `selector_index` assignment deterministic across identical runs.
#[derive(Debug, Default)]
pub struct SelectorCounters {
    counts: HashMap<String, u32>,
}

impl SelectorCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more use of `selector`, returning its 1-based index.
    pub fn assign(&mut self, selector: &str) -> u32 {
        let count = self.counts.entry(selector.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

/// A synthesized locator plus lower-priority alternates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub selector: String,
    pub fallbacks: Vec<String>,
}

/// Synthesize the best-effort locator for a node.
///
/// Priority: `#id`, then `.first-class-token`, then `tag:nth-of-type(n)`
/// when same-tag siblings exist, then the bare tag name. Always returns a
/// value; the bare tag is the floor.
pub fn synthesize(node: &NodeRef<'_>) -> Locator {
    let mut candidates = Vec::new();

    if let Some(id) = node.attr("id") {
        if !id.is_empty() {
            candidates.push(format!("#{id}"));
        }
    }

    if let Some(class) = node.attr("class") {
        if let Some(token) = class.split_whitespace().next() {
            candidates.push(format!(".{token}"));
        }
    }

    if let Some((position, count)) = node.same_tag_sibling_position() {
        // position is 0 when the node is absent from its parent's child
        // list; such a locator would never resolve.
        if count > 1 && position > 0 {
            candidates.push(format!("{}:nth-of-type({position})", node.tag()));
        }
    }

    candidates.push(node.tag().to_string());

    let selector = candidates.remove(0);
    Locator {
        selector,
        fallbacks: candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DocumentSnapshot, NodeId, SnapshotBuilder};

    fn node(snapshot: &DocumentSnapshot, id: NodeId) -> NodeRef<'_> {
        match snapshot.node(id) {
            Some(node) => node,
            None => panic!("node {} should exist", id.0),
        }
    }

    #[test]
    fn id_wins_over_class_and_position() {
        let mut builder = SnapshotBuilder::new();
        let root = builder.root();
        let button = builder.element(root, "button");
        builder.attr(button, "id", "submit-btn");
        builder.attr(button, "class", "primary wide");
        let snapshot = builder.finish();

        let locator = synthesize(&node(&snapshot, button));
        assert_eq!(locator.selector, "#submit-btn");
        assert_eq!(locator.fallbacks, vec![".primary", "button"]);
    }

    #[test]
    fn first_class_token_used_when_id_missing() {
        let mut builder = SnapshotBuilder::new();
        let root = builder.root();
        let div = builder.element(root, "div");
        builder.attr(div, "class", "card featured");
        let snapshot = builder.finish();

        let locator = synthesize(&node(&snapshot, div));
        assert_eq!(locator.selector, ".card");
    }

    #[test]
    fn nth_of_type_applies_only_with_same_tag_siblings() {
        let mut builder = SnapshotBuilder::new();
        let root = builder.root();
        let _first = builder.element(root, "a");
        let second = builder.element(root, "a");
        let lonely = builder.element(root, "button");
        let snapshot = builder.finish();

        let second_locator = synthesize(&node(&snapshot, second));
        assert_eq!(second_locator.selector, "a:nth-of-type(2)");
        assert_eq!(second_locator.fallbacks, vec!["a"]);

        let lonely_locator = synthesize(&node(&snapshot, lonely));
        assert_eq!(lonely_locator.selector, "button");
        assert!(lonely_locator.fallbacks.is_empty());
    }

    #[test]
    fn counters_assign_sequential_indices_per_selector() {
        let mut counters = SelectorCounters::new();
        assert_eq!(counters.assign(".card"), 1);
        assert_eq!(counters.assign(".card"), 2);
        assert_eq!(counters.assign("button"), 1);
        assert_eq!(counters.assign(".card"), 3);
    }
}
