//! Importance heuristics for interactive descriptors.

use crate::snapshot::{NodeRef, Viewport};

/// Heuristic importance of an interactive element, in `[0, 1]`.
///
/// Base 0.5, plus 0.3 for a button or submit input, plus 0.2 for an anchor,
/// plus 0.1 for non-empty text, plus 0.1 when the element's top edge sits
/// in the upper half of the viewport. The tag bonuses are exclusive: a node
/// has one tag, so an anchor styled as a button still scores as an anchor.
pub fn importance(node: &NodeRef<'_>, text: &str, viewport: Viewport) -> f64 {
    let mut score = 0.5;

    let tag = node.tag();
    let is_submit_input = tag == "input"
        && node
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("submit"));
    if tag == "button" || is_submit_input {
        score += 0.3;
    } else if tag == "a" {
        score += 0.2;
    }

    if !text.is_empty() {
        score += 0.1;
    }

    if node.bounds().y < f64::from(viewport.height) / 2.0 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}
