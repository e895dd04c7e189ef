//! Markdown rendering for tables, lists, and the output size cap.

use crate::snapshot::NodeRef;
use crate::text::clean_text;

/// Appended when serialized output exceeds the character cap.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated]";

/// Render a `<table>` subtree as a pipe table.
///
/// Each `<tr>` in document order becomes a pipe-delimited line of its cell
/// text. When the first rendered row contains at least one `<th>`, a
/// `---` separator row follows it, one cell per header column. Rows with
/// no cells are skipped entirely.
pub fn render_table(table: &NodeRef<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut saw_first_row = false;

    for row in table.descendants() {
        if row.tag() != "tr" {
            continue;
        }

        let mut cells: Vec<String> = Vec::new();
        let mut has_header_cell = false;
        for cell in row.children() {
            match cell.tag() {
                "th" => {
                    has_header_cell = true;
                    cells.push(clean_text(&cell.collect_text()));
                }
                "td" => cells.push(clean_text(&cell.collect_text())),
                _ => {}
            }
        }
        if cells.is_empty() {
            continue;
        }

        lines.push(format!("| {} |", cells.join(" | ")));
        if !saw_first_row {
            saw_first_row = true;
            if has_header_cell {
                let separator = vec!["---"; cells.len()].join(" | ");
                lines.push(format!("| {separator} |"));
            }
        }
    }

    lines.join("\n")
}

/// Render a top-level `<ul>`/`<ol>` as a Markdown list.
///
/// Iterates the list's direct `<li>` children; ordered lists number emitted
/// items from 1, unordered items take a `- ` prefix. Items whose cleaned
/// text is empty are skipped. Nested list text flattens into its ancestor
/// item; the caller never invokes this for a list inside another list.
pub fn render_list(list: &NodeRef<'_>) -> String {
    let ordered = list.tag() == "ol";
    let mut lines: Vec<String> = Vec::new();
    let mut number = 0usize;

    for item in list.children() {
        if item.tag() != "li" {
            continue;
        }
        let text = clean_text(&item.collect_text());
        if text.is_empty() {
            continue;
        }
        if ordered {
            number += 1;
            lines.push(format!("{number}. {text}"));
        } else {
            lines.push(format!("- {text}"));
        }
    }

    lines.join("\n")
}

/// Enforce the output character cap.
///
/// Output at or under `max_chars` passes through unchanged. Longer output
/// is cut after exactly `max_chars` characters (never splitting a code
/// point) and the truncation marker is appended.
pub fn truncate(buffer: String, max_chars: usize) -> String {
    if buffer.chars().count() <= max_chars {
        return buffer;
    }
    tracing::debug!(limit = max_chars, "output truncated at character cap");
    let mut out: String = buffer.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
