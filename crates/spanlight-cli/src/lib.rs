//! `spanlight` CLI support (library surface).
//!
//! The primary entrypoint is the `spanlight` binary. This module holds the text renderers the
//! binary uses for `--output text`, so they can be tested without spawning a process.

use spanlight_core::HighlightedNode;
use spanlight_engine::{marked_text, RenderedBody, RenderedMessage, TermOutcome, TermReport};

pub use spanlight_core as core;

/// Markers used to show highlighted spans in plain-text output.
#[derive(Debug, Clone)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: "[[".to_string(),
            close: "]]".to_string(),
        }
    }
}

fn is_block(kind: &str) -> bool {
    matches!(
        kind,
        "paragraph"
            | "heading"
            | "blockquote"
            | "code_block"
            | "list_item"
            | "table_row"
            | "footnote"
            | "display_math"
            | "block"
    )
}

fn push_node(node: &HighlightedNode, m: &Markers, out: &mut String) {
    match node {
        HighlightedNode::Leaf { segments } => out.push_str(&marked_text(segments, &m.open, &m.close)),
        HighlightedNode::Children { children } => children.iter().for_each(|c| push_node(c, m, out)),
        HighlightedNode::Wrapper { kind, child } => match kind.as_str() {
            "hard_break" => out.push('\n'),
            "rule" => out.push_str("\n---\n"),
            "task_done" => out.push_str("[x] "),
            "task_open" => out.push_str("[ ] "),
            "list_item" => {
                out.push_str("- ");
                push_node(child, m, out);
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            k if is_block(k) => {
                push_node(child, m, out);
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => push_node(child, m, out),
        },
    }
}

/// Flatten a highlighted tree to text, one line per block.
pub fn tree_to_text(root: &HighlightedNode, markers: &Markers) -> String {
    let mut out = String::new();
    push_node(root, markers, &mut out);
    out.trim_end().to_string()
}

pub fn body_to_text(body: &RenderedBody, markers: &Markers) -> String {
    match body {
        RenderedBody::Flat { segments } => marked_text(segments, &markers.open, &markers.close),
        RenderedBody::Tree { root } => tree_to_text(root, markers),
    }
}

pub fn term_summary(terms: &[TermReport]) -> String {
    terms
        .iter()
        .map(|t| {
            let what = match t.outcome {
                TermOutcome::Exact { count } => format!("exact x{count}"),
                TermOutcome::Fuzzy { score } => format!("fuzzy {score:.2}"),
                TermOutcome::Unmatched => "unmatched".to_string(),
                TermOutcome::Skipped => "skipped".to_string(),
            };
            format!("  {:?}: {what}", t.term)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn message_to_text(msg: &RenderedMessage, markers: &Markers) -> String {
    let role = msg.role.as_deref().unwrap_or("message");
    let mut out = format!("== {role} ({})\n", msg.content_kind.as_str());
    out.push_str(&body_to_text(&msg.body, markers));
    out.push('\n');
    for tc in &msg.tool_calls {
        out.push_str(&format!("  tool: {} {}\n", tc.name, tc.arguments));
    }
    if !msg.terms.is_empty() {
        out.push_str("terms:\n");
        out.push_str(&term_summary(&msg.terms));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanlight_core::RawContent;
    use spanlight_engine::Highlighter;

    #[test]
    fn flat_body_wraps_highlights() {
        let msg = Highlighter::default().render_content(&RawContent::from("The cat sat"), &["cat"]);
        assert_eq!(body_to_text(&msg.body, &Markers::default()), "The [[cat]] sat");
    }

    #[test]
    fn tree_body_puts_blocks_on_lines() {
        let msg = Highlighter::default()
            .render_content(&RawContent::from("# Title\n\n- one *two*\n- three"), &["two"]);
        let text = body_to_text(&msg.body, &Markers::default());
        assert_eq!(text, "Title\n- one [[two]]\n- three");
    }

    #[test]
    fn message_text_lists_term_outcomes() {
        let msg = Highlighter::default()
            .render_content(&RawContent::from("plain words here"), &["words", "absent"]);
        let text = message_to_text(&msg, &Markers::default());
        assert!(text.starts_with("== message (plain)"));
        assert!(text.contains("\"words\": exact x1"));
        assert!(text.contains("\"absent\": unmatched"));
    }
}
