//! Markdown (+ math) to [`RenderNode`] adapter.
//!
//! Every container becomes `Wrapper { kind, child: Children[..] }`; text becomes leaves.
//! Consecutive text events inside one container are joined into a single leaf so terms are not
//! split at parser-internal boundaries.

use pulldown_cmark::{Event, Options, Parser, Tag};
use spanlight_core::RenderNode;

fn tag_kind(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "paragraph",
        Tag::Heading { .. } => "heading",
        Tag::BlockQuote(..) => "blockquote",
        Tag::CodeBlock(_) => "code_block",
        Tag::List(Some(_)) => "ordered_list",
        Tag::List(None) => "list",
        Tag::Item => "list_item",
        Tag::Emphasis => "emphasis",
        Tag::Strong => "strong",
        Tag::Strikethrough => "strikethrough",
        Tag::Link { .. } => "link",
        Tag::Image { .. } => "image",
        Tag::Table(_) => "table",
        Tag::TableHead => "table_head",
        Tag::TableRow => "table_row",
        Tag::TableCell => "table_cell",
        Tag::FootnoteDefinition(_) => "footnote",
        _ => "block",
    }
}

struct Frame {
    kind: &'static str,
    children: Vec<RenderNode>,
}

impl Frame {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(RenderNode::Leaf { text: last }) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(RenderNode::leaf(text));
        }
    }

    fn push_atom(&mut self, kind: &str, text: Option<&str>) {
        let child = match text {
            Some(t) => RenderNode::leaf(t),
            None => RenderNode::children(Vec::new()),
        };
        self.children.push(RenderNode::wrap(kind, child));
    }

    fn into_node(self) -> RenderNode {
        RenderNode::wrap(self.kind, RenderNode::children(self.children))
    }
}

/// Parse markdown into a render tree. The root is a `Children` node of top-level blocks.
pub fn markdown_to_tree(src: &str) -> RenderNode {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);

    let mut stack: Vec<Frame> = vec![Frame::new("document")];
    for event in Parser::new_ext(src, options) {
        match event {
            Event::Start(tag) => stack.push(Frame::new(tag_kind(&tag))),
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(frame) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(frame.into_node());
                        }
                    }
                }
            }
            other => {
                let Some(top) = stack.last_mut() else {
                    continue;
                };
                match other {
                    Event::Text(t) => top.push_text(&t),
                    Event::Code(t) => top.push_atom("code", Some(&t)),
                    Event::InlineMath(t) => top.push_atom("math", Some(&t)),
                    Event::DisplayMath(t) => top.push_atom("display_math", Some(&t)),
                    Event::Html(t) | Event::InlineHtml(t) => top.push_atom("html", Some(&t)),
                    Event::FootnoteReference(t) => top.push_atom("footnote_ref", Some(&t)),
                    Event::SoftBreak => top.push_text("\n"),
                    Event::HardBreak => top.push_atom("hard_break", None),
                    Event::Rule => top.push_atom("rule", None),
                    Event::TaskListMarker(done) => {
                        top.push_atom(if done { "task_done" } else { "task_open" }, None)
                    }
                    Event::Start(_) | Event::End(_) => {}
                }
            }
        }
    }

    // Unbalanced input: close whatever is still open.
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(frame.into_node());
            }
        }
    }
    let root = stack.pop().map(|f| f.children).unwrap_or_default();
    RenderNode::children(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(node: &RenderNode, out: &mut Vec<String>) {
        match node {
            RenderNode::Leaf { .. } => {}
            RenderNode::Children { children } => children.iter().for_each(|c| kinds(c, out)),
            RenderNode::Wrapper { kind, child } => {
                out.push(kind.clone());
                kinds(child, out);
            }
        }
    }

    fn all_kinds(node: &RenderNode) -> Vec<String> {
        let mut out = Vec::new();
        kinds(node, &mut out);
        out
    }

    #[test]
    fn paragraph_with_emphasis() {
        let t = markdown_to_tree("Hello *big* world");
        assert_eq!(all_kinds(&t), vec!["paragraph", "emphasis"]);
        assert_eq!(t.text(), "Hello big world");
        assert_eq!(t.leaf_count(), 3);
    }

    #[test]
    fn list_items_nest_paragraph_content() {
        let t = markdown_to_tree("- first **item**\n- second\n");
        let k = all_kinds(&t);
        assert_eq!(k[0], "list");
        assert_eq!(k.iter().filter(|k| *k == "list_item").count(), 2);
        assert!(k.contains(&"strong".to_string()));
        assert!(t.text().contains("second"));
    }

    #[test]
    fn inline_code_and_math_are_wrapped_leaves() {
        let t = markdown_to_tree("run `cargo test` and $$x^2$$");
        let k = all_kinds(&t);
        assert!(k.contains(&"code".to_string()));
        assert!(k.contains(&"display_math".to_string()));
        assert!(t.text().contains("cargo test"));
        assert!(t.text().contains("x^2"));
    }

    #[test]
    fn soft_breaks_stay_inside_the_text_run() {
        let t = markdown_to_tree("line one\nline two");
        assert_eq!(all_kinds(&t), vec!["paragraph"]);
        assert_eq!(t.text(), "line one\nline two");
        assert_eq!(t.leaf_count(), 1);
    }

    #[test]
    fn hard_breaks_remain_structural() {
        let t = markdown_to_tree("line one  \nline two");
        assert!(all_kinds(&t).contains(&"hard_break".to_string()));
        assert_eq!(t.text(), "line oneline two");
    }

    #[test]
    fn empty_input_is_empty_children() {
        let t = markdown_to_tree("");
        assert_eq!(t, RenderNode::children(Vec::new()));
    }
}
