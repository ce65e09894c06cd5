//! The closed node shape the highlighter understands.
//!
//! Renderers adapt their own node types into [`RenderNode`]; the highlighter rewrites only
//! `Leaf` text and hands back a [`HighlightedNode`] with the same topology.

use crate::Segment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    Leaf { text: String },
    Children { children: Vec<RenderNode> },
    Wrapper { kind: String, child: Box<RenderNode> },
}

impl RenderNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        RenderNode::Leaf { text: text.into() }
    }

    pub fn children(children: Vec<RenderNode>) -> Self {
        RenderNode::Children { children }
    }

    pub fn wrap(kind: impl Into<String>, child: RenderNode) -> Self {
        RenderNode::Wrapper {
            kind: kind.into(),
            child: Box::new(child),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            RenderNode::Leaf { .. } => 1,
            RenderNode::Children { children } => children.iter().map(Self::leaf_count).sum(),
            RenderNode::Wrapper { child, .. } => child.leaf_count(),
        }
    }

    /// Number of non-leaf nodes.
    pub fn structural_count(&self) -> usize {
        match self {
            RenderNode::Leaf { .. } => 0,
            RenderNode::Children { children } => {
                1 + children.iter().map(Self::structural_count).sum::<usize>()
            }
            RenderNode::Wrapper { child, .. } => 1 + child.structural_count(),
        }
    }

    /// Concatenated leaf text, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            RenderNode::Leaf { text } => out.push_str(text),
            RenderNode::Children { children } => children.iter().for_each(|c| c.push_text(out)),
            RenderNode::Wrapper { child, .. } => child.push_text(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum HighlightedNode {
    Leaf { segments: Vec<Segment> },
    Children { children: Vec<HighlightedNode> },
    Wrapper { kind: String, child: Box<HighlightedNode> },
}

impl HighlightedNode {
    pub fn leaf_count(&self) -> usize {
        match self {
            HighlightedNode::Leaf { .. } => 1,
            HighlightedNode::Children { children } => children.iter().map(Self::leaf_count).sum(),
            HighlightedNode::Wrapper { child, .. } => child.leaf_count(),
        }
    }

    pub fn structural_count(&self) -> usize {
        match self {
            HighlightedNode::Leaf { .. } => 0,
            HighlightedNode::Children { children } => {
                1 + children.iter().map(Self::structural_count).sum::<usize>()
            }
            HighlightedNode::Wrapper { child, .. } => 1 + child.structural_count(),
        }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            HighlightedNode::Leaf { segments } => {
                segments.iter().for_each(|s| out.push_str(&s.text))
            }
            HighlightedNode::Children { children } => {
                children.iter().for_each(|c| c.push_text(out))
            }
            HighlightedNode::Wrapper { child, .. } => child.push_text(out),
        }
    }

    /// All highlighted segments, in document order.
    pub fn highlighted_segments(&self) -> Vec<&Segment> {
        let mut out = Vec::new();
        self.collect_highlighted(&mut out);
        out
    }

    fn collect_highlighted<'a>(&'a self, out: &mut Vec<&'a Segment>) {
        match self {
            HighlightedNode::Leaf { segments } => {
                out.extend(segments.iter().filter(|s| s.is_highlighted()))
            }
            HighlightedNode::Children { children } => {
                children.iter().for_each(|c| c.collect_highlighted(out))
            }
            HighlightedNode::Wrapper { child, .. } => child.collect_highlighted(out),
        }
    }

    /// True when `other` has the same node kinds, wrapper kinds, and child counts.
    pub fn same_shape_as(&self, other: &RenderNode) -> bool {
        match (self, other) {
            (HighlightedNode::Leaf { .. }, RenderNode::Leaf { .. }) => true,
            (HighlightedNode::Children { children: a }, RenderNode::Children { children: b }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape_as(y))
            }
            (
                HighlightedNode::Wrapper { kind: ka, child: ca },
                RenderNode::Wrapper { kind: kb, child: cb },
            ) => ka == kb && ca.same_shape_as(cb),
            _ => false,
        }
    }
}
