//! Message rendering: extract text, classify it, build the renderer's representation, then
//! overlay evidence terms.

use crate::classify::classify;
use crate::config::HighlightConfig;
use crate::highlight::{highlight_text, HighlightOutcome, TermReport};
use crate::markup::markdown_to_tree;
use crate::tree::apply_to_tree_with_report;
use serde::Serialize;
use spanlight_core::{
    ContentKind, HighlightedNode, MessageRecord, RawContent, RenderNode, Result, Segment,
    ToolCall,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RenderedBody {
    Flat { segments: Vec<Segment> },
    Tree { root: HighlightedNode },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content_kind: ContentKind,
    pub body: RenderedBody,
    pub terms: Vec<TermReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

/// Pretty-print JSON-looking text; keep it verbatim if it does not parse.
pub fn pretty_json(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(v) => serde_json::to_string_pretty(&v).unwrap_or_else(|_| text.to_string()),
        Err(e) => {
            tracing::debug!(error = %e, "bracket-wrapped content is not valid json; rendering verbatim");
            text.to_string()
        }
    }
}

/// A highlighting configuration bound to the operations that use it.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn highlight<S: AsRef<str>>(&self, text: &str, terms: &[S]) -> HighlightOutcome {
        highlight_text(text, terms, &self.config)
    }

    pub fn highlight_tree<S: AsRef<str>>(
        &self,
        node: RenderNode,
        terms: &[S],
    ) -> (HighlightedNode, Vec<TermReport>) {
        apply_to_tree_with_report(node, terms, &self.config)
    }

    pub fn render_content<S: AsRef<str>>(
        &self,
        content: &RawContent,
        terms: &[S],
    ) -> RenderedMessage {
        let text = content.extract_text();
        let kind = classify(&text);
        let (body, terms) = match kind {
            ContentKind::Json => {
                let pretty = pretty_json(&text);
                let o = self.highlight(&pretty, terms);
                (RenderedBody::Flat { segments: o.segments }, o.terms)
            }
            ContentKind::Markup => {
                let (root, reports) = self.highlight_tree(markdown_to_tree(&text), terms);
                (RenderedBody::Tree { root }, reports)
            }
            ContentKind::Plain => {
                let o = self.highlight(&text, terms);
                (RenderedBody::Flat { segments: o.segments }, o.terms)
            }
        };
        RenderedMessage {
            role: None,
            content_kind: kind,
            body,
            terms,
            tool_calls: content.tool_calls().to_vec(),
        }
    }

    pub fn render_message(&self, record: &MessageRecord) -> RenderedMessage {
        let mut out = self.render_content(&record.content, &record.evidence);
        out.role = record.role.clone();
        out
    }
}
