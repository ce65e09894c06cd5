use serde::{Deserialize, Serialize};

pub mod content;
pub mod tree;

pub use content::{decode_records, MessageRecord, RawContent, StructuredContent, ToolCall};
pub use tree::{HighlightedNode, RenderNode};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A matched span in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRange {
    /// Character offset (inclusive).
    pub start: usize,
    /// Character offset (exclusive).
    pub end: usize,
    /// Index of the term that produced this span. After merging, the lowest contributing index.
    pub term_index: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize, term_index: usize) -> Self {
        Self {
            start,
            end,
            term_index,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Plain,
    Highlighted,
}

/// One contiguous slice of a rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    /// Character offset into the text the segment was cut from.
    pub start_char: usize,
    /// Character offset into the text the segment was cut from.
    pub end_char: usize,
    /// Set for highlighted segments only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_index: Option<usize>,
}

impl Segment {
    pub fn plain(text: impl Into<String>, start_char: usize, end_char: usize) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.into(),
            start_char,
            end_char,
            term_index: None,
        }
    }

    pub fn highlighted(text: impl Into<String>, range: MatchRange) -> Self {
        Self {
            kind: SegmentKind::Highlighted,
            text: text.into(),
            start_char: range.start,
            end_char: range.end,
            term_index: Some(range.term_index),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.kind == SegmentKind::Highlighted
    }

    /// Stable rendering key. Re-rendering the same input yields the same keys.
    pub fn key(&self) -> String {
        match self.term_index {
            Some(t) => format!("hl-{}-{}-{}", self.start_char, self.end_char, t),
            None => format!("plain-{}-{}", self.start_char, self.end_char),
        }
    }
}

/// Rendering mode picked for a block of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Json,
    Markup,
    Plain,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Json => "json",
            ContentKind::Markup => "markup",
            ContentKind::Plain => "plain",
        }
    }
}
