//! Message content as received from a conversation record.
//!
//! Content arrives loosely shaped: a bare string, an object carrying `text`/`body`/`toolCalls`,
//! or anything else. It is decoded into [`RawContent`] once, at the boundary, and the text the
//! matchers run against is chosen by [`RawContent::extract_text`].

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuredContent {
    pub text: Option<String>,
    pub body: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    /// The whole object, kept for the serialized fallback.
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    PlainText(String),
    Structured(StructuredContent),
    Opaque(Value),
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tool_calls_from(v: Option<&Value>) -> Vec<ToolCall> {
    let Some(Value::Array(items)) = v else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<ToolCall>(item.clone()) {
            Ok(tc) => Some(tc),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed tool call");
                None
            }
        })
        .collect()
}

impl RawContent {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => RawContent::PlainText(s),
            Value::Object(ref map)
                if map.contains_key("text")
                    || map.contains_key("body")
                    || map.contains_key("toolCalls")
                    || map.contains_key("tool_calls") =>
            {
                let text = non_empty_str(map.get("text"));
                let body = non_empty_str(map.get("body"));
                let tool_calls = tool_calls_from(map.get("toolCalls").or(map.get("tool_calls")));
                RawContent::Structured(StructuredContent {
                    text,
                    body,
                    tool_calls,
                    raw: value,
                })
            }
            other => RawContent::Opaque(other),
        }
    }

    /// The single representative text for this content.
    ///
    /// Priority: `text`, then `body`, then the serialized value.
    pub fn extract_text(&self) -> Cow<'_, str> {
        match self {
            RawContent::PlainText(s) => Cow::Borrowed(s.as_str()),
            RawContent::Structured(sc) => {
                if let Some(t) = &sc.text {
                    Cow::Borrowed(t.as_str())
                } else if let Some(b) = &sc.body {
                    Cow::Borrowed(b.as_str())
                } else {
                    tracing::debug!("structured content has no text/body; serializing");
                    Cow::Owned(sc.raw.to_string())
                }
            }
            RawContent::Opaque(v) => Cow::Owned(v.to_string()),
        }
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            RawContent::Structured(sc) => &sc.tool_calls,
            _ => &[],
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RawContent::PlainText(s) => Value::String(s.clone()),
            RawContent::Structured(sc) => sc.raw.clone(),
            RawContent::Opaque(v) => v.clone(),
        }
    }
}

impl From<&str> for RawContent {
    fn from(s: &str) -> Self {
        RawContent::PlainText(s.to_string())
    }
}

impl From<String> for RawContent {
    fn from(s: String) -> Self {
        RawContent::PlainText(s)
    }
}

impl From<Value> for RawContent {
    fn from(v: Value) -> Self {
        RawContent::from_value(v)
    }
}

impl Serialize for RawContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawContent::from_value)
    }
}

/// One turn of a conversation plus the evidence terms to overlay on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: RawContent,
    #[serde(default, alias = "terms", alias = "highlights")]
    pub evidence: Vec<String>,
}

/// Decode records from a JSON array, a single JSON object, or JSONL.
pub fn decode_records(input: &str) -> Result<Vec<MessageRecord>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    if let Ok(one) = serde_json::from_str::<MessageRecord>(trimmed) {
        return Ok(vec![one]);
    }
    let mut out = Vec::new();
    for (n, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let rec = serde_json::from_str::<MessageRecord>(line)
            .map_err(|e| Error::InvalidRecord(format!("line {}: {e}", n + 1)))?;
        out.push(rec);
    }
    Ok(out)
}
