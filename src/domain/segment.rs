// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Segment `type` values the host uses for plain text.
const TEXT_KINDS: &[&str] = &["text", "plain"];

/// One typed unit of an outgoing chat message.
///
/// Only text is interpreted. Everything else (images, mentions, replies,
/// faces, ...) is carried as its raw JSON object and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Segment {
    Text { content: String },
    Other(Map<String, Value>),
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Build an opaque segment of the given kind with extra fields.
    pub fn other(kind: &str, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(kind.into()));
        map.extend(fields);
        Self::Other(map)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Other(_) => None,
        }
    }

    /// The segment's `type` tag, or `"unknown"` for untagged opaque segments.
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Other(map) => map.get("type").and_then(Value::as_str).unwrap_or("unknown"),
        }
    }
}

impl TryFrom<Value> for Segment {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(format!("segment must be a JSON object, got {other}")),
        };

        let is_text = map
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| TEXT_KINDS.contains(&kind.to_ascii_lowercase().as_str()));
        if !is_text {
            return Ok(Self::Other(map));
        }

        match map.get("text") {
            Some(Value::String(content)) => Ok(Self::text(content.clone())),
            Some(other) => Err(format!("text segment has non-string `text`: {other}")),
            None => Err("text segment is missing `text`".into()),
        }
    }
}

impl From<Segment> for Value {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Text { content } => {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("text".into()));
                map.insert("text".into(), Value::String(content));
                Value::Object(map)
            }
            Segment::Other(map) => Value::Object(map),
        }
    }
}

/// Concatenate the contents of all text segments, in order.
pub fn flatten_text(segments: &[Segment]) -> String {
    segments.iter().filter_map(Segment::as_text).collect()
}
