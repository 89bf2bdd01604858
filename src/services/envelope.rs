// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Segment;
use crate::services::host::OutgoingMessage;

/// Keys under which hosts have stored the outgoing segment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentField {
    #[default]
    ResultMessage,
    Chain,
}

impl SegmentField {
    pub const ALL: [Self; 2] = [Self::ResultMessage, Self::Chain];

    pub fn key(self) -> &'static str {
        match self {
            Self::ResultMessage => "result_message",
            Self::Chain => "chain",
        }
    }
}

/// One outgoing message as exchanged with a JSON-speaking host.
///
/// The segment list is read from whichever host key is present and written
/// back under the same key. Every other field is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Envelope {
    pub segments: Option<Vec<Segment>>,
    pub field: SegmentField,
    pub cancelled: bool,
    pub extra: Map<String, Value>,
}

impl Envelope {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments: Some(segments),
            field: SegmentField::default(),
            cancelled: false,
            extra: Map::new(),
        }
    }
}

impl TryFrom<Value> for Envelope {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut extra) = value else {
            return Err("message must be a JSON object".into());
        };

        // The first host key holding a non-null list wins; a null under one
        // name does not hide a populated list under the other.
        let populated = SegmentField::ALL
            .into_iter()
            .find(|f| extra.get(f.key()).is_some_and(|v| !v.is_null()));
        let (field, raw) = match populated {
            Some(field) => (field, extra.remove(field.key()).unwrap_or(Value::Null)),
            None => {
                let field = SegmentField::ALL
                    .into_iter()
                    .find(|f| extra.contains_key(f.key()))
                    .unwrap_or_default();
                extra.remove(field.key());
                (field, Value::Null)
            }
        };

        let segments = match raw {
            Value::Null => None,
            raw => Some(
                serde_json::from_value::<Vec<Segment>>(raw)
                    .map_err(|e| format!("invalid `{}`: {e}", field.key()))?,
            ),
        };

        let cancelled = match extra.remove("cancelled") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => b,
            Some(other) => return Err(format!("`cancelled` must be a boolean, got {other}")),
        };

        Ok(Self {
            segments,
            field,
            cancelled,
            extra,
        })
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        let mut map = envelope.extra;
        if let Some(segments) = envelope.segments {
            let list = segments.into_iter().map(Value::from).collect();
            map.insert(envelope.field.key().into(), Value::Array(list));
        }
        if envelope.cancelled {
            map.insert("cancelled".into(), Value::Bool(true));
        }
        Value::Object(map)
    }
}

impl OutgoingMessage for Envelope {
    fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }

    fn replace_segments(&mut self, segments: Vec<Segment>) {
        self.segments = Some(segments);
    }

    fn cancel_delivery(&mut self) {
        self.cancelled = true;
    }
}
