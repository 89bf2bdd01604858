// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Segment, TrimAction};

/// Literal phrase that introduces the reply meant for the user.
pub const MARKER_PHRASE: &str = "最终的罗莎回复";

/// Marker, an optional ASCII or full-width colon, then any whitespace.
static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)最终的罗莎回复[:：]?\s*").unwrap());

/// Removes the final-reply marker and everything before it from an
/// outgoing message.
///
/// Holds no state of its own; the compiled pattern is process-wide and
/// read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerTrimmer;

impl MarkerTrimmer {
    pub fn contains_marker(text: &str) -> bool {
        MARKER_PATTERN.is_match(text)
    }

    /// Text after the last marker, trimmed. `None` if there is no marker.
    pub fn trim_text(text: &str) -> Option<String> {
        if !Self::contains_marker(text) {
            return None;
        }

        // Only what follows the last occurrence survives.
        let tail = MARKER_PATTERN.split(text).last().unwrap_or_default();
        Some(tail.trim().to_string())
    }

    /// Decide what to do with a message given its segments and its
    /// flattened plain text.
    pub fn process(segments: &[Segment], plain_text: &str) -> TrimAction {
        if segments.is_empty() || plain_text.is_empty() {
            return TrimAction::Pass;
        }

        let Some(clean_text) = Self::trim_text(plain_text) else {
            return TrimAction::Pass;
        };

        let rebuilt = Self::rebuild(segments, clean_text);
        if Self::is_empty_reply(&rebuilt) {
            TrimAction::Suppress
        } else {
            TrimAction::Rewrite(rebuilt)
        }
    }

    /// First text segment becomes `clean_text`, later text segments are
    /// dropped, everything else keeps its position.
    fn rebuild(segments: &[Segment], clean_text: String) -> Vec<Segment> {
        let mut replacement = Some(clean_text);
        let mut rebuilt = Vec::with_capacity(segments.len());

        for segment in segments {
            match segment {
                Segment::Text { .. } => {
                    if let Some(text) = replacement.take() {
                        rebuilt.push(Segment::text(text));
                    }
                }
                Segment::Other(_) => rebuilt.push(segment.clone()),
            }
        }

        rebuilt
    }

    /// A lone empty text segment is as good as no message at all. An empty
    /// text next to an image or mention is still delivered.
    fn is_empty_reply(segments: &[Segment]) -> bool {
        match segments {
            [] => true,
            [Segment::Text { content }] => content.is_empty(),
            _ => false,
        }
    }
}
