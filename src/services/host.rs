// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use tracing::debug;

use crate::domain::{Message, Segment, TrimAction, flatten_text};
use crate::services::trimmer::MarkerTrimmer;

/// Name under which hosts list this post-processor.
pub const PLUGIN_NAME: &str = "final_reply_trimmer";
pub const PLUGIN_DESCRIPTION: &str =
    "Last line of defense: removes '最终的罗莎回复:' and everything before it from outgoing replies.";
pub const PLUGIN_VERSION: &str = "1.0.0";
/// Decorating-stage priority hint; runs after other result decorators.
pub const DEFAULT_PRIORITY: i32 = 200;

/// A host's view of one outgoing message.
///
/// Hosts differ in where they keep the segment list; implementors hide that
/// behind this trait so the trimming logic never branches on host version.
pub trait OutgoingMessage {
    /// The segment list, or `None` when the host has no result to send.
    fn segments(&self) -> Option<&[Segment]>;

    fn plain_text(&self) -> String {
        self.segments().map(flatten_text).unwrap_or_default()
    }

    fn replace_segments(&mut self, segments: Vec<Segment>);

    fn cancel_delivery(&mut self);
}

/// Run the trimmer against a host message and carry out its decision.
pub fn apply<M: OutgoingMessage + ?Sized>(message: &mut M) -> TrimAction {
    let action = match message.segments() {
        Some(segments) if !segments.is_empty() => {
            MarkerTrimmer::process(segments, &message.plain_text())
        }
        _ => return TrimAction::Pass,
    };

    match &action {
        TrimAction::Pass => {}
        TrimAction::Rewrite(segments) => {
            debug!(segments = segments.len(), "final-reply marker trimmed");
            message.replace_segments(segments.clone());
        }
        TrimAction::Suppress => {
            debug!("final-reply marker left nothing to send, suppressing");
            message.cancel_delivery();
        }
    }

    action
}

impl OutgoingMessage for Message {
    fn segments(&self) -> Option<&[Segment]> {
        Some(&self.segments)
    }

    fn plain_text(&self) -> String {
        Message::plain_text(self)
    }

    fn replace_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    fn cancel_delivery(&mut self) {
        self.cancelled = true;
    }
}
