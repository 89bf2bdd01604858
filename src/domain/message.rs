// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use super::{Segment, flatten_text};

/// An owned outgoing message, as built by a host for one reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub segments: Vec<Segment>,
    pub cancelled: bool,
}

impl Message {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            cancelled: false,
        }
    }

    pub fn plain_text(&self) -> String {
        flatten_text(&self.segments)
    }
}

impl From<Vec<Segment>> for Message {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}
