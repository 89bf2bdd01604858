// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use super::Segment;

/// What should happen to an outgoing message after marker trimming.
#[derive(Debug, Clone, PartialEq)]
pub enum TrimAction {
    /// No marker: deliver the message as it is.
    Pass,
    /// Replace the message's segments with these.
    Rewrite(Vec<Segment>),
    /// Nothing is left after the marker: drop the message.
    Suppress,
}

impl TrimAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Rewrite(_) => "rewrite",
            Self::Suppress => "suppress",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for TrimAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
