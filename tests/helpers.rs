// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use replytrim::domain::Segment;
use serde_json::json;

/// Opaque image segment with a numeric id
#[allow(dead_code)]
pub fn image(id: u64) -> Segment {
    Segment::other("image", [("id".to_string(), json!(id))])
}

/// Opaque at-mention segment
#[allow(dead_code)]
pub fn at(qq: &str) -> Segment {
    Segment::other("at", [("qq".to_string(), json!(qq))])
}

/// Text segments only, in the given order
#[allow(dead_code)]
pub fn texts(parts: &[&str]) -> Vec<Segment> {
    parts.iter().map(|p| Segment::text(*p)).collect()
}
