// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use libfuzzer_sys::fuzz_target;
use replytrim::domain::{Segment, TrimAction, flatten_text};
use replytrim::services::trimmer::MarkerTrimmer;

fuzz_target!(|data: &str| {
    let segments = vec![Segment::text(data)];
    if let TrimAction::Rewrite(rewritten) = MarkerTrimmer::process(&segments, data) {
        let text = flatten_text(&rewritten);
        assert!(!MarkerTrimmer::contains_marker(&text));
        assert_eq!(text.trim(), text);
    }
});
