// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use libfuzzer_sys::fuzz_target;
use replytrim::services::envelope::Envelope;
use replytrim::services::host;

fuzz_target!(|data: &str| {
    if let Ok(mut envelope) = serde_json::from_str::<Envelope>(data) {
        host::apply(&mut envelope);
        let _ = serde_json::to_string(&envelope);
    }
});
