// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod action;
mod message;
mod segment;

pub use action::*;
pub use message::*;
pub use segment::*;
