// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod envelope;
pub mod filter;
pub mod host;
pub mod trimmer;
