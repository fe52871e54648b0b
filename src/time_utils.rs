// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps stored in documents.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC3339 with a `Z` suffix, e.g. `2025-04-01T09:30:00Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
