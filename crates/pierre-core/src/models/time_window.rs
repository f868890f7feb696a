// ABOUTME: Inclusive time range used to query external sessions and filter history
// ABOUTME: Built as a trailing window of whole days ending at a reference instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Earliest instant inside the window
    pub start: DateTime<Utc>,
    /// Latest instant inside the window
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `days` days before `now`
    ///
    /// A span reaching past the earliest representable instant starts at
    /// `DateTime::<Utc>::MIN_UTC`.
    #[must_use]
    pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Self {
        let start = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: now }
    }

    /// Whether `instant` falls inside the window, bounds included
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether a session spanning `[start, end]` overlaps the window
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }
}
