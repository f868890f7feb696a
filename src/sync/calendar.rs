// ABOUTME: Local calendar used to decide whether two instants share a day
// ABOUTME: Wraps a fixed UTC offset so day boundaries are deterministic per sync run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::errors::{AppError, AppResult};

const SECONDS_PER_MINUTE: i32 = 60;

/// Calendar with day boundaries at local midnight for a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    offset: FixedOffset,
}

impl LocalCalendar {
    /// Calendar for an explicit offset
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar whose days start at UTC midnight
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Calendar for the host's current local offset
    #[must_use]
    pub fn system() -> Self {
        Self::new(Local::now().offset().fix())
    }

    /// Calendar for an offset expressed in minutes east of UTC
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the offset is a day or more away from UTC.
    pub fn from_offset_minutes(minutes: i32) -> AppResult<Self> {
        minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| {
                AppError::config(format!("UTC offset of {minutes} minutes is out of range"))
            })
    }

    /// Offset in minutes east of UTC
    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / SECONDS_PER_MINUTE
    }

    /// Calendar date of `instant` in this calendar
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Whether both instants fall on the same calendar day
    #[must_use]
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }
}

impl Default for LocalCalendar {
    fn default() -> Self {
        Self::system()
    }
}
