// ABOUTME: Selects the external session that best matches a completed history record
// ABOUTME: Same-day filter, three-hour proximity window, and a 20% duration tolerance band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Matcher
//!
//! Pairs one history record with at most one external session:
//!
//! 1. Keep sessions whose start or end falls on the record's local calendar day.
//! 2. Drop sessions whose end is more than three hours from the record's date.
//! 3. If the record's duration is known, drop sessions whose duration differs
//!    from it by more than 20%.
//! 4. Pick the session ending closest to the record's date; on ties the first
//!    one in iteration order wins.
//!
//! The duration band keeps a short in-app workout from being overwritten by a
//! long unrelated session that merely happened nearby.

use chrono::Duration;

use super::calendar::LocalCalendar;
use crate::constants::reconciliation::{
    DURATION_TOLERANCE_DENOMINATOR, DURATION_TOLERANCE_NUMERATOR, MAX_MATCH_DELTA_SECS,
};
use crate::models::{ExternalSession, HistoryRecord};

/// Pure matching heuristic between history records and external sessions
#[derive(Debug, Clone, Copy)]
pub struct SessionMatcher {
    calendar: LocalCalendar,
    max_delta: Duration,
}

impl SessionMatcher {
    /// Create a matcher using `calendar` for day boundaries
    #[must_use]
    pub fn new(calendar: LocalCalendar) -> Self {
        Self {
            calendar,
            max_delta: Duration::seconds(MAX_MATCH_DELTA_SECS),
        }
    }

    /// Calendar used for the same-day filter
    #[must_use]
    pub const fn calendar(&self) -> &LocalCalendar {
        &self.calendar
    }

    /// Best external session for `record`, if any survives the filters
    pub fn best_match<'a, I>(
        &self,
        record: &HistoryRecord,
        sessions: I,
    ) -> Option<&'a ExternalSession>
    where
        I: IntoIterator<Item = &'a ExternalSession>,
    {
        sessions
            .into_iter()
            .filter(|session| self.shares_day(record, session))
            .map(|session| ((session.end_time - record.date).abs(), session))
            .filter(|(delta, _)| *delta <= self.max_delta)
            .filter(|(_, session)| {
                record
                    .duration_minutes
                    .is_none_or(|minutes| within_tolerance(session.duration_minutes, minutes))
            })
            .min_by_key(|(delta, _)| *delta)
            .map(|(_, session)| session)
    }

    fn shares_day(&self, record: &HistoryRecord, session: &ExternalSession) -> bool {
        self.calendar.same_day(session.start_time, record.date)
            || self.calendar.same_day(session.end_time, record.date)
    }
}

/// Whether `candidate` lies within the tolerance band around `reference` minutes
fn within_tolerance(candidate: u32, reference: u32) -> bool {
    let difference = u64::from(candidate.abs_diff(reference));
    difference * u64::from(DURATION_TOLERANCE_DENOMINATOR)
        <= u64::from(reference) * u64::from(DURATION_TOLERANCE_NUMERATOR)
}
