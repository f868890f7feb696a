// ABOUTME: Decides whether an external session is already represented in workout history
// ABOUTME: Identity check on external references plus a same-day duration proximity check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

use super::calendar::LocalCalendar;
use crate::constants::reconciliation::DEDUP_DURATION_TOLERANCE_MINUTES;
use crate::models::{ExternalSession, HistoryRecord};

/// Why a session was considered already known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateReason {
    /// Some record already references the session's id
    Identity,
    /// Some record on the same day has a near-identical duration
    Proximity,
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Proximity => write!(f, "proximity"),
        }
    }
}

/// Index of the workouts already present in history
///
/// Built once per import pass. Records imported during the pass are added
/// with [`KnownWorkouts::insert`] so later sessions in the same batch are
/// checked against them too.
#[derive(Debug, Clone)]
pub struct KnownWorkouts {
    calendar: LocalCalendar,
    references: HashSet<String>,
    durations_by_day: HashMap<NaiveDate, Vec<u32>>,
}

impl KnownWorkouts {
    /// Empty index using `calendar` for day boundaries
    #[must_use]
    pub fn new(calendar: LocalCalendar) -> Self {
        Self {
            calendar,
            references: HashSet::new(),
            durations_by_day: HashMap::new(),
        }
    }

    /// Index every record in `records`
    #[must_use]
    pub fn from_records<'a, I>(calendar: LocalCalendar, records: I) -> Self
    where
        I: IntoIterator<Item = &'a HistoryRecord>,
    {
        let mut known = Self::new(calendar);
        for record in records {
            known.insert(record);
        }
        known
    }

    /// Add one record to the index
    pub fn insert(&mut self, record: &HistoryRecord) {
        if let Some(reference) = &record.external_reference {
            self.references.insert(reference.clone());
        }
        if let Some(minutes) = record.duration_minutes {
            self.durations_by_day
                .entry(self.calendar.day_of(record.date))
                .or_default()
                .push(minutes);
        }
    }

    /// Whether some record already references `external_id`
    #[must_use]
    pub fn contains_reference(&self, external_id: &str) -> bool {
        self.references.contains(external_id)
    }

    /// Whether some record shares the session's end day and lies within five
    /// minutes of its duration
    #[must_use]
    pub fn has_proximate(&self, session: &ExternalSession) -> bool {
        self.durations_by_day
            .get(&self.calendar.day_of(session.end_time))
            .is_some_and(|durations| {
                durations.iter().any(|minutes| {
                    minutes.abs_diff(session.duration_minutes) <= DEDUP_DURATION_TOLERANCE_MINUTES
                })
            })
    }

    /// Reason `session` is already represented, or `None` if it is new
    #[must_use]
    pub fn duplicate_reason(&self, session: &ExternalSession) -> Option<DuplicateReason> {
        if self.contains_reference(&session.id) {
            Some(DuplicateReason::Identity)
        } else if self.has_proximate(session) {
            Some(DuplicateReason::Proximity)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 3, 19, 0, 0).unwrap()
    }

    fn session(id: &str, end: DateTime<Utc>, minutes: i64) -> ExternalSession {
        ExternalSession::new(id, end - Duration::minutes(minutes), end, None)
    }

    #[test]
    fn test_identity_wins_regardless_of_day() {
        let record = HistoryRecord::completed(Uuid::new_v4(), "Ride", "Cardio", evening())
            .with_external_reference("hk-9");
        let known = KnownWorkouts::from_records(LocalCalendar::utc(), [&record]);

        let moved = session("hk-9", evening() + Duration::days(3), 90);

        assert_eq!(known.duplicate_reason(&moved), Some(DuplicateReason::Identity));
    }

    #[test]
    fn test_proximity_band_is_five_minutes() {
        let record = HistoryRecord::completed(Uuid::new_v4(), "Ride", "Cardio", evening())
            .with_duration(40);
        let known = KnownWorkouts::from_records(LocalCalendar::utc(), [&record]);

        let end = evening() - Duration::hours(6);
        assert!(known.has_proximate(&session("a", end, 45)));
        assert!(known.has_proximate(&session("b", end, 35)));
        assert!(!known.has_proximate(&session("c", end, 46)));
        assert!(!known.has_proximate(&session("d", evening() + Duration::days(1), 40)));
    }

    #[test]
    fn test_records_without_duration_never_proximate() {
        let record = HistoryRecord::completed(Uuid::new_v4(), "Yoga", "Mobility", evening());
        let known = KnownWorkouts::from_records(LocalCalendar::utc(), [&record]);

        assert_eq!(known.duplicate_reason(&session("e", evening(), 0)), None);
    }

    #[test]
    fn test_insert_extends_index() {
        let mut known = KnownWorkouts::new(LocalCalendar::utc());
        let first = session("f", evening(), 50);
        assert_eq!(known.duplicate_reason(&first), None);

        known.insert(&HistoryRecord::imported_from(&first));

        assert_eq!(known.duplicate_reason(&first), Some(DuplicateReason::Identity));
        let reissued = session("g", evening() + Duration::minutes(2), 52);
        assert_eq!(known.duplicate_reason(&reissued), Some(DuplicateReason::Proximity));
    }
}
