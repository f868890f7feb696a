// ABOUTME: Workout session as reported by an external health data source
// ABOUTME: Derives whole-minute durations from the session start and end timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::reconciliation::SECONDS_PER_MINUTE;

/// A workout session recorded by the external health source
///
/// Created and owned by the external source. The sync engine only reads these
/// values and re-fetches them on every operation. Deserializing recomputes
/// `duration_minutes` from the bounds; a stored duration is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionBounds")]
pub struct ExternalSession {
    /// Opaque identifier assigned by the external source
    pub id: String,
    /// When the session started
    pub start_time: DateTime<Utc>,
    /// When the session ended
    pub end_time: DateTime<Utc>,
    /// Session length in whole minutes
    pub duration_minutes: u32,
    /// Energy burned, if the source reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
}

/// Wire shape of a session: only the fields the duration is derived from
#[derive(Deserialize)]
struct SessionBounds {
    id: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    #[serde(default)]
    calories_burned: Option<u32>,
}

impl From<SessionBounds> for ExternalSession {
    fn from(bounds: SessionBounds) -> Self {
        Self::new(
            bounds.id,
            bounds.start_time,
            bounds.end_time,
            bounds.calories_burned,
        )
    }
}

impl ExternalSession {
    /// Create a session, deriving `duration_minutes` from its bounds
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        calories_burned: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            duration_minutes: Self::minutes_between(start_time, end_time),
            calories_burned,
        }
    }

    /// Whole minutes between two instants, rounded to nearest and floored at zero
    #[must_use]
    pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
        let seconds = (end - start).num_seconds().max(0);
        let minutes = (seconds + SECONDS_PER_MINUTE / 2) / SECONDS_PER_MINUTE;
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_duration_rounds_to_nearest_minute() {
        let end = start() + Duration::seconds(44 * 60 + 30);
        let session = ExternalSession::new("a", start(), end, None);
        assert_eq!(session.duration_minutes, 45);

        let end = start() + Duration::seconds(44 * 60 + 29);
        let session = ExternalSession::new("b", start(), end, None);
        assert_eq!(session.duration_minutes, 44);
    }

    #[test]
    fn test_inverted_bounds_floor_at_zero() {
        let end = start() - Duration::minutes(10);
        let session = ExternalSession::new("c", start(), end, Some(50));
        assert_eq!(session.duration_minutes, 0);
    }

    #[test]
    fn test_deserialize_recomputes_duration() {
        let json = r#"{
            "id": "hk-1",
            "start_time": "2025-03-14T07:00:00Z",
            "end_time": "2025-03-14T07:45:00Z",
            "duration_minutes": 999
        }"#;

        let session: ExternalSession = serde_json::from_str(json).unwrap();

        assert_eq!(session.duration_minutes, 45);
        assert_eq!(session.start_time, start());
        assert_eq!(session.calories_burned, None);
    }
}
