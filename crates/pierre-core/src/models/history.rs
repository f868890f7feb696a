// ABOUTME: Workout history record owned by the history store
// ABOUTME: Status and provenance tags plus helpers for enrichment, import and cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExternalSession;
use crate::constants::{imported_workout, reconciliation::SIGNIFICANT_WORKOUT_MINUTES};

/// Outcome of a planned workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    /// The workout was performed
    Completed,
    /// The workout was skipped
    Skipped,
}

/// Where a history record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Recorded by in-app workout completion
    App,
    /// Created from an external session with no in-app counterpart
    Imported,
}

/// The application's durable record of a single workout occurrence
///
/// Only `completed` records take part in matching. A non-`None`
/// `external_reference` points at the `ExternalSession::id` this record was
/// paired with; at most one record may carry a given reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique identifier, immutable after creation
    pub id: Uuid,
    /// Canonical timestamp of the workout
    pub date: DateTime<Utc>,
    /// Workout definition the session followed
    pub plan_id: Uuid,
    /// Display title
    pub title: String,
    /// Display focus category
    pub focus_category: String,
    /// Completed or skipped
    pub status: WorkoutStatus,
    /// Length in whole minutes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Energy burned, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    /// Identifier of the matched external session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    /// Provenance tag
    pub source: RecordSource,
}

impl HistoryRecord {
    /// Create a completed in-app record
    #[must_use]
    pub fn completed(
        plan_id: Uuid,
        title: impl Into<String>,
        focus_category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            plan_id,
            title: title.into(),
            focus_category: focus_category.into(),
            status: WorkoutStatus::Completed,
            duration_minutes: None,
            calories_burned: None,
            external_reference: None,
            source: RecordSource::App,
        }
    }

    /// Create a skipped in-app record
    #[must_use]
    pub fn skipped(
        plan_id: Uuid,
        title: impl Into<String>,
        focus_category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            status: WorkoutStatus::Skipped,
            ..Self::completed(plan_id, title, focus_category, date)
        }
    }

    /// Create the record representing an external-only session
    ///
    /// Imported records always carry the shared placeholder plan, title and
    /// focus category, and are dated at the session's end.
    #[must_use]
    pub fn imported_from(session: &ExternalSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: session.end_time,
            plan_id: imported_workout::PLAN_ID,
            title: imported_workout::TITLE.to_owned(),
            focus_category: imported_workout::FOCUS_CATEGORY.to_owned(),
            status: WorkoutStatus::Completed,
            duration_minutes: Some(session.duration_minutes),
            calories_burned: session.calories_burned,
            external_reference: Some(session.id.clone()),
            source: RecordSource::Imported,
        }
    }

    /// Set the known duration
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set the known calories
    #[must_use]
    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories_burned = Some(calories);
        self
    }

    /// Set the external reference
    #[must_use]
    pub fn with_external_reference(mut self, external_id: impl Into<String>) -> Self {
        self.external_reference = Some(external_id.into());
        self
    }

    /// Whether the workout was performed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == WorkoutStatus::Completed
    }

    /// Whether this record was created from an external session
    #[must_use]
    pub fn is_imported(&self) -> bool {
        self.source == RecordSource::Imported
    }

    /// Whether the record counts towards streak and challenge aggregation
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.duration_minutes
            .is_some_and(|minutes| minutes >= SIGNIFICANT_WORKOUT_MINUTES)
    }

    /// Whether a completed record is still waiting for an external match
    #[must_use]
    pub fn awaits_external_match(&self) -> bool {
        self.is_completed() && self.external_reference.is_none()
    }

    /// Copy metrics from a matched external session and link to it
    ///
    /// Duration and the external reference are always overwritten. Calories
    /// are overwritten only when the session reports them: a session without
    /// calories leaves the locally recorded value in place rather than
    /// clearing it.
    pub fn apply_external_match(&mut self, session: &ExternalSession) {
        self.duration_minutes = Some(session.duration_minutes);
        self.calories_burned = session.calories_burned.or(self.calories_burned);
        self.external_reference = Some(session.id.clone());
    }

    /// Drop the link to an external session, leaving every other field intact
    pub fn clear_external_reference(&mut self) {
        self.external_reference = None;
    }
}
