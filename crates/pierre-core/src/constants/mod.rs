// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Matching thresholds, placeholder identifiers and default windows for workout sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! This module organizes application constants by domain for better maintainability.

use uuid::Uuid;

/// Matching and de-duplication thresholds
pub mod reconciliation {
    /// Maximum distance between an external session's end and a history record's date
    pub const MAX_MATCH_DELTA_SECS: i64 = 3 * 60 * 60;

    /// Duration tolerance band for matching, as a fraction of the record's duration (20%)
    ///
    /// Expressed as numerator/denominator so the comparison stays in integer minutes.
    pub const DURATION_TOLERANCE_NUMERATOR: u32 = 1;
    /// Denominator of the duration tolerance band
    pub const DURATION_TOLERANCE_DENOMINATOR: u32 = 5;

    /// Two sessions on the same day within this many minutes are the same workout
    pub const DEDUP_DURATION_TOLERANCE_MINUTES: u32 = 5;

    /// Minimum duration for a workout to count towards streaks and challenges
    pub const SIGNIFICANT_WORKOUT_MINUTES: u32 = 30;

    /// Seconds per minute, used to derive session durations
    pub const SECONDS_PER_MINUTE: i64 = 60;
}

/// Default reconciliation windows in days
pub mod windows {
    /// Default window for enriching existing records
    pub const DEFAULT_ENRICH_WINDOW_DAYS: u32 = 30;
    /// Default window for importing external-only sessions
    pub const DEFAULT_IMPORT_WINDOW_DAYS: u32 = 7;
    /// Default window for clearing stale external references
    pub const DEFAULT_CLEANUP_WINDOW_DAYS: u32 = 30;
    /// Smallest window any operation will use
    pub const MIN_WINDOW_DAYS: u32 = 1;
}

/// Placeholder values carried by sessions imported from the external source
pub mod imported_workout {
    use super::Uuid;

    /// Plan identifier shared by every imported session
    ///
    /// Fixed so all plan-less imports can be queried as one group.
    pub const PLAN_ID: Uuid = Uuid::from_u128(0x8f3c_2a1e_6b4d_4f0a_9e7c_1d2b_3a4c_5e6f);

    /// Display title for imported sessions
    pub const TITLE: &str = "Imported Workout";

    /// Focus category for imported sessions
    pub const FOCUS_CATEGORY: &str = "General";
}

/// Service names used in structured logs
pub mod service_names {
    /// Workout sync service
    pub const PIERRE_WORKOUT_SYNC: &str = "pierre-workout-sync";
}
