// ABOUTME: Sync configuration types loaded from environment variables
// ABOUTME: Default reconciliation windows and the UTC offset defining local calendar days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::windows::{
    DEFAULT_CLEANUP_WINDOW_DAYS, DEFAULT_ENRICH_WINDOW_DAYS, DEFAULT_IMPORT_WINDOW_DAYS,
    MIN_WINDOW_DAYS,
};
use crate::sync::LocalCalendar;

/// Env var: default window for enrichment, in days
pub const ENV_ENRICH_WINDOW_DAYS: &str = "PIERRE_SYNC_ENRICH_WINDOW_DAYS";
/// Env var: default window for imports, in days
pub const ENV_IMPORT_WINDOW_DAYS: &str = "PIERRE_SYNC_IMPORT_WINDOW_DAYS";
/// Env var: default window for stale reference cleanup, in days
pub const ENV_CLEANUP_WINDOW_DAYS: &str = "PIERRE_SYNC_CLEANUP_WINDOW_DAYS";
/// Env var: local calendar offset in minutes east of UTC
pub const ENV_UTC_OFFSET_MINUTES: &str = "PIERRE_SYNC_UTC_OFFSET_MINUTES";

/// Workout sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Window used by `reconcile_all` for enrichment
    pub enrich_window_days: u32,
    /// Window used by `reconcile_all` for imports
    pub import_window_days: u32,
    /// Window used by `reconcile_all` for stale reference cleanup
    pub cleanup_window_days: u32,
    /// Local calendar offset in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enrich_window_days: DEFAULT_ENRICH_WINDOW_DAYS,
            import_window_days: DEFAULT_IMPORT_WINDOW_DAYS,
            cleanup_window_days: DEFAULT_CLEANUP_WINDOW_DAYS,
            utc_offset_minutes: LocalCalendar::system().offset_minutes(),
        }
    }
}

impl SyncConfig {
    /// Load sync configuration from environment
    ///
    /// Missing or unparseable values fall back to defaults; zero-day windows
    /// are raised to one day.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enrich_window_days: window_from_env(
                ENV_ENRICH_WINDOW_DAYS,
                defaults.enrich_window_days,
            ),
            import_window_days: window_from_env(
                ENV_IMPORT_WINDOW_DAYS,
                defaults.import_window_days,
            ),
            cleanup_window_days: window_from_env(
                ENV_CLEANUP_WINDOW_DAYS,
                defaults.cleanup_window_days,
            ),
            utc_offset_minutes: env::var(ENV_UTC_OFFSET_MINUTES)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.utc_offset_minutes),
        }
    }

    /// Configuration for a fixed UTC offset with default windows
    #[must_use]
    pub fn with_utc_offset_minutes(utc_offset_minutes: i32) -> Self {
        Self {
            utc_offset_minutes,
            ..Self::default()
        }
    }

    /// Calendar defining "same day" for matching and de-duplication
    ///
    /// An offset a day or more from UTC is rejected with a warning and UTC
    /// day boundaries are used instead.
    #[must_use]
    pub fn calendar(&self) -> LocalCalendar {
        LocalCalendar::from_offset_minutes(self.utc_offset_minutes).unwrap_or_else(|e| {
            warn!(
                utc_offset_minutes = self.utc_offset_minutes,
                error = %e,
                "Invalid sync calendar offset, falling back to UTC"
            );
            LocalCalendar::utc()
        })
    }
}

/// Raise a requested window to the one-day minimum
#[must_use]
pub fn coerce_window_days(days: u32) -> u32 {
    days.max(MIN_WINDOW_DAYS)
}

fn window_from_env(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .map_or(default, coerce_window_days)
}
