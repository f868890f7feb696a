// ABOUTME: Synthetic external session source for development and testing
// ABOUTME: Serves injected sessions from memory with a switch to simulate outages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to AppError::internal
// for proper error propagation through the application

//! # Synthetic Session Source
//!
//! Stands in for a real health integration:
//!
//! - Requires no authorization
//! - Supports dynamic session injection and removal, so tests can simulate
//!   the external source re-issuing or deleting sessions between syncs
//! - Can be switched into an unavailable state to exercise error paths
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock` for thread-safe concurrent operations.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use super::core::ExternalSessionSource;
use crate::errors::{AppError, AppResult};
use crate::models::{ExternalSession, TimeWindow};

const DEFAULT_SOURCE_NAME: &str = "synthetic";

/// In-memory external session source
///
/// # Examples
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use pierre_workout_sync::models::ExternalSession;
/// use pierre_workout_sync::providers::SyntheticSessionSource;
///
/// let end = Utc::now();
/// let source = SyntheticSessionSource::with_sessions(vec![ExternalSession::new(
///     "hk-1",
///     end - Duration::minutes(45),
///     end,
///     Some(320),
/// )]);
/// assert_eq!(source.session_count().unwrap(), 1);
/// ```
pub struct SyntheticSessionSource {
    sessions: Arc<RwLock<Vec<ExternalSession>>>,
    unavailable: AtomicBool,
    fetch_count: AtomicUsize,
    name: String,
}

impl SyntheticSessionSource {
    /// Create a source serving the given sessions
    #[must_use]
    pub fn with_sessions(sessions: Vec<ExternalSession>) -> Self {
        Self::with_sessions_and_name(sessions, DEFAULT_SOURCE_NAME)
    }

    /// Create a source with a custom name (shown in logs and errors)
    #[must_use]
    pub fn with_sessions_and_name(sessions: Vec<ExternalSession>, name: impl Into<String>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(sessions)),
            unavailable: AtomicBool::new(false),
            fetch_count: AtomicUsize::new(0),
            name: name.into(),
        }
    }

    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::with_sessions(Vec::new())
    }

    fn poisoned(&self) -> AppError {
        AppError::internal(format!("RwLock poisoned: {} sessions lock", self.name))
    }

    /// Add a session
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session lock is poisoned.
    pub fn add_session(&self, session: ExternalSession) -> AppResult<()> {
        self.sessions
            .write()
            .map_err(|_| self.poisoned())?
            .push(session);
        Ok(())
    }

    /// Remove the session with the given id, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session lock is poisoned.
    pub fn remove_session(&self, id: &str) -> AppResult<bool> {
        let mut sessions = self.sessions.write().map_err(|_| self.poisoned())?;
        let before = sessions.len();
        sessions.retain(|session| session.id != id);
        Ok(sessions.len() != before)
    }

    /// Replace all sessions
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session lock is poisoned.
    pub fn set_sessions(&self, sessions: Vec<ExternalSession>) -> AppResult<()> {
        *self.sessions.write().map_err(|_| self.poisoned())? = sessions;
        Ok(())
    }

    /// Number of sessions currently held
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session lock is poisoned.
    pub fn session_count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().map_err(|_| self.poisoned())?.len())
    }

    /// Simulate the source going offline (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for SyntheticSessionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExternalSessionSource for SyntheticSessionSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_sessions(&self, window: &TimeWindow) -> AppResult<Vec<ExternalSession>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable(
                &self.name,
                "health data source is not reachable",
            ));
        }

        let matching: Vec<ExternalSession> = self
            .sessions
            .read()
            .map_err(|_| self.poisoned())?
            .iter()
            .filter(|session| window.overlaps(session.start_time, session.end_time))
            .cloned()
            .collect();

        debug!(
            source = %self.name,
            window.start = %window.start,
            window.end = %window.end,
            sessions = matching.len(),
            "Served synthetic sessions"
        );

        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_fetch_filters_by_window() {
        let now = Utc.with_ymd_and_hms(2025, 4, 20, 12, 0, 0).unwrap();
        let recent = ExternalSession::new(
            "recent",
            now - Duration::hours(2),
            now - Duration::hours(1),
            None,
        );
        let old = ExternalSession::new(
            "old",
            now - Duration::days(10),
            now - Duration::days(10) + Duration::minutes(30),
            None,
        );
        let source = SyntheticSessionSource::with_sessions(vec![recent, old]);

        let sessions = source
            .fetch_sessions(&TimeWindow::trailing_days(now, 7))
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "recent");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_source_fails_fetch() {
        let source = SyntheticSessionSource::with_sessions_and_name(Vec::new(), "healthkit");
        source.set_unavailable(true);

        let error = source
            .fetch_sessions(&TimeWindow::trailing_days(Utc::now(), 1))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
        assert!(error.message.contains("healthkit"));
    }

    #[test]
    fn test_remove_session() {
        let now = Utc::now();
        let source = SyntheticSessionSource::with_sessions(vec![ExternalSession::new(
            "a",
            now - Duration::minutes(20),
            now,
            None,
        )]);

        assert!(source.remove_session("a").unwrap());
        assert!(!source.remove_session("a").unwrap());
        assert_eq!(source.session_count().unwrap(), 0);
    }
}
