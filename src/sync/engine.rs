// ABOUTME: Reconciliation engine merging external sessions into workout history
// ABOUTME: Enrich, import and stale-reference cleanup passes over a trailing window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reconciliation Engine
//!
//! Every operation is a single sequential pass: fetch the external sessions
//! and the history records (concurrently, they are independent reads), decide
//! per record, then upsert one record at a time.
//!
//! ## Failure Policy
//!
//! - A failed fetch or history listing aborts the operation and is returned
//!   to the caller; nothing is written.
//! - A failed upsert is logged with the record id and skipped. The batch
//!   continues and the returned count only includes successful writes.
//! - Nothing is retried and nothing is rolled back.
//!
//! ## Serialization
//!
//! Each engine holds an async mutex for the duration of every operation, so
//! concurrent calls on one engine run one after another and cannot both
//! import the same session. Engines sharing a store do not coordinate; keep
//! one engine per account.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::dedup::KnownWorkouts;
use super::logger::{SyncLogger, TracingSyncLogger};
use super::matcher::SessionMatcher;
use crate::aggregation::{AggregationSink, NoopAggregationSink};
use crate::config::sync::coerce_window_days;
use crate::config::SyncConfig;
use crate::errors::AppResult;
use crate::history::HistoryStore;
use crate::models::{ExternalSession, HistoryRecord, TimeWindow};
use crate::providers::ExternalSessionSource;

/// Counts produced by a full reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Stale external references cleared
    pub cleaned: usize,
    /// Existing records enriched with external metrics
    pub enriched: usize,
    /// External-only sessions imported as new records
    pub imported: usize,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Enrich,
    Import,
    Cleanup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrich => write!(f, "enrich"),
            Self::Import => write!(f, "import"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Orchestrates enrichment, import and cleanup against the collaborators
pub struct ReconciliationEngine {
    source: Arc<dyn ExternalSessionSource>,
    store: Arc<dyn HistoryStore>,
    sink: Arc<dyn AggregationSink>,
    logger: Arc<dyn SyncLogger>,
    matcher: SessionMatcher,
    config: SyncConfig,
    run_lock: Mutex<()>,
}

impl ReconciliationEngine {
    /// Create an engine with no aggregation sink and the tracing journal
    #[must_use]
    pub fn new(
        source: Arc<dyn ExternalSessionSource>,
        store: Arc<dyn HistoryStore>,
        config: SyncConfig,
    ) -> Self {
        Self {
            source,
            store,
            sink: Arc::new(NoopAggregationSink),
            logger: Arc::new(TracingSyncLogger),
            matcher: SessionMatcher::new(config.calendar()),
            config,
            run_lock: Mutex::new(()),
        }
    }

    /// Notify `sink` whenever a reconciled workout becomes significant
    #[must_use]
    pub fn with_aggregation_sink(mut self, sink: Arc<dyn AggregationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Send the sync journal to `logger`
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn SyncLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Enrich unmatched completed records from the last `window_days` days
    ///
    /// Returns the number of records updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    pub async fn enrich_existing(&self, window_days: u32) -> AppResult<usize> {
        self.enrich_existing_at(window_days, Utc::now()).await
    }

    /// [`Self::enrich_existing`] with an explicit reference instant
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    #[instrument(skip(self))]
    pub async fn enrich_existing_at(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let _guard = self.run_lock.lock().await;
        self.run_enrich(coerce_window_days(window_days), now).await
    }

    /// Import external sessions from the last `window_days` days that have no
    /// internal counterpart
    ///
    /// Returns the number of records created.
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    pub async fn import_missing(&self, window_days: u32) -> AppResult<usize> {
        self.import_missing_at(window_days, Utc::now()).await
    }

    /// [`Self::import_missing`] with an explicit reference instant
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    #[instrument(skip(self))]
    pub async fn import_missing_at(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let _guard = self.run_lock.lock().await;
        self.run_import(coerce_window_days(window_days), now).await
    }

    /// Clear external references from the last `window_days` days that no
    /// longer resolve in the external source
    ///
    /// Returns the number of references cleared. Records are never removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    pub async fn cleanup_stale(&self, window_days: u32) -> AppResult<usize> {
        self.cleanup_stale_at(window_days, Utc::now()).await
    }

    /// [`Self::cleanup_stale`] with an explicit reference instant
    ///
    /// # Errors
    ///
    /// Returns an error if the external sessions or the history cannot be loaded.
    #[instrument(skip(self))]
    pub async fn cleanup_stale_at(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let _guard = self.run_lock.lock().await;
        self.run_cleanup(coerce_window_days(window_days), now).await
    }

    /// Cleanup, enrich, then import, each over its configured window
    ///
    /// # Errors
    ///
    /// Returns the first load failure; earlier passes stay committed.
    pub async fn reconcile_all(&self) -> AppResult<SyncReport> {
        self.reconcile_all_at(Utc::now()).await
    }

    /// [`Self::reconcile_all`] with an explicit reference instant
    ///
    /// # Errors
    ///
    /// Returns the first load failure; earlier passes stay committed.
    #[instrument(skip(self))]
    pub async fn reconcile_all_at(&self, now: DateTime<Utc>) -> AppResult<SyncReport> {
        let _guard = self.run_lock.lock().await;

        let cleaned = self
            .run_cleanup(coerce_window_days(self.config.cleanup_window_days), now)
            .await?;
        let enriched = self
            .run_enrich(coerce_window_days(self.config.enrich_window_days), now)
            .await?;
        let imported = self
            .run_import(coerce_window_days(self.config.import_window_days), now)
            .await?;

        let report = SyncReport {
            cleaned,
            enriched,
            imported,
        };
        info!(
            source = %self.source.name(),
            cleaned, enriched, imported,
            "Workout sync completed"
        );
        Ok(report)
    }

    async fn run_enrich(&self, window_days: u32, now: DateTime<Utc>) -> AppResult<usize> {
        let window = TimeWindow::trailing_days(now, window_days);
        let (sessions, records) = self.load(Operation::Enrich, &window).await?;

        let mut claimed: HashSet<String> = records
            .iter()
            .filter_map(|record| record.external_reference.clone())
            .collect();
        let candidates: Vec<HistoryRecord> = records
            .into_iter()
            .filter(|record| record.awaits_external_match() && window.contains(record.date))
            .collect();
        let eligible = candidates.len();

        let mut enriched = 0;
        for mut record in candidates {
            let available = sessions
                .iter()
                .filter(|session| !claimed.contains(&session.id));
            let Some(session) = self.matcher.best_match(&record, available) else {
                debug!(record.id = %record.id, "No external session matched");
                continue;
            };

            record.apply_external_match(session);
            if self.persist(Operation::Enrich, &record).await {
                claimed.insert(session.id.clone());
                enriched += 1;
                self.notify_if_significant(&record).await;
            }
        }

        self.logger.log(&format!(
            "Enriched {enriched} of {eligible} unmatched workouts from {}",
            self.source.name()
        ));
        Ok(enriched)
    }

    async fn run_import(&self, window_days: u32, now: DateTime<Utc>) -> AppResult<usize> {
        let window = TimeWindow::trailing_days(now, window_days);
        let (sessions, records) = self.load(Operation::Import, &window).await?;

        let mut known = KnownWorkouts::from_records(*self.matcher.calendar(), &records);
        let mut imported = 0;
        for session in &sessions {
            if let Some(reason) = known.duplicate_reason(session) {
                debug!(external_id = %session.id, %reason, "Session already in history");
                continue;
            }

            let record = HistoryRecord::imported_from(session);
            if self.persist(Operation::Import, &record).await {
                known.insert(&record);
                imported += 1;
                self.notify_if_significant(&record).await;
            }
        }

        self.logger.log(&format!(
            "Imported {imported} of {} sessions from {}",
            sessions.len(),
            self.source.name()
        ));
        Ok(imported)
    }

    async fn run_cleanup(&self, window_days: u32, now: DateTime<Utc>) -> AppResult<usize> {
        let window = TimeWindow::trailing_days(now, window_days);
        let (sessions, records) = self.load(Operation::Cleanup, &window).await?;

        let valid_ids: HashSet<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        let stale: Vec<HistoryRecord> = records
            .into_iter()
            .filter(|record| window.contains(record.date))
            .filter(|record| {
                record
                    .external_reference
                    .as_deref()
                    .is_some_and(|id| !valid_ids.contains(id))
            })
            .collect();

        let mut cleaned = 0;
        for mut record in stale {
            debug!(
                record.id = %record.id,
                external_id = ?record.external_reference,
                "Clearing stale external reference"
            );
            record.clear_external_reference();
            if self.persist(Operation::Cleanup, &record).await {
                cleaned += 1;
            }
        }

        self.logger.log(&format!(
            "Cleared {cleaned} stale references to {}",
            self.source.name()
        ));
        Ok(cleaned)
    }

    async fn load(
        &self,
        operation: Operation,
        window: &TimeWindow,
    ) -> AppResult<(Vec<ExternalSession>, Vec<HistoryRecord>)> {
        let loaded = tokio::try_join!(self.source.fetch_sessions(window), self.store.list_all());

        match &loaded {
            Ok((sessions, records)) => debug!(
                %operation,
                sessions = sessions.len(),
                records = records.len(),
                "Loaded sessions and history"
            ),
            Err(e) => {
                warn!(%operation, error = %e, code = ?e.code, "Sync aborted before any writes");
                self.logger.log(&format!("{operation} aborted: {e}"));
            }
        }
        loaded
    }

    async fn persist(&self, operation: Operation, record: &HistoryRecord) -> bool {
        match self.store.upsert(record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    %operation,
                    record.id = %record.id,
                    external_id = ?record.external_reference,
                    error = %e,
                    "Failed to save reconciled record, continuing"
                );
                let line = match record.external_reference.as_deref() {
                    Some(external_id) => format!(
                        "{operation}: failed to save record {} (external session {external_id}): {e}",
                        record.id
                    ),
                    None => format!("{operation}: failed to save record {}: {e}", record.id),
                };
                self.logger.log(&line);
                false
            }
        }
    }

    async fn notify_if_significant(&self, record: &HistoryRecord) {
        if record.is_significant() {
            self.sink.notify(record).await;
        }
    }
}
