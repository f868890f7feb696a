// ABOUTME: Shared test utilities and fixtures for workout sync integration tests
// ABOUTME: Provides logging setup, record and session builders, and instrumented collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_workout_sync`
//!
//! This module provides common fixtures and collaborator doubles to reduce
//! duplication across integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_workout_sync::{
    aggregation::AggregationSink,
    config::SyncConfig,
    errors::{AppError, AppResult},
    history::{HistoryStore, InMemoryHistoryStore},
    models::{ExternalSession, HistoryRecord},
    providers::SyntheticSessionSource,
    sync::{ReconciliationEngine, SyncLogger},
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Reference instant shared by the engine tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 20, 0, 0).unwrap()
}

/// Noon UTC, `days` days before [`fixed_now`]
pub fn noon_days_ago(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap() - Duration::days(days)
}

/// Config with UTC day boundaries so tests do not depend on the host zone
pub fn test_config() -> SyncConfig {
    SyncConfig::with_utc_offset_minutes(0)
}

/// Completed in-app workout at `date`
pub fn completed_record(date: DateTime<Utc>) -> HistoryRecord {
    HistoryRecord::completed(Uuid::new_v4(), "Full Body Strength", "Strength", date)
}

/// External session ending at `end` lasting `minutes`
pub fn session(id: &str, end: DateTime<Utc>, minutes: i64) -> ExternalSession {
    ExternalSession::new(id, end - Duration::minutes(minutes), end, None)
}

/// External session with calories
pub fn session_with_calories(
    id: &str,
    end: DateTime<Utc>,
    minutes: i64,
    calories: u32,
) -> ExternalSession {
    ExternalSession::new(id, end - Duration::minutes(minutes), end, Some(calories))
}

/// Aggregation sink remembering every notified record
#[derive(Default)]
pub struct RecordingAggregationSink {
    records: Mutex<Vec<HistoryRecord>>,
}

impl RecordingAggregationSink {
    pub fn notified(&self) -> Vec<HistoryRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl AggregationSink for RecordingAggregationSink {
    async fn notify(&self, record: &HistoryRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Sync logger capturing journal lines
#[derive(Default)]
pub struct CapturingSyncLogger {
    lines: Mutex<Vec<String>>,
}

impl CapturingSyncLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl SyncLogger for CapturingSyncLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_owned());
    }
}

/// In-memory store that can be told to fail listings or specific upserts
///
/// Upserts fail when the record id was registered with `fail_upserts_for`, or
/// when its external reference was registered with `fail_upserts_referencing`.
#[derive(Default)]
pub struct FailingHistoryStore {
    inner: InMemoryHistoryStore,
    failing_ids: Mutex<HashSet<Uuid>>,
    failing_references: Mutex<HashSet<String>>,
    fail_listing: AtomicBool,
}

impl FailingHistoryStore {
    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            inner: InMemoryHistoryStore::with_records(records),
            ..Self::default()
        }
    }

    pub fn fail_upserts_for(&self, id: Uuid) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    pub fn fail_upserts_referencing(&self, external_id: &str) {
        self.failing_references
            .lock()
            .unwrap()
            .insert(external_id.to_owned());
    }

    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub async fn get(&self, id: Uuid) -> Option<HistoryRecord> {
        self.inner.get(id).await
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl HistoryStore for FailingHistoryStore {
    async fn list_all(&self) -> AppResult<Vec<HistoryRecord>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(AppError::storage("history listing unavailable"));
        }
        self.inner.list_all().await
    }

    async fn upsert(&self, record: &HistoryRecord) -> AppResult<()> {
        let should_fail = self.failing_ids.lock().unwrap().contains(&record.id)
            || record
                .external_reference
                .as_ref()
                .is_some_and(|id| self.failing_references.lock().unwrap().contains(id));
        if should_fail {
            return Err(AppError::storage("simulated write failure")
                .with_resource_id(record.id.to_string()));
        }
        self.inner.upsert(record).await
    }
}

/// Engine under test with handles to every collaborator
pub struct SyncHarness {
    pub engine: Arc<ReconciliationEngine>,
    pub source: Arc<SyntheticSessionSource>,
    pub store: Arc<FailingHistoryStore>,
    pub sink: Arc<RecordingAggregationSink>,
    pub logger: Arc<CapturingSyncLogger>,
}

/// Build an engine over `records` and `sessions` with recording collaborators
pub fn create_sync_harness(
    records: Vec<HistoryRecord>,
    sessions: Vec<ExternalSession>,
) -> SyncHarness {
    init_test_logging();

    let source = Arc::new(SyntheticSessionSource::with_sessions(sessions));
    let store = Arc::new(FailingHistoryStore::with_records(records));
    let sink = Arc::new(RecordingAggregationSink::default());
    let logger = Arc::new(CapturingSyncLogger::default());

    let engine = ReconciliationEngine::new(source.clone(), store.clone(), test_config())
        .with_aggregation_sink(sink.clone())
        .with_logger(logger.clone());

    SyncHarness {
        engine: Arc::new(engine),
        source,
        store,
        sink,
        logger,
    }
}
