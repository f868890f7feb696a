// ABOUTME: Integration tests for the JSON file backed workout history store
// ABOUTME: Covers missing files, upsert replacement, corrupt files and engine runs over the file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{completed_record, fixed_now, init_test_logging, noon_days_ago, session, test_config};
use pierre_workout_sync::{
    errors::ErrorCode,
    history::{HistoryStore, JsonFileHistoryStore},
    providers::SyntheticSessionSource,
    sync::{NoopSyncLogger, ReconciliationEngine},
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileHistoryStore {
    JsonFileHistoryStore::new(dir.path().join("history.json"))
}

#[tokio::test]
async fn test_missing_file_reads_as_empty_history() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.list_all().await.unwrap().is_empty());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_blank_file_reads_as_empty_history() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "  \n").unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upsert_persists_and_replaces_by_id() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut record = completed_record(noon_days_ago(1));
    let other = completed_record(noon_days_ago(2));

    store.upsert(&record).await.unwrap();
    store.upsert(&other).await.unwrap();
    record.duration_minutes = Some(55);
    store.upsert(&record).await.unwrap();

    let reopened = store_in(&dir);
    let records = reopened.list_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], record);
    assert_eq!(records[1], other);

    let mut temp_path = store.path().as_os_str().to_owned();
    temp_path.push(".tmp");
    assert!(!std::path::Path::new(&temp_path).exists());
}

#[tokio::test]
async fn test_corrupt_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ not a list").unwrap();

    let error = store.list_all().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::SerializationError);
    assert!(error.source.is_some());
}

#[tokio::test]
async fn test_imports_survive_a_new_engine_over_the_same_file() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let sessions = vec![
        session("hk-1", noon_days_ago(1), 35),
        session("hk-2", noon_days_ago(3), 50),
    ];

    for expected in [2, 0] {
        let engine = ReconciliationEngine::new(
            Arc::new(SyntheticSessionSource::with_sessions(sessions.clone())),
            Arc::new(store_in(&dir)),
            test_config(),
        )
        .with_logger(Arc::new(NoopSyncLogger));

        let imported = engine.import_missing_at(7, fixed_now()).await.unwrap();
        assert_eq!(imported, expected);
    }

    let records = store_in(&dir).list_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.is_imported()));
}
