// ABOUTME: Workout history persistence abstraction used by the sync engine
// ABOUTME: HistoryStore trait with in-memory and JSON file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # History Store
//!
//! The engine needs exactly two things from workout history persistence: a
//! full listing and a single-record upsert keyed by `HistoryRecord::id`.
//! Indexing, querying and the on-disk format are left to each backend.
//! Records are never deleted through this interface.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::HistoryRecord;

/// JSON file backend
pub mod json_file;
/// In-memory backend
pub mod memory;

pub use json_file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;

/// Workout history persistence
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// List every known history record
    ///
    /// # Errors
    ///
    /// Returns a storage error if the records cannot be read.
    async fn list_all(&self) -> AppResult<Vec<HistoryRecord>>;

    /// Insert `record`, or replace the stored record with the same id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be written.
    async fn upsert(&self, record: &HistoryRecord) -> AppResult<()>;
}

/// Insert or replace `record` in `records` by id, keeping insertion order
pub(crate) fn upsert_in_place(records: &mut Vec<HistoryRecord>, record: &HistoryRecord) {
    match records.iter_mut().find(|existing| existing.id == record.id) {
        Some(existing) => existing.clone_from(record),
        None => records.push(record.clone()),
    }
}
