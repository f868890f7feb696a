// ABOUTME: In-memory workout history store for tests and embedding
// ABOUTME: Keeps records in insertion order behind an async RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{upsert_in_place, HistoryStore};
use crate::errors::AppResult;
use crate::models::HistoryRecord;

/// Workout history held in memory
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `records`
    #[must_use]
    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Look up a record by id
    pub async fn get(&self, id: Uuid) -> Option<HistoryRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn list_all(&self) -> AppResult<Vec<HistoryRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn upsert(&self, record: &HistoryRecord) -> AppResult<()> {
        upsert_in_place(&mut *self.records.write().await, record);
        Ok(())
    }
}
