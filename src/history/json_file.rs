// ABOUTME: Workout history persisted as a JSON array in a single file
// ABOUTME: Writes go through a temp file and rename so readers never see partial data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{upsert_in_place, HistoryStore};
use crate::errors::{AppError, AppResult};
use crate::models::HistoryRecord;

/// Workout history stored in a JSON file
///
/// A missing file reads as an empty history. Each upsert rewrites the whole
/// file; concurrent upserts through one store instance are serialized.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Create a store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> AppResult<Vec<HistoryRecord>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "failed to read history file {}: {e}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::serialization(format!(
                "history file {} is not a valid record list: {e}",
                self.path.display()
            ))
            .with_source(e)
        })
    }

    async fn write_records(&self, records: &[HistoryRecord]) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        if let Err(e) = fs::write(&temp_path, json).await {
            Self::discard_temp_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            Self::discard_temp_file(&temp_path).await;
            return Err(AppError::storage(format!(
                "failed to replace history file {}: {e}",
                self.path.display()
            ))
            .with_source(e));
        }

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "History file written"
        );
        Ok(())
    }

    async fn discard_temp_file(temp_path: &Path) {
        if let Err(e) = fs::remove_file(temp_path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "Failed to remove temporary history file"
                );
            }
        }
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn list_all(&self) -> AppResult<Vec<HistoryRecord>> {
        self.read_records().await
    }

    async fn upsert(&self, record: &HistoryRecord) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        upsert_in_place(&mut records, record);
        self.write_records(&records)
            .await
            .map_err(|e| e.with_resource_id(record.id.to_string()))
    }
}
