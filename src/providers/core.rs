// ABOUTME: Core trait for external health sources that report workout sessions
// ABOUTME: Defines the single windowed fetch the sync engine depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # External Session Source
//!
//! The sync engine treats the external health source as a read-only
//! collaborator: authorization, query execution and timeouts are the
//! implementation's concern. The engine only asks for every session that
//! overlaps a time window and never caches the answer across calls.
//!
//! ## Error Handling
//!
//! Implementations report failures as `AppError`:
//! - `ExternalServiceUnavailable` when the source cannot be reached
//! - `ExternalAuthFailed` when access was revoked
//! - `ExternalServiceError` for any other source-side failure
//!
//! A failed fetch aborts the whole engine operation, since every decision
//! depends on the complete external set.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{ExternalSession, TimeWindow};

/// Read-only view of an external health source
#[async_trait]
pub trait ExternalSessionSource: Send + Sync {
    /// Source name for logging and error messages
    fn name(&self) -> &str;

    /// Fetch every session overlapping `window`
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreachable, unauthorized, or fails
    /// while executing the query.
    async fn fetch_sessions(&self, window: &TimeWindow) -> AppResult<Vec<ExternalSession>>;
}

