// ABOUTME: Main library entry point for Pierre workout sync
// ABOUTME: Reconciles sessions from an external health source into the app's workout history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Sync
//!
//! Merges workout sessions recorded by an external health-tracking source into
//! the app's own workout history without ever duplicating a workout, and heals
//! the link between the two datasets when the external source changes its
//! records underneath the app.
//!
//! ## Architecture
//!
//! - **Providers**: `ExternalSessionSource`, the read-only view of the external source
//! - **History**: `HistoryStore`, the app's workout history (in-memory and JSON file backends)
//! - **Aggregation**: `AggregationSink`, notified once per newly significant workout
//! - **Sync**: matcher, de-duplicator and the `ReconciliationEngine` orchestrator
//! - **Config**: `SyncConfig` loaded from environment variables
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pierre_workout_sync::config::SyncConfig;
//! use pierre_workout_sync::errors::AppResult;
//! use pierre_workout_sync::history::InMemoryHistoryStore;
//! use pierre_workout_sync::providers::SyntheticSessionSource;
//! use pierre_workout_sync::sync::ReconciliationEngine;
//!
//! # async fn example() -> AppResult<()> {
//! let engine = ReconciliationEngine::new(
//!     Arc::new(SyntheticSessionSource::new()),
//!     Arc::new(InMemoryHistoryStore::new()),
//!     SyncConfig::from_env(),
//! );
//!
//! let report = engine.reconcile_all().await?;
//! println!("imported {} workouts", report.imported);
//! # Ok(())
//! # }
//! ```

// Re-export pierre-core modules so callers can keep `use crate::errors::*` etc.
pub use pierre_core::constants;
pub use pierre_core::errors;
pub use pierre_core::models;

/// Downstream notification of significant workouts (streaks, challenges)
pub mod aggregation;

/// Sync configuration loaded from the environment
pub mod config;

/// Workout history persistence abstraction and backends
pub mod history;

/// Structured logging setup
pub mod logging;

/// External session sources
pub mod providers;

/// Matching, de-duplication and the reconciliation engine
pub mod sync;
