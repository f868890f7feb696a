// ABOUTME: Reconciliation of external sessions into workout history
// ABOUTME: Calendar, matcher, de-duplicator, sync logger and the orchestrating engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Sync
//!
//! Three operations keep the app's workout history aligned with the external
//! health source:
//!
//! 1. **Enrich**: completed records with no external link adopt metrics from
//!    their best-matching external session.
//! 2. **Import**: external sessions with no internal counterpart become new
//!    history records.
//! 3. **Cleanup**: links to external sessions that no longer exist are
//!    cleared, so the record can be matched again later.
//!
//! `SessionMatcher` and `KnownWorkouts` hold the pure decision logic;
//! `ReconciliationEngine` wires them to the collaborators.

/// Local calendar day boundaries
pub mod calendar;
/// Duplicate detection for external sessions
pub mod dedup;
/// Reconciliation engine orchestrating fetch, decide and upsert
pub mod engine;
/// Injected sync journal
pub mod logger;
/// Best-match selection between a history record and external sessions
pub mod matcher;

pub use calendar::LocalCalendar;
pub use dedup::{DuplicateReason, KnownWorkouts};
pub use engine::{ReconciliationEngine, SyncReport};
pub use logger::{NoopSyncLogger, SyncLogger, TracingSyncLogger};
pub use matcher::SessionMatcher;
