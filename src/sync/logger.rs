// ABOUTME: Injected journal receiving human-readable sync progress messages
// ABOUTME: Tracing-backed default, a no-op for tests, and closures as ad-hoc loggers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::info;

/// Receiver for the engine's sync journal
///
/// The engine reports operation summaries and per-record failures here, in
/// addition to its structured `tracing` events, so embedding apps can surface
/// sync progress without installing a subscriber.
pub trait SyncLogger: Send + Sync {
    /// Record one journal line
    fn log(&self, message: &str);
}

/// Default logger forwarding journal lines to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSyncLogger;

impl SyncLogger for TracingSyncLogger {
    fn log(&self, message: &str) {
        info!(target: "pierre_workout_sync::journal", "{message}");
    }
}

/// Logger that discards every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSyncLogger;

impl SyncLogger for NoopSyncLogger {
    fn log(&self, _message: &str) {}
}

impl<F> SyncLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message);
    }
}
