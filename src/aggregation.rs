// ABOUTME: Downstream sink notified when a reconciled workout becomes significant
// ABOUTME: Lets streak and challenge counters update once per qualifying workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::models::HistoryRecord;

/// Receiver for significant workouts produced by reconciliation
///
/// Notification is fire-and-forget: the sink owns its own error handling and
/// nothing it does can fail the engine operation that produced the record.
#[async_trait]
pub trait AggregationSink: Send + Sync {
    /// Called once with a record that was just enriched or imported and meets
    /// the significant-workout duration
    async fn notify(&self, record: &HistoryRecord);
}

/// Sink used when no downstream aggregation is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAggregationSink;

#[async_trait]
impl AggregationSink for NoopAggregationSink {
    async fn notify(&self, _record: &HistoryRecord) {}
}
