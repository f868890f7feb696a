// ABOUTME: Core data models for workout history reconciliation
// ABOUTME: Re-exports ExternalSession, HistoryRecord and TimeWindow types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures exchanged between the sync engine
//! and its collaborators.
//!
//! ## Core Models
//!
//! - `ExternalSession`: A workout session reported by the external health source.
//!   Read-only to the engine and never cached across calls.
//! - `HistoryRecord`: The application's own record of a workout occurrence.
//!   Owned by the history store; the engine reads and upserts it.
//! - `TimeWindow`: The inclusive time range an operation considers.

mod external_session;
mod history;
mod time_window;

pub use external_session::ExternalSession;
pub use history::{HistoryRecord, RecordSource, WorkoutStatus};
pub use time_window::TimeWindow;
