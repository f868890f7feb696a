// ABOUTME: Core types and constants for Pierre workout history reconciliation
// ABOUTME: Foundation crate with error handling, workout history models, and sync constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre workout
//! sync engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Reconciliation thresholds, placeholder identifiers, default windows
//! - **models**: External sessions, history records, and query windows

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`ExternalSession`, `HistoryRecord`, `TimeWindow`)
pub mod models;
