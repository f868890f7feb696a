// ABOUTME: Configuration management module for workout sync settings
// ABOUTME: Loads reconciliation windows and the local calendar offset from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Pierre workout sync
//!
//! - **Sync**: reconciliation windows and local calendar offset

/// Reconciliation windows and calendar configuration
pub mod sync;

pub use sync::SyncConfig;
