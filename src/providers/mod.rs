// ABOUTME: External session sources feeding the workout sync engine
// ABOUTME: Source trait plus the synthetic in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Core source trait shared by every external health integration
pub mod core;
/// In-memory source for development, tests and file-driven runs
pub mod synthetic_provider;

pub use self::core::ExternalSessionSource;
pub use synthetic_provider::SyntheticSessionSource;
