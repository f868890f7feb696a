// ABOUTME: Pierre sync CLI - reconciles exported health sessions into a workout history file
// ABOUTME: Runs enrich, import, cleanup or a full pass against JSON session and history files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Enrich unmatched workouts from the last 30 days
//! pierre-sync --history history.json --sessions sessions.json enrich
//!
//! # Import sessions from the last 14 days that are missing from history
//! pierre-sync --history history.json --sessions sessions.json import --days 14
//!
//! # Clear references to sessions that were deleted from the health source
//! pierre-sync --history history.json --sessions sessions.json cleanup
//!
//! # Cleanup, enrich and import with the configured windows
//! pierre-sync --history history.json --sessions sessions.json all
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pierre_workout_sync::{
    config::SyncConfig,
    history::JsonFileHistoryStore,
    logging::LoggingConfig,
    models::ExternalSession,
    providers::SyntheticSessionSource,
    sync::ReconciliationEngine,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-sync",
    about = "Pierre workout sync CLI",
    long_about = "Reconciles workout sessions exported from an external health source into a workout history file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Workout history JSON file (created if missing)
    #[arg(long, global = true, default_value = "history.json")]
    history: PathBuf,

    /// External sessions JSON file
    #[arg(long, global = true, default_value = "sessions.json")]
    sessions: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Copy metrics from matching sessions into unmatched workouts
    Enrich {
        /// Window in days (default: PIERRE_SYNC_ENRICH_WINDOW_DAYS or 30)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Create workouts for sessions with no history counterpart
    Import {
        /// Window in days (default: PIERRE_SYNC_IMPORT_WINDOW_DAYS or 7)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Clear references to sessions the source no longer reports
    Cleanup {
        /// Window in days (default: PIERRE_SYNC_CLEANUP_WINDOW_DAYS or 30)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Cleanup, enrich and import in one pass
    All,
}

async fn load_sessions(path: &Path) -> Result<Vec<ExternalSession>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read sessions file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Invalid sessions file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = SyncConfig::from_env();
    let sessions = load_sessions(&cli.sessions).await?;
    info!(
        sessions = sessions.len(),
        history = %cli.history.display(),
        "Loaded exported sessions"
    );

    let source = SyntheticSessionSource::with_sessions_and_name(sessions, "sessions-file");
    let store = JsonFileHistoryStore::new(cli.history);
    let engine = ReconciliationEngine::new(Arc::new(source), Arc::new(store), config.clone());

    match cli.command {
        Command::Enrich { days } => {
            let count = engine
                .enrich_existing(days.unwrap_or(config.enrich_window_days))
                .await?;
            println!("Enriched {count} workouts");
        }
        Command::Import { days } => {
            let count = engine
                .import_missing(days.unwrap_or(config.import_window_days))
                .await?;
            println!("Imported {count} workouts");
        }
        Command::Cleanup { days } => {
            let count = engine
                .cleanup_stale(days.unwrap_or(config.cleanup_window_days))
                .await?;
            println!("Cleared {count} stale references");
        }
        Command::All => {
            let report = engine.reconcile_all().await?;
            println!(
                "Cleared {} stale references, enriched {} workouts, imported {} workouts",
                report.cleaned, report.enriched, report.imported
            );
        }
    }

    Ok(())
}
