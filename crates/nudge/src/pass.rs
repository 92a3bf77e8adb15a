// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nudge pass` command implementation.
//!
//! Runs exactly one delivery pass against the configured database and
//! prints the counters. With `--force`, eligibility checks are skipped and
//! every subscription receives a notification; useful for verifying a new
//! VAPID key or a fresh subscription end to end.

use chrono::Utc;
use tracing::info;

use nudge_config::NudgeConfig;
use nudge_core::{NudgeError, PassSummary};
use nudge_storage::SqliteStore;

use crate::serve::build_dispatcher;

fn print_summary(summary: &PassSummary, force: bool) {
    let label = if force { "forced pass" } else { "pass" };
    println!(
        "{label}: checked={} sent={} failed={} skipped={}",
        summary.checked, summary.sent, summary.failed, summary.skipped
    );
}

/// Runs the `nudge pass` command.
pub async fn run_pass(config: NudgeConfig, force: bool) -> Result<(), NudgeError> {
    let store = SqliteStore::open(&config.storage).await?;
    let dispatcher = build_dispatcher(&store, &config)?;

    info!(force, "running one delivery pass");
    let summary = if force {
        dispatcher.force_send(Utc::now()).await?
    } else {
        dispatcher.run_pass(Utc::now()).await?
    };

    print_summary(&summary, force);
    store.close().await?;
    Ok(())
}
