// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nudge status` command implementation.
//!
//! Opens the configured database directly and reports what the engine
//! would work with on the next pass. Works whether or not the server
//! is running; SQLite in WAL mode allows the concurrent read.

use nudge_config::NudgeConfig;
use nudge_core::{NudgeError, PushSubscription, SubscriptionStore};
use nudge_storage::SqliteStore;

fn print_status(config: &NudgeConfig, subscriptions: &[PushSubscription]) {
    println!();
    println!("  nudge status");
    println!("  {}", "-".repeat(35));
    println!("    Database:      {}", config.storage.database_path);
    println!("    Subscriptions: {}", subscriptions.len());

    for sub in subscriptions {
        let times: Vec<String> = sub
            .notification_times
            .iter()
            .map(|t| format!("{:02}:{:02}", t.hour, t.minute))
            .collect();
        println!(
            "      {} ({}, [{}])",
            sub.user_id,
            sub.timezone,
            times.join(", ")
        );
    }

    println!();
}

/// Runs the `nudge status` command.
pub async fn run_status(config: &NudgeConfig) -> Result<(), NudgeError> {
    let store = SqliteStore::open(&config.storage).await?;
    let subscriptions = store.list_subscriptions().await?;

    print_status(config, &subscriptions);
    store.close().await?;
    Ok(())
}
