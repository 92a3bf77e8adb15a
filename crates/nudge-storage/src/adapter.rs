// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store traits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use nudge_config::model::StorageConfig;
use nudge_core::{
    ActivityCatalog, Completion, CompletionStore, DailySchedule, NudgeError, PushSubscription,
    Reminder, ReminderStore, ScheduleStore, SubscriptionStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed implementation of every store trait the engine needs.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. Clones share the one underlying connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the database at the configured path and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, NudgeError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "SQLite store opened");
        Ok(Self { db })
    }

    /// In-memory store with the full schema. Test use only.
    pub async fn open_in_memory() -> Result<Self, NudgeError> {
        let db = Database::open_in_memory().await?;
        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint the WAL before shutdown.
    pub async fn close(&self) -> Result<(), NudgeError> {
        self.db.close().await
    }
}

#[async_trait]
impl ScheduleStore for SqliteStore {
    async fn daily_schedule(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailySchedule>, NudgeError> {
        queries::schedules::daily_schedule(&self.db, user_id, date).await
    }
}

#[async_trait]
impl CompletionStore for SqliteStore {
    async fn completions_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Completion>, NudgeError> {
        queries::completions::completions_for_date(&self.db, user_id, date).await
    }
}

#[async_trait]
impl ReminderStore for SqliteStore {
    async fn reminders_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reminder>, NudgeError> {
        queries::reminders::reminders_for_date(&self.db, user_id, date).await
    }
}

#[async_trait]
impl SubscriptionStore for SqliteStore {
    async fn list_subscriptions(&self) -> Result<Vec<PushSubscription>, NudgeError> {
        queries::subscriptions::list_subscriptions(&self.db).await
    }

    async fn upsert_subscription(
        &self,
        subscription: &PushSubscription,
    ) -> Result<(), NudgeError> {
        queries::subscriptions::upsert_subscription(&self.db, subscription).await
    }

    async fn delete_subscription(&self, endpoint: &str) -> Result<(), NudgeError> {
        queries::subscriptions::delete_subscription(&self.db, endpoint).await
    }
}

#[async_trait]
impl ActivityCatalog for SqliteStore {
    async fn display_names(&self) -> Result<HashMap<String, String>, NudgeError> {
        queries::activities::display_names(&self.db).await
    }
}
