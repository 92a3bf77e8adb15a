// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read/write contracts against the external data stores.
//!
//! The delivery pass only reads schedule/completion/reminder data; the one
//! mutation it performs is deleting a subscription row on terminal failure.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::NudgeError;
use crate::types::{Completion, DailySchedule, PushSubscription, Reminder};

/// Read access to planned daily schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Returns the schedule for one user and date, or `None` when the day
    /// was never planned. An absent schedule is distinct from an empty one.
    async fn daily_schedule(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailySchedule>, NudgeError>;
}

/// Read access to the completion log.
#[async_trait]
pub trait CompletionStore: Send + Sync {
    async fn completions_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Completion>, NudgeError>;
}

/// Read access to task reminders, pre-filtered to one day.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn reminders_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reminder>, NudgeError>;
}

/// Lifecycle of registered push endpoints.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// All registered subscriptions, every pass iterates this set.
    async fn list_subscriptions(&self) -> Result<Vec<PushSubscription>, NudgeError>;

    /// Creates or replaces the row keyed by the subscription's endpoint.
    async fn upsert_subscription(&self, subscription: &PushSubscription)
    -> Result<(), NudgeError>;

    /// Removes one endpoint. Deleting an unknown endpoint is not an error.
    async fn delete_subscription(&self, endpoint: &str) -> Result<(), NudgeError>;
}

/// Activity-id to display-name lookup, backed by the activity catalog.
#[async_trait]
pub trait ActivityCatalog: Send + Sync {
    /// Map of every known activity id to its display name. Ids missing from
    /// the map are rendered as the raw id, never an error.
    async fn display_names(&self) -> Result<HashMap<String, String>, NudgeError>;
}
