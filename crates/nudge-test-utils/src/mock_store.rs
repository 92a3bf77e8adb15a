// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store fixture for deterministic testing.
//!
//! `MockStore` implements every store trait over plain maps, with
//! switches that make individual read paths fail so dispatcher error
//! containment can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use nudge_core::{
    ActivityCatalog, Completion, CompletionStore, DailySchedule, NudgeError, PushSubscription,
    Reminder, ReminderStore, ScheduleStore, SubscriptionStore,
};

#[derive(Default)]
struct MockData {
    schedules: HashMap<(String, NaiveDate), DailySchedule>,
    completions: HashMap<(String, NaiveDate), Vec<Completion>>,
    reminders: HashMap<(String, NaiveDate), Vec<Reminder>>,
    subscriptions: Vec<PushSubscription>,
    activity_names: HashMap<String, String>,
    deleted_endpoints: Vec<String>,
}

/// In-memory implementation of every store trait.
///
/// Cloning shares the underlying data, so a test can keep a handle while
/// the dispatcher owns `Arc<dyn ...>` views of the same store.
#[derive(Clone, Default)]
pub struct MockStore {
    data: Arc<Mutex<MockData>>,
    fail_schedule_reads: Arc<AtomicBool>,
    fail_completion_reads: Arc<AtomicBool>,
    fail_reminder_reads: Arc<AtomicBool>,
    fail_subscription_list: Arc<AtomicBool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_schedule(&self, user_id: &str, schedule: DailySchedule) {
        self.data
            .lock()
            .await
            .schedules
            .insert((user_id.to_string(), schedule.date), schedule);
    }

    pub async fn add_completion(&self, user_id: &str, date: NaiveDate, completion: Completion) {
        self.data
            .lock()
            .await
            .completions
            .entry((user_id.to_string(), date))
            .or_default()
            .push(completion);
    }

    pub async fn add_reminder(&self, user_id: &str, date: NaiveDate, reminder: Reminder) {
        self.data
            .lock()
            .await
            .reminders
            .entry((user_id.to_string(), date))
            .or_default()
            .push(reminder);
    }

    pub async fn add_subscription(&self, subscription: PushSubscription) {
        self.data.lock().await.subscriptions.push(subscription);
    }

    pub async fn name_activity(&self, id: &str, name: &str) {
        self.data
            .lock()
            .await
            .activity_names
            .insert(id.to_string(), name.to_string());
    }

    /// Endpoints removed via `delete_subscription`, in deletion order.
    pub async fn deleted_endpoints(&self) -> Vec<String> {
        self.data.lock().await.deleted_endpoints.clone()
    }

    pub async fn subscription_count(&self) -> usize {
        self.data.lock().await.subscriptions.len()
    }

    pub fn fail_schedule_reads(&self, fail: bool) {
        self.fail_schedule_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_completion_reads(&self, fail: bool) {
        self.fail_completion_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reminder_reads(&self, fail: bool) {
        self.fail_reminder_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_subscription_list(&self, fail: bool) {
        self.fail_subscription_list.store(fail, Ordering::SeqCst);
    }

    fn injected_failure(which: &str) -> NudgeError {
        NudgeError::Storage {
            source: format!("injected {which} failure").into(),
        }
    }
}

#[async_trait]
impl ScheduleStore for MockStore {
    async fn daily_schedule(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailySchedule>, NudgeError> {
        if self.fail_schedule_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("schedule read"));
        }
        Ok(self
            .data
            .lock()
            .await
            .schedules
            .get(&(user_id.to_string(), date))
            .cloned())
    }
}

#[async_trait]
impl CompletionStore for MockStore {
    async fn completions_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Completion>, NudgeError> {
        if self.fail_completion_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("completion read"));
        }
        Ok(self
            .data
            .lock()
            .await
            .completions
            .get(&(user_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReminderStore for MockStore {
    async fn reminders_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reminder>, NudgeError> {
        if self.fail_reminder_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("reminder read"));
        }
        Ok(self
            .data
            .lock()
            .await
            .reminders
            .get(&(user_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SubscriptionStore for MockStore {
    async fn list_subscriptions(&self) -> Result<Vec<PushSubscription>, NudgeError> {
        if self.fail_subscription_list.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("subscription list"));
        }
        Ok(self.data.lock().await.subscriptions.clone())
    }

    async fn upsert_subscription(
        &self,
        subscription: &PushSubscription,
    ) -> Result<(), NudgeError> {
        let mut data = self.data.lock().await;
        if let Some(existing) = data
            .subscriptions
            .iter_mut()
            .find(|s| s.endpoint == subscription.endpoint)
        {
            *existing = subscription.clone();
        } else {
            data.subscriptions.push(subscription.clone());
        }
        Ok(())
    }

    async fn delete_subscription(&self, endpoint: &str) -> Result<(), NudgeError> {
        let mut data = self.data.lock().await;
        data.subscriptions.retain(|s| s.endpoint != endpoint);
        data.deleted_endpoints.push(endpoint.to_string());
        Ok(())
    }
}

#[async_trait]
impl ActivityCatalog for MockStore {
    async fn display_names(&self) -> Result<HashMap<String, String>, NudgeError> {
        Ok(self.data.lock().await.activity_names.clone())
    }
}
