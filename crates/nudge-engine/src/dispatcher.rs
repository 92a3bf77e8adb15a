// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push dispatcher: one delivery pass over every registered subscription.
//!
//! Subscriptions are processed with bounded concurrency and full error
//! containment: one failing recipient never affects another, and the only
//! thing propagated to the caller is the counter summary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use nudge_core::{
    ActivityCatalog, CompletionStore, NotificationPayload, NudgeError, PassSummary, PushOptions,
    PushSubscription, PushTransport, ReminderStore, ScheduleStore, SubscriptionStore,
};

use crate::context::build_context;
use crate::message::{generate, generic_check_in};
use crate::scheduler::{is_eligible, local_clock};

/// The store seams one dispatcher reads from.
#[derive(Clone)]
pub struct EngineStores {
    pub schedules: Arc<dyn ScheduleStore>,
    pub completions: Arc<dyn CompletionStore>,
    pub reminders: Arc<dyn ReminderStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub catalog: Arc<dyn ActivityCatalog>,
}

enum Outcome {
    Sent,
    Skipped,
    Failed,
}

/// Drives delivery passes. Constructed explicitly from configuration;
/// holds no global state.
pub struct Dispatcher {
    stores: EngineStores,
    transport: Arc<dyn PushTransport>,
    options: PushOptions,
    concurrency: usize,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("options", &self.options)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        stores: EngineStores,
        transport: Arc<dyn PushTransport>,
        options: PushOptions,
        concurrency: usize,
    ) -> Self {
        Self {
            stores,
            transport,
            options,
            concurrency: concurrency.max(1),
        }
    }

    /// One scheduled delivery pass: only exact-minute-eligible
    /// subscriptions are sent to.
    pub async fn run_pass(&self, now: DateTime<Utc>) -> Result<PassSummary, NudgeError> {
        self.pass(now, false).await
    }

    /// Debug pass that skips eligibility and sends to every subscription
    /// through the identical context/message path.
    pub async fn force_send(&self, now: DateTime<Utc>) -> Result<PassSummary, NudgeError> {
        self.pass(now, true).await
    }

    async fn pass(&self, now: DateTime<Utc>, force: bool) -> Result<PassSummary, NudgeError> {
        let subscriptions = self.stores.subscriptions.list_subscriptions().await?;

        let mut summary = PassSummary {
            checked: subscriptions.len(),
            ..PassSummary::default()
        };

        let outcomes: Vec<Outcome> = stream::iter(subscriptions)
            .map(|sub| self.process_subscription(sub, now, force))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Outcome::Sent => summary.sent += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        info!(
            checked = summary.checked,
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            force,
            "delivery pass complete"
        );
        Ok(summary)
    }

    async fn process_subscription(
        &self,
        sub: PushSubscription,
        now: DateTime<Utc>,
        force: bool,
    ) -> Outcome {
        let (local_date, local_time) = local_clock(now, &sub.timezone);

        if !force && !is_eligible(&sub.notification_times, local_time) {
            return Outcome::Skipped;
        }

        // A failed read degrades to the generic check-in rather than
        // skipping the recipient.
        let payload = match self.build_payload(&sub, local_date, local_time).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(endpoint = %sub.endpoint, error = %e, "context build failed, sending generic payload");
                generic_check_in()
            }
        };

        match self.transport.send(&sub, &payload, &self.options).await {
            Ok(()) => {
                debug!(endpoint = %sub.endpoint, title = %payload.title, "notification sent");
                Outcome::Sent
            }
            Err(e) if e.is_terminal() => {
                info!(endpoint = %sub.endpoint, "endpoint gone, removing subscription");
                if let Err(delete_err) = self
                    .stores
                    .subscriptions
                    .delete_subscription(&sub.endpoint)
                    .await
                {
                    warn!(endpoint = %sub.endpoint, error = %delete_err, "failed to remove gone subscription");
                }
                Outcome::Failed
            }
            Err(e) => {
                warn!(endpoint = %sub.endpoint, error = %e, "push delivery failed, keeping subscription");
                Outcome::Failed
            }
        }
    }

    async fn build_payload(
        &self,
        sub: &PushSubscription,
        local_date: chrono::NaiveDate,
        local_time: chrono::NaiveTime,
    ) -> Result<NotificationPayload, NudgeError> {
        let schedule = self
            .stores
            .schedules
            .daily_schedule(&sub.user_id, local_date)
            .await?;
        let completions = self
            .stores
            .completions
            .completions_for_date(&sub.user_id, local_date)
            .await?;
        let reminders = self
            .stores
            .reminders
            .reminders_for_date(&sub.user_id, local_date)
            .await?;
        let names = self.stores.catalog.display_names().await?;

        // Per-device "last notification" bookkeeping lives client-side;
        // the server renders as if nothing was announced yet.
        let ctx = build_context(schedule.as_ref(), &completions, &reminders, None, local_time);
        Ok(generate(&ctx, &names, &mut rand::thread_rng()))
    }
}
