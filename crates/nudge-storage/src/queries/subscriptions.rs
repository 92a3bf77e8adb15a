// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push subscription lifecycle.

use nudge_core::{NotificationTime, NudgeError, PushSubscription, SubscriptionKeys};
use rusqlite::params;

use crate::database::Database;
use crate::queries::conversion_err;

/// All registered subscriptions, oldest first.
pub async fn list_subscriptions(db: &Database) -> Result<Vec<PushSubscription>, NudgeError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT endpoint, p256dh, auth, timezone, notification_times, user_id
                 FROM push_subscriptions ORDER BY created_at",
            )?;
            let rows = stmt.query_map([], |row| {
                let times_json: String = row.get(4)?;
                let notification_times: Vec<NotificationTime> =
                    serde_json::from_str(&times_json).map_err(|e| conversion_err(4, e))?;
                Ok(PushSubscription {
                    endpoint: row.get(0)?,
                    keys: SubscriptionKeys {
                        p256dh: row.get(1)?,
                        auth: row.get(2)?,
                    },
                    timezone: row.get(3)?,
                    notification_times,
                    user_id: row.get(5)?,
                })
            })?;

            let mut subscriptions = Vec::new();
            for row in rows {
                subscriptions.push(row?);
            }
            Ok(subscriptions)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Create or replace the row keyed by the subscription's endpoint.
pub async fn upsert_subscription(
    db: &Database,
    subscription: &PushSubscription,
) -> Result<(), NudgeError> {
    let subscription = subscription.clone();
    let times_json = serde_json::to_string(&subscription.notification_times).map_err(|e| {
        NudgeError::Storage {
            source: Box::new(e),
        }
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO push_subscriptions
                     (endpoint, p256dh, auth, timezone, notification_times, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (endpoint) DO UPDATE SET
                     p256dh = excluded.p256dh,
                     auth = excluded.auth,
                     timezone = excluded.timezone,
                     notification_times = excluded.notification_times,
                     user_id = excluded.user_id,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![
                    subscription.endpoint,
                    subscription.keys.p256dh,
                    subscription.keys.auth,
                    subscription.timezone,
                    times_json,
                    subscription.user_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove one endpoint. Deleting an unknown endpoint is not an error.
pub async fn delete_subscription(db: &Database, endpoint: &str) -> Result<(), NudgeError> {
    let endpoint = endpoint.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM push_subscriptions WHERE endpoint = ?1",
                params![endpoint],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
