// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task reminder reads and writes.

use chrono::{NaiveDate, NaiveDateTime};
use nudge_core::{NudgeError, Reminder};
use rusqlite::params;

use crate::database::Database;
use crate::queries::conversion_err;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One user's reminders for a date, timed items first in due order.
pub async fn reminders_for_date(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
) -> Result<Vec<Reminder>, NudgeError> {
    let user_id = user_id.to_string();
    let date_str = date.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, due_at, is_completed, is_all_day, completed_in_app
                 FROM reminders
                 WHERE user_id = ?1 AND date = ?2
                 ORDER BY due_at IS NULL, due_at, id",
            )?;
            let rows = stmt.query_map(params![user_id, date_str], |row| {
                let due_str: Option<String> = row.get(2)?;
                let due_at = match due_str {
                    Some(s) => Some(
                        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
                            .map_err(|e| conversion_err(2, e))?,
                    ),
                    None => None,
                };
                Ok(Reminder {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    due_at,
                    is_completed: row.get(3)?,
                    is_all_day: row.get(4)?,
                    completed_in_app: row.get(5)?,
                })
            })?;

            let mut reminders = Vec::new();
            for row in rows {
                reminders.push(row?);
            }
            Ok(reminders)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace one reminder on a date.
pub async fn upsert_reminder(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    reminder: &Reminder,
) -> Result<(), NudgeError> {
    let user_id = user_id.to_string();
    let date_str = date.to_string();
    let reminder = reminder.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminders
                     (id, user_id, date, title, due_at, is_completed, is_all_day, completed_in_app)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT (id) DO UPDATE SET
                     user_id = excluded.user_id,
                     date = excluded.date,
                     title = excluded.title,
                     due_at = excluded.due_at,
                     is_completed = excluded.is_completed,
                     is_all_day = excluded.is_all_day,
                     completed_in_app = excluded.completed_in_app",
                params![
                    reminder.id,
                    user_id,
                    date_str,
                    reminder.title,
                    reminder.due_at.map(|t| t.format(DATETIME_FORMAT).to_string()),
                    reminder.is_completed,
                    reminder.is_all_day,
                    reminder.completed_in_app,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
