// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily schedule reads and writes.

use std::str::FromStr;

use chrono::NaiveDate;
use nudge_core::{DailySchedule, NudgeError, TimeBlock};
use rusqlite::params;
use tracing::warn;

use crate::database::Database;

/// Load one user's schedule for a date. `None` when the day was never
/// planned; a planned day with zero activities cannot occur because rows
/// only exist for scheduled items.
pub async fn daily_schedule(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
) -> Result<Option<DailySchedule>, NudgeError> {
    let user_id = user_id.to_string();
    let date_str = date.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT block, activity_id FROM daily_schedules
                 WHERE user_id = ?1 AND date = ?2
                 ORDER BY block, position",
            )?;
            let rows = stmt.query_map(params![user_id, date_str], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut schedule = DailySchedule::new(date);
            let mut found_rows = false;
            for row in rows {
                let (block_str, activity_id) = row?;
                found_rows = true;
                match TimeBlock::from_str(&block_str) {
                    Ok(block) => {
                        schedule.blocks.entry(block).or_default().push(activity_id);
                    }
                    Err(_) => {
                        warn!(block = %block_str, "unknown time block in schedule row, skipping");
                    }
                }
            }

            if found_rows {
                Ok(Some(schedule))
            } else {
                Ok(None)
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a user's schedule for the schedule's date atomically.
pub async fn replace_daily_schedule(
    db: &Database,
    user_id: &str,
    schedule: &DailySchedule,
) -> Result<(), NudgeError> {
    let user_id = user_id.to_string();
    let schedule = schedule.clone();
    db.connection()
        .call(move |conn| {
            let date_str = schedule.date.to_string();
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM daily_schedules WHERE user_id = ?1 AND date = ?2",
                params![user_id, date_str],
            )?;
            for (block, activity_ids) in &schedule.blocks {
                for (position, activity_id) in activity_ids.iter().enumerate() {
                    tx.execute(
                        "INSERT INTO daily_schedules (user_id, date, block, position, activity_id)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![user_id, date_str, block.to_string(), position as i64, activity_id],
                    )?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
