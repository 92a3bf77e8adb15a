// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion log reads and writes.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use nudge_core::{Completion, NudgeError, TimeBlock};
use rusqlite::params;
use tracing::warn;

use crate::database::Database;
use crate::queries::conversion_err;

/// All completions one user recorded on a date.
pub async fn completions_for_date(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
) -> Result<Vec<Completion>, NudgeError> {
    let user_id = user_id.to_string();
    let date_str = date.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT activity_id, block, completed_at FROM completions
                 WHERE user_id = ?1 AND date = ?2
                 ORDER BY completed_at",
            )?;
            let rows = stmt.query_map(params![user_id, date_str], |row| {
                let activity_id: String = row.get(0)?;
                let block_str: String = row.get(1)?;
                let completed_str: String = row.get(2)?;
                let completed_at = DateTime::parse_from_rfc3339(&completed_str)
                    .map_err(|e| conversion_err(2, e))?
                    .with_timezone(&Utc);
                Ok((activity_id, block_str, completed_at))
            })?;

            let mut completions = Vec::new();
            for row in rows {
                let (activity_id, block_str, completed_at) = row?;
                match TimeBlock::from_str(&block_str) {
                    Ok(block) => completions.push(Completion {
                        activity_id,
                        block,
                        completed_at,
                    }),
                    Err(_) => {
                        warn!(block = %block_str, "unknown time block in completion row, skipping");
                    }
                }
            }
            Ok(completions)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record one item as done. Re-recording the same (activity, block) for a
/// date keeps the earliest timestamp.
pub async fn record_completion(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    completion: &Completion,
) -> Result<(), NudgeError> {
    let user_id = user_id.to_string();
    let date_str = date.to_string();
    let completion = completion.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO completions (user_id, date, activity_id, block, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id,
                    date_str,
                    completion.activity_id,
                    completion.block.to_string(),
                    completion.completed_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
