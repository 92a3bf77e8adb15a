// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity catalog lookups.

use std::collections::HashMap;

use nudge_core::NudgeError;
use rusqlite::params;

use crate::database::Database;

/// Map of every known activity id to its display name.
pub async fn display_names(db: &Database) -> Result<HashMap<String, String>, NudgeError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM activities")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut names = HashMap::new();
            for row in rows {
                let (id, name) = row?;
                names.insert(id, name);
            }
            Ok(names)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or rename one catalog entry.
pub async fn upsert_activity(db: &Database, id: &str, name: &str) -> Result<(), NudgeError> {
    let id = id.to_string();
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO activities (id, name) VALUES (?1, ?2)
                 ON CONFLICT (id) DO UPDATE SET name = excluded.name",
                params![id, name],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn empty_catalog_returns_empty_map() {
        let (db, _dir) = setup_db().await;
        let names = display_names(&db).await.unwrap();
        assert!(names.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_and_rename() {
        let (db, _dir) = setup_db().await;
        upsert_activity(&db, "meditate", "Meditate").await.unwrap();
        upsert_activity(&db, "walk", "Walk the dog").await.unwrap();
        upsert_activity(&db, "meditate", "Morning meditation")
            .await
            .unwrap();

        let names = display_names(&db).await.unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names["meditate"], "Morning meditation");
        assert_eq!(names["walk"], "Walk the dog");
        db.close().await.unwrap();
    }
}
