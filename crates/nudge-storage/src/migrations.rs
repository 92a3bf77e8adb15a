// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded SQL migrations tracked through `PRAGMA user_version`.
//!
//! Migration files are compiled into the binary via `include_str!` and
//! applied in one transaction on database open. The applied version is
//! mirrored to `user_version` after each step.

use thiserror::Error;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_init.sql"),
}];

/// Error applying embedded migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The database was written by a newer binary.
    #[error("database schema version {db_version} is newer than supported version {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Apply all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut rusqlite::Connection) -> Result<(), MigrationError> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(MigrationError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &rusqlite::Connection) -> Result<u32, MigrationError> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
