// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use nudge_core::NudgeError;
use tracing::debug;

use crate::migrations;

/// Handle to the SQLite database behind a tokio-rusqlite worker thread.
///
/// Cloning is cheap; all clones share the one underlying connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, configure PRAGMAs, and run
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, NudgeError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| NudgeError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;
        configure(&conn).await?;
        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database with the full schema. Test use only.
    pub async fn open_in_memory() -> Result<Self, NudgeError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(map_tr_err)?;
        configure(&conn).await?;
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL. Called before shutdown.
    pub async fn close(&self) -> Result<(), NudgeError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

async fn configure(conn: &tokio_rusqlite::Connection) -> Result<(), NudgeError> {
    conn.call(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        migrations::apply_migrations(conn)
            .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
        Ok(())
    })
    .await
    .map_err(map_tr_err)
}

/// Map a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> NudgeError {
    NudgeError::Storage {
        source: Box::new(e),
    }
}
