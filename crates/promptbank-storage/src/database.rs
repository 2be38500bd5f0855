// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! All statements run on tokio-rusqlite's single background thread, which
//! serialises writes. Do not open a second connection for writes.

use std::path::Path;

use promptbank_core::PromptBankError;
use tracing::debug;

use crate::migrations;

/// An open, migrated SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and migrate it.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, PromptBankError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PromptBankError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| PromptBankError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        debug!(path = %path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database, migrated.
    pub async fn open_in_memory() -> Result<Self, PromptBankError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| PromptBankError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), PromptBankError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    // journal_mode echoes the new mode back as a row.
                    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
                }
                conn.busy_timeout(std::time::Duration::from_secs(5))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        self.conn
            .call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(map_tr_err)
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), PromptBankError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Convert tokio-rusqlite errors to `PromptBankError::Storage`.
pub(crate) fn map_tr_err<E: std::fmt::Display>(e: tokio_rusqlite::Error<E>) -> PromptBankError {
    PromptBankError::Storage {
        source: format!("database error: {e}").into(),
    }
}
