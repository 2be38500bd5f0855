// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret envelope CRUD operations.

use chrono::{DateTime, Utc};
use promptbank_core::{PromptBankError, RecordId, StoredEnvelope};
use rusqlite::params;
use rusqlite::types::Type;

use crate::database::{map_tr_err, Database};
use crate::format_timestamp;

/// Insert a new envelope row.
pub async fn insert_envelope(
    db: &Database,
    id: &RecordId,
    envelope: &str,
    now: DateTime<Utc>,
) -> Result<(), PromptBankError> {
    let id = id.0.clone();
    let envelope = envelope.to_string();
    let ts = format_timestamp(&now);
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO secret_envelopes (id, envelope, date_added, updated_at)
                 VALUES (?1, ?2, ?3, ?3)",
                params![id, envelope, ts],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the envelope text for `id`.
pub async fn get_envelope(db: &Database, id: &RecordId) -> Result<Option<String>, PromptBankError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT envelope FROM secret_envelopes WHERE id = ?1",
                params![id],
                |row| row.get(0),
            );
            match result {
                Ok(envelope) => Ok(Some(envelope)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite the envelope for `id`, keeping `date_added`. Returns whether a
/// row matched.
pub async fn replace_envelope(
    db: &Database,
    id: &RecordId,
    envelope: &str,
    now: DateTime<Utc>,
) -> Result<bool, PromptBankError> {
    let id = id.0.clone();
    let envelope = envelope.to_string();
    let ts = format_timestamp(&now);
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE secret_envelopes SET envelope = ?2, updated_at = ?3 WHERE id = ?1",
                params![id, envelope, ts],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete the row for `id`. Returns whether a row was removed.
pub async fn delete_envelope(db: &Database, id: &RecordId) -> Result<bool, PromptBankError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let changed = conn.execute("DELETE FROM secret_envelopes WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// All rows, newest `date_added` first (insertion order breaks ties).
pub async fn list_envelopes(db: &Database) -> Result<Vec<StoredEnvelope>, PromptBankError> {
    db.connection()
        .call(|conn| -> Result<Vec<StoredEnvelope>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, envelope, date_added, updated_at FROM secret_envelopes
                 ORDER BY date_added DESC, rowid DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(StoredEnvelope {
                    id: RecordId(row.get(0)?),
                    envelope: row.get(1)?,
                    date_added: parse_timestamp(row, 2)?,
                    updated_at: parse_timestamp(row, 3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

fn parse_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
