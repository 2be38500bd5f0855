// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for PromptBank secret envelopes.
//!
//! [`SqliteSecretStore`] keeps envelopes in an SQLite file (WAL journal when
//! `storage.wal_mode` is set) with embedded migrations and a single-writer
//! model via `tokio-rusqlite`.
//! [`MemorySecretStore`] keeps them in process memory.

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteSecretStore;
pub use database::Database;
pub use memory::MemorySecretStore;

/// Timestamp column format for the SQLite store: fixed-width RFC 3339 in
/// UTC, so lexical order equals chronological order.
pub(crate) fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_are_fixed_width_and_sort_lexically() {
        let early = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::Duration::microseconds(1);
        let (a, b) = (format_timestamp(&early), format_timestamp(&late));
        assert_eq!(a, "2026-01-02T03:04:05.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }
}
