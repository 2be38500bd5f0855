// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types shared by the secret store backends and the workspace service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by a [`SecretStore`](crate::SecretStore) on save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An opaque envelope as persisted by a secret store.
///
/// The store never interprets `envelope`; it only tracks identity and dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEnvelope {
    pub id: RecordId,
    pub envelope: String,
    /// Set once on save, preserved by `replace`.
    pub date_added: DateTime<Utc>,
    /// Bumped on every `replace`.
    pub updated_at: DateTime<Utc>,
}
