// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process [`SecretStore`], for tests and ephemeral sessions.

use async_trait::async_trait;
use chrono::Utc;
use promptbank_core::{PromptBankError, RecordId, SecretStore, StoredEnvelope};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order; the newest record is last.
    records: Vec<StoredEnvelope>,
}

/// A secret store backed by a `Vec` behind an async lock.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    inner: RwLock<Inner>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn save(&self, envelope: &str) -> Result<RecordId, PromptBankError> {
        let now = Utc::now();
        let id = RecordId(uuid::Uuid::new_v4().to_string());
        self.inner.write().await.records.push(StoredEnvelope {
            id: id.clone(),
            envelope: envelope.to_string(),
            date_added: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn load(&self, id: &RecordId) -> Result<Option<String>, PromptBankError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.envelope.clone()))
    }

    async fn replace(&self, id: &RecordId, envelope: &str) -> Result<bool, PromptBankError> {
        let mut inner = self.inner.write().await;
        match inner.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.envelope = envelope.to_string();
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, PromptBankError> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| &r.id != id);
        Ok(inner.records.len() != before)
    }

    async fn list(&self) -> Result<Vec<StoredEnvelope>, PromptBankError> {
        let inner = self.inner.read().await;
        let mut records = inner.records.clone();
        // Stable sort on reversed insertion order keeps ties newest-first.
        records.reverse();
        records.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Ok(records)
    }
}
