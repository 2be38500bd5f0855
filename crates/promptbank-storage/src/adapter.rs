// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`SecretStore`] trait.

use async_trait::async_trait;
use chrono::Utc;
use promptbank_config::model::StorageConfig;
use promptbank_core::{PromptBankError, RecordId, SecretStore, StoredEnvelope};
use tracing::debug;

use crate::database::Database;
use crate::queries;

/// SQLite-backed secret store.
#[derive(Clone)]
pub struct SqliteSecretStore {
    db: Database,
}

impl SqliteSecretStore {
    /// Open the database named in `config`, running migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PromptBankError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite secret store ready");
        Ok(Self { db })
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl SecretStore for SqliteSecretStore {
    async fn save(&self, envelope: &str) -> Result<RecordId, PromptBankError> {
        let id = RecordId(uuid::Uuid::new_v4().to_string());
        queries::secrets::insert_envelope(&self.db, &id, envelope, Utc::now()).await?;
        debug!(id = %id, "envelope saved");
        Ok(id)
    }

    async fn load(&self, id: &RecordId) -> Result<Option<String>, PromptBankError> {
        queries::secrets::get_envelope(&self.db, id).await
    }

    async fn replace(&self, id: &RecordId, envelope: &str) -> Result<bool, PromptBankError> {
        queries::secrets::replace_envelope(&self.db, id, envelope, Utc::now()).await
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, PromptBankError> {
        queries::secrets::delete_envelope(&self.db, id).await
    }

    async fn list(&self) -> Result<Vec<StoredEnvelope>, PromptBankError> {
        queries::secrets::list_envelopes(&self.db).await
    }
}
