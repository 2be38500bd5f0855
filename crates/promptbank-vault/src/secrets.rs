// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace secrets: API keys stored as vault envelopes.
//!
//! Service, name and value are all inside the envelope. The store only ever
//! sees ciphertext plus an id and two timestamps. Editing a secret replaces
//! its envelope wholesale.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use promptbank_config::model::VaultConfig;
use promptbank_core::{PromptBankError, RecordId, SecretStore};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cipher::{Aes256Gcm, AeadCipher};
use crate::engine::VaultEngine;
use crate::kdf::{KeyDerivationProvider, Pbkdf2Sha256};
use crate::random::{SecureRandomSource, SystemRandomSource};

/// Placeholder shown for records that do not open under the given passphrase.
pub const LOCKED_PREVIEW: &str = "[locked]";

/// The plaintext of a workspace secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPayload {
    pub service: String,
    pub name: String,
    pub value: String,
}

impl std::fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretPayload")
            .field("service", &self.service)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl SecretPayload {
    pub fn new(
        service: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    fn validate(&self) -> Result<(), PromptBankError> {
        for (field, content) in [
            ("service", &self.service),
            ("name", &self.name),
            ("value", &self.value),
        ] {
            if content.trim().is_empty() {
                return Err(PromptBankError::InvalidInput(format!(
                    "secret {field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// One row of [`SecretsWorkspace::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretSummary {
    pub id: RecordId,
    pub service: String,
    pub name: String,
    /// [`mask_secret`] of the value, or [`LOCKED_PREVIEW`].
    pub masked_value: String,
    pub date_added: DateTime<Utc>,
    /// The envelope did not open under the listing passphrase.
    pub locked: bool,
}

/// Secret CRUD over an engine and a store.
pub struct SecretsWorkspace<R = SystemRandomSource, K = Pbkdf2Sha256, C = Aes256Gcm> {
    store: Arc<dyn SecretStore>,
    engine: VaultEngine<R, K, C>,
    min_passphrase_length: usize,
}

impl SecretsWorkspace {
    /// A workspace using the production engine.
    pub fn new(store: Arc<dyn SecretStore>, config: &VaultConfig) -> Self {
        Self::with_engine(store, VaultEngine::new(), config)
    }
}

impl<R, K, C> SecretsWorkspace<R, K, C>
where
    R: SecureRandomSource + Clone + 'static,
    K: KeyDerivationProvider + Clone + 'static,
    C: AeadCipher + Clone + 'static,
{
    pub fn with_engine(
        store: Arc<dyn SecretStore>,
        engine: VaultEngine<R, K, C>,
        config: &VaultConfig,
    ) -> Self {
        Self {
            store,
            engine,
            min_passphrase_length: config.min_passphrase_length,
        }
    }

    /// Encrypt and persist a new secret.
    pub async fn add(
        &self,
        payload: &SecretPayload,
        passphrase: &SecretString,
    ) -> Result<RecordId, PromptBankError> {
        payload.validate()?;
        self.check_passphrase(passphrase)?;

        let envelope = self.engine.encrypt_async(payload, passphrase).await?;
        let id = self.store.save(&envelope).await?;
        info!(id = %id, "secret stored");
        Ok(id)
    }

    /// Decrypt a stored secret. `Ok(None)` when the id is unknown.
    pub async fn reveal(
        &self,
        id: &RecordId,
        passphrase: &SecretString,
    ) -> Result<Option<SecretPayload>, PromptBankError> {
        let Some(envelope) = self.store.load(id).await? else {
            return Ok(None);
        };
        let payload = self.engine.decrypt_async(&envelope, passphrase).await?;
        debug!(id = %id, "secret revealed");
        Ok(Some(payload))
    }

    /// Re-encrypt `payload` into a brand-new envelope under `id`.
    pub async fn update(
        &self,
        id: &RecordId,
        payload: &SecretPayload,
        passphrase: &SecretString,
    ) -> Result<(), PromptBankError> {
        payload.validate()?;
        self.check_passphrase(passphrase)?;

        if self.store.load(id).await?.is_none() {
            return Err(PromptBankError::NotFound(format!("secret {id}")));
        }
        let envelope = self.engine.encrypt_async(payload, passphrase).await?;
        if !self.store.replace(id, &envelope).await? {
            return Err(PromptBankError::NotFound(format!("secret {id}")));
        }
        info!(id = %id, "secret updated");
        Ok(())
    }

    /// Remove a secret. Returns whether anything was deleted.
    pub async fn delete(&self, id: &RecordId) -> Result<bool, PromptBankError> {
        let removed = self.store.delete(id).await?;
        if removed {
            info!(id = %id, "secret deleted");
        }
        Ok(removed)
    }

    /// Summaries of every stored secret, newest first.
    ///
    /// Envelopes are opened concurrently. Records sealed under a different
    /// passphrase are listed as locked instead of failing the whole listing.
    pub async fn list(
        &self,
        passphrase: &SecretString,
    ) -> Result<Vec<SecretSummary>, PromptBankError> {
        let records = self.store.list().await?;

        let opened = join_all(records.iter().map(|record| {
            self.engine
                .decrypt_async::<SecretPayload>(&record.envelope, passphrase)
        }))
        .await;

        let summaries: Vec<SecretSummary> = records
            .into_iter()
            .zip(opened)
            .map(|(record, payload)| match payload {
                Ok(payload) => SecretSummary {
                    id: record.id,
                    masked_value: mask_secret(&payload.value),
                    service: payload.service,
                    name: payload.name,
                    date_added: record.date_added,
                    locked: false,
                },
                Err(_) => SecretSummary {
                    id: record.id,
                    service: String::new(),
                    name: String::new(),
                    masked_value: LOCKED_PREVIEW.to_string(),
                    date_added: record.date_added,
                    locked: true,
                },
            })
            .collect();

        let locked = summaries.iter().filter(|s| s.locked).count();
        debug!(total = summaries.len(), locked, "secrets listed");
        Ok(summaries)
    }

    fn check_passphrase(&self, passphrase: &SecretString) -> Result<(), PromptBankError> {
        if self.min_passphrase_length == 0 {
            return Ok(());
        }
        if passphrase.expose_secret().chars().count() < self.min_passphrase_length {
            return Err(PromptBankError::InvalidInput(format!(
                "passphrase must be at least {} characters",
                self.min_passphrase_length
            )));
        }
        Ok(())
    }
}

/// Mask a secret value for display: `"sk-a...mnop"`.
///
/// Shows the first and last four characters. Values shorter than ten
/// characters are fully masked as `"****"`.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
