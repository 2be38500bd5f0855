// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence contract for encrypted secret envelopes.

use async_trait::async_trait;

use crate::error::PromptBankError;
use crate::types::{RecordId, StoredEnvelope};

/// Key/value persistence for opaque envelope strings.
///
/// Implementations treat envelopes as uninterpreted text. They never see
/// passphrases, keys, or plaintext.
#[async_trait]
pub trait SecretStore: Send + Sync + 'static {
    /// Persists a new envelope and returns its freshly assigned id.
    async fn save(&self, envelope: &str) -> Result<RecordId, PromptBankError>;

    /// Returns the envelope stored under `id`, if any.
    async fn load(&self, id: &RecordId) -> Result<Option<String>, PromptBankError>;

    /// Replaces the envelope under `id` wholesale. Returns `false` when no
    /// record exists.
    async fn replace(&self, id: &RecordId, envelope: &str) -> Result<bool, PromptBankError>;

    /// Removes the record under `id`. Returns `false` when nothing was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, PromptBankError>;

    /// Lists every stored record, newest `date_added` first.
    async fn list(&self) -> Result<Vec<StoredEnvelope>, PromptBankError>;
}
