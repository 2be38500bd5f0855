// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for PromptBank.

use thiserror::Error;

/// Failure conditions of the vault crypto engine.
///
/// The two variants carry no payload. A decryption failure must not reveal
/// whether the passphrase was wrong or the envelope was damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VaultError {
    /// The crypto primitives or the random source could not complete.
    #[error("could not secure this data")]
    EncryptionFailure,

    /// Wrong passphrase, malformed or truncated envelope, or tag mismatch.
    #[error("invalid password or corrupted data")]
    DecryptionFailure,
}

/// The primary error type used across the PromptBank workspace.
#[derive(Debug, Error)]
pub enum PromptBankError {
    /// Configuration errors (invalid TOML, bad values, missing passphrase source).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Vault engine failures, surfaced with their generic message.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Caller-supplied data was rejected before reaching the engine.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
