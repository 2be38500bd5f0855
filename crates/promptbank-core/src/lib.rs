// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the PromptBank secret vault.
//!
//! This crate provides the error taxonomy, the [`SecretStore`] persistence
//! contract, and the record types shared between the crypto engine, the
//! storage backends, and the command-line front end.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{PromptBankError, VaultError};
pub use traits::SecretStore;
pub use types::{RecordId, StoredEnvelope};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promptbank_error_has_all_variants() {
        let _config = PromptBankError::Config("test".into());
        let _storage = PromptBankError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _vault = PromptBankError::Vault(VaultError::DecryptionFailure);
        let _input = PromptBankError::InvalidInput("test".into());
        let _not_found = PromptBankError::NotFound("test".into());
        let _internal = PromptBankError::Internal("test".into());
    }

    #[test]
    fn vault_error_converts_into_promptbank_error() {
        let err: PromptBankError = VaultError::EncryptionFailure.into();
        assert!(matches!(
            err,
            PromptBankError::Vault(VaultError::EncryptionFailure)
        ));
    }

    #[test]
    fn decryption_failure_message_is_generic() {
        let msg = VaultError::DecryptionFailure.to_string();
        assert_eq!(msg, "invalid password or corrupted data");
        assert!(!msg.contains("base64"));
        assert!(!msg.contains("tag"));
    }

    #[test]
    fn wrapped_vault_error_keeps_generic_message() {
        let err = PromptBankError::from(VaultError::DecryptionFailure);
        assert_eq!(err.to_string(), "invalid password or corrupted data");
    }

    #[test]
    fn secret_store_is_object_safe() {
        fn _assert_object_safe(_: &dyn SecretStore) {}
    }
}
