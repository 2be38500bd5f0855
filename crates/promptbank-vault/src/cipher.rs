// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open over a derived key.
//!
//! The IV is supplied by the caller. A fresh key is derived for every
//! envelope, and every envelope also draws a fresh IV.

use promptbank_core::VaultError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use zeroize::Zeroizing;

use crate::kdf::DerivedKey;

/// IV length in bytes (96-bit GCM nonce).
pub const IV_LEN: usize = 12;

/// Authentication tag length in bytes, appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Authenticated encryption with a 256-bit key and a 96-bit IV.
pub trait AeadCipher: Send + Sync {
    /// Encrypt `plaintext`, returning `ciphertext || tag`.
    fn seal(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, VaultError>;

    /// Verify and decrypt `ciphertext || tag`.
    fn open(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        sealed: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, VaultError>;
}

/// AES-256-GCM via ring, with empty associated data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256Gcm;

fn less_safe_key(key: &DerivedKey) -> Option<LessSafeKey> {
    UnboundKey::new(&AES_256_GCM, key.expose_bytes())
        .ok()
        .map(LessSafeKey::new)
}

impl AeadCipher for Aes256Gcm {
    fn seal(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        let key = less_safe_key(key).ok_or(VaultError::EncryptionFailure)?;
        let nonce = Nonce::assume_unique_for_key(*iv);

        let mut in_out = Vec::with_capacity(plaintext.len() + TAG_LEN);
        in_out.extend_from_slice(plaintext);
        key.seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| VaultError::EncryptionFailure)?;
        Ok(in_out)
    }

    fn open(
        &self,
        key: &DerivedKey,
        iv: &[u8; IV_LEN],
        sealed: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let key = less_safe_key(key).ok_or(VaultError::DecryptionFailure)?;
        let nonce = Nonce::assume_unique_for_key(*iv);

        let mut in_out = Zeroizing::new(sealed.to_vec());
        let plaintext_len = key
            .open_in_place(nonce, Aad::empty(), in_out.as_mut_slice())
            .map_err(|_| VaultError::DecryptionFailure)?
            .len();
        in_out.truncate(plaintext_len);
        Ok(in_out)
    }
}
