// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a passphrase.
//!
//! The iteration count and output length are part of the envelope format:
//! envelopes carry no KDF parameters, so changing them makes every stored
//! secret undecryptable.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count for every envelope in the wild.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(PBKDF2_ITERATIONS) {
    Some(n) => n,
    None => panic!("PBKDF2_ITERATIONS must be non-zero"),
};

/// A 256-bit key derived from a passphrase.
///
/// Zeroed on drop, never cloned, and redacted from `Debug`. The engine hands
/// it straight to the cipher and never returns it to callers.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn from_bytes(bytes: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self(bytes)
    }

    /// Raw key material, for [`AeadCipher`](crate::cipher::AeadCipher) implementations.
    pub fn expose_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derives an AES-256 key from a passphrase and salt.
///
/// Must be deterministic: the same inputs always yield the same key.
pub trait KeyDerivationProvider: Send + Sync {
    fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey;
}

/// PBKDF2 with HMAC-SHA256.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Sha256 {
    iterations: NonZeroU32,
}

impl Pbkdf2Sha256 {
    /// The wire-compatible provider ([`PBKDF2_ITERATIONS`] rounds).
    pub fn new() -> Self {
        Self::with_iterations(DEFAULT_ITERATIONS)
    }

    /// A provider with a custom round count.
    ///
    /// Envelopes produced this way are not readable by the default provider;
    /// meant for fast tests.
    pub fn with_iterations(iterations: NonZeroU32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }
}

impl Default for Pbkdf2Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDerivationProvider for Pbkdf2Sha256 {
    fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
        let mut out = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            salt,
            passphrase,
            out.as_mut(),
        );
        DerivedKey::from_bytes(out)
    }
}
