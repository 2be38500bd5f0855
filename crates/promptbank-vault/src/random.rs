// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secure random source used for salts and IVs.

use promptbank_core::VaultError;
use ring::rand::{SecureRandom, SystemRandom};

/// A cryptographically secure source of random bytes.
///
/// Only used on the encryption path, so a failure maps to
/// [`VaultError::EncryptionFailure`].
pub trait SecureRandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), VaultError>;
}

/// The operating system CSPRNG, via ring's [`SystemRandom`].
#[derive(Debug, Clone)]
pub struct SystemRandomSource {
    rng: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), VaultError> {
        self.rng
            .fill(dest)
            .map_err(|_| VaultError::EncryptionFailure)
    }
}

/// Draw a fixed-size array from `source`.
pub(crate) fn random_array<const N: usize>(
    source: &impl SecureRandomSource,
) -> Result<[u8; N], VaultError> {
    let mut out = [0u8; N];
    source.fill(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_fills_distinct_values() {
        let rng = SystemRandomSource::new();
        let a: [u8; 16] = random_array(&rng).unwrap();
        let b: [u8; 16] = random_array(&rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fill_handles_empty_buffer() {
        let rng = SystemRandomSource::default();
        let mut empty = [0u8; 0];
        assert!(rng.fill(&mut empty).is_ok());
    }
}
