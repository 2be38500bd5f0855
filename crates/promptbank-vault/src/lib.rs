// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side vault for PromptBank secrets.
//!
//! A passphrase and a fresh random salt feed PBKDF2-HMAC-SHA256 (100 000
//! rounds) to derive a one-shot AES-256-GCM key. The salt, a fresh IV, and the
//! sealed JSON payload travel together as a single Base64 envelope, so the
//! passphrase is the only thing needed to decrypt. Keys are never stored or
//! cached.
//!
//! The random source, key derivation, and cipher are injected through the
//! [`SecureRandomSource`], [`KeyDerivationProvider`], and [`AeadCipher`]
//! traits so the engine can run against deterministic fakes in tests.

pub mod cipher;
pub mod engine;
pub mod envelope;
pub mod kdf;
pub mod prompt;
pub mod random;
pub mod secrets;

pub use cipher::{AeadCipher, Aes256Gcm};
pub use engine::{decrypt_data, encrypt_data, VaultEngine};
pub use envelope::Envelope;
pub use kdf::{DerivedKey, KeyDerivationProvider, Pbkdf2Sha256, PBKDF2_ITERATIONS};
pub use prompt::{read_new_passphrase, read_passphrase};
pub use random::{SecureRandomSource, SystemRandomSource};
pub use secrets::{mask_secret, SecretPayload, SecretSummary, SecretsWorkspace};
