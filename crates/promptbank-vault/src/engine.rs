// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless passphrase-based envelope encryption.
//!
//! Every call draws a fresh salt and IV, derives a fresh key, and drops the
//! key before returning. Nothing is cached between calls, so any number of
//! calls may run concurrently on clones of the same engine.

use promptbank_core::VaultError;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::cipher::{Aes256Gcm, AeadCipher, IV_LEN};
use crate::envelope::Envelope;
use crate::kdf::{KeyDerivationProvider, Pbkdf2Sha256, SALT_LEN};
use crate::random::{random_array, SecureRandomSource, SystemRandomSource};

/// The vault crypto engine, parameterised over its crypto capabilities.
///
/// The default type parameters are the production implementations;
/// [`VaultEngine::new`] builds that configuration.
#[derive(Debug, Clone)]
pub struct VaultEngine<R = SystemRandomSource, K = Pbkdf2Sha256, C = Aes256Gcm> {
    random: R,
    kdf: K,
    cipher: C,
}

impl VaultEngine {
    /// OS randomness, PBKDF2-HMAC-SHA256 at 100 000 rounds, AES-256-GCM.
    pub fn new() -> Self {
        Self::with_components(SystemRandomSource::new(), Pbkdf2Sha256::new(), Aes256Gcm)
    }
}

impl Default for VaultEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, K, C> VaultEngine<R, K, C>
where
    R: SecureRandomSource,
    K: KeyDerivationProvider,
    C: AeadCipher,
{
    pub fn with_components(random: R, kdf: K, cipher: C) -> Self {
        Self {
            random,
            kdf,
            cipher,
        }
    }

    /// Serialize `data` to JSON and seal it into an envelope.
    pub fn encrypt<T>(&self, data: &T, passphrase: &SecretString) -> Result<String, VaultError>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = to_json(data)?;
        self.seal_bytes(&plaintext, passphrase)
    }

    /// Open an envelope and deserialize its JSON payload as `T`.
    ///
    /// A payload that opens but does not match `T` is also a
    /// [`VaultError::DecryptionFailure`].
    pub fn decrypt<T>(&self, envelope: &str, passphrase: &SecretString) -> Result<T, VaultError>
    where
        T: DeserializeOwned,
    {
        let plaintext = self.open_bytes(envelope, passphrase)?;
        from_json(&plaintext)
    }

    /// Seal raw bytes into an envelope.
    pub fn seal_bytes(
        &self,
        plaintext: &[u8],
        passphrase: &SecretString,
    ) -> Result<String, VaultError> {
        match self.try_seal(plaintext, passphrase) {
            Ok(envelope) => {
                debug!(envelope_len = envelope.len(), "payload sealed");
                Ok(envelope)
            }
            Err(_) => {
                warn!("vault encryption failed");
                Err(VaultError::EncryptionFailure)
            }
        }
    }

    /// Open an envelope into raw bytes, zeroed on drop.
    pub fn open_bytes(
        &self,
        envelope: &str,
        passphrase: &SecretString,
    ) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        match self.try_open(envelope, passphrase) {
            Ok(plaintext) => Ok(plaintext),
            Err(_) => {
                debug!("vault decryption failed");
                Err(VaultError::DecryptionFailure)
            }
        }
    }

    fn try_seal(&self, plaintext: &[u8], passphrase: &SecretString) -> Result<String, VaultError> {
        let salt: [u8; SALT_LEN] = random_array(&self.random)?;
        let iv: [u8; IV_LEN] = random_array(&self.random)?;
        let key = self
            .kdf
            .derive_key(passphrase.expose_secret().as_bytes(), &salt);
        let sealed = self.cipher.seal(&key, &iv, plaintext)?;
        Ok(Envelope { salt, iv, sealed }.encode())
    }

    fn try_open(
        &self,
        envelope: &str,
        passphrase: &SecretString,
    ) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let Envelope { salt, iv, sealed } = Envelope::decode(envelope)?;
        let key = self
            .kdf
            .derive_key(passphrase.expose_secret().as_bytes(), &salt);
        self.cipher.open(&key, &iv, &sealed)
    }
}

impl<R, K, C> VaultEngine<R, K, C>
where
    R: SecureRandomSource + Clone + 'static,
    K: KeyDerivationProvider + Clone + 'static,
    C: AeadCipher + Clone + 'static,
{
    /// [`encrypt`](Self::encrypt) with key derivation moved onto tokio's
    /// blocking pool. Serialization happens on the calling task.
    pub async fn encrypt_async<T>(
        &self,
        data: &T,
        passphrase: &SecretString,
    ) -> Result<String, VaultError>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = to_json(data)?;
        let passphrase = detach(passphrase);
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.seal_bytes(&plaintext, &passphrase))
            .await
            .map_err(|_| VaultError::EncryptionFailure)?
    }

    /// [`decrypt`](Self::decrypt) with key derivation moved onto tokio's
    /// blocking pool.
    pub async fn decrypt_async<T>(
        &self,
        envelope: &str,
        passphrase: &SecretString,
    ) -> Result<T, VaultError>
    where
        T: DeserializeOwned,
    {
        let envelope = envelope.to_owned();
        let passphrase = detach(passphrase);
        let engine = self.clone();
        let plaintext =
            tokio::task::spawn_blocking(move || engine.open_bytes(&envelope, &passphrase))
                .await
                .map_err(|_| VaultError::DecryptionFailure)??;
        from_json(&plaintext)
    }
}

/// Encrypt with the production engine.
pub fn encrypt_data<T>(data: &T, passphrase: &SecretString) -> Result<String, VaultError>
where
    T: Serialize + ?Sized,
{
    VaultEngine::new().encrypt(data, passphrase)
}

/// Decrypt with the production engine.
pub fn decrypt_data<T>(envelope: &str, passphrase: &SecretString) -> Result<T, VaultError>
where
    T: DeserializeOwned,
{
    VaultEngine::new().decrypt(envelope, passphrase)
}

fn to_json<T: Serialize + ?Sized>(data: &T) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    serde_json::to_vec(data)
        .map(Zeroizing::new)
        .map_err(|_| {
            warn!("vault encryption failed: payload is not serializable");
            VaultError::EncryptionFailure
        })
}

fn from_json<T: DeserializeOwned>(plaintext: &[u8]) -> Result<T, VaultError> {
    serde_json::from_slice(plaintext).map_err(|_| {
        debug!("vault decryption failed");
        VaultError::DecryptionFailure
    })
}

/// An owned copy of the passphrase for a blocking task.
fn detach(passphrase: &SecretString) -> SecretString {
    SecretString::from(passphrase.expose_secret().to_owned())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;

    /// Emits 0, 1, 2, ... so salt = 0..16 and IV = 16..28 on a fresh engine.
    #[derive(Debug, Clone, Default)]
    struct CountingRandom(Arc<AtomicU8>);

    impl SecureRandomSource for CountingRandom {
        fn fill(&self, dest: &mut [u8]) -> Result<(), VaultError> {
            for byte in dest {
                *byte = self.0.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone)]
    struct BrokenRandom;

    impl SecureRandomSource for BrokenRandom {
        fn fill(&self, _dest: &mut [u8]) -> Result<(), VaultError> {
            Err(VaultError::DecryptionFailure)
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct ApiKey {
        service: String,
        name: String,
        value: String,
    }

    fn api_key() -> ApiKey {
        ApiKey {
            service: "OpenAI".into(),
            name: "prod-key".into(),
            value: "sk-test-123".into(),
        }
    }

    fn pass(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn one_round() -> Pbkdf2Sha256 {
        Pbkdf2Sha256::with_iterations(NonZeroU32::new(1).unwrap())
    }

    // Produced by an independent PBKDF2 + AES-GCM implementation with
    // salt = 00..0f, iv = 10..1b and JSON {"service":..,"name":..,"value":..}.
    const REFERENCE_ONE_ROUND: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaG2BJ1MUibj19E8V35vDFx0lkAI4rly8cUQnrjM+sNjH+AAf6RL5ccLX/iY9YIDS046M+HB3u7pcCyg8rv5GXCPTBRPeWePRUuoPF1Ck=";
    const REFERENCE_FULL: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaG1CKtefNhySwYvq4adYPZ2cKNCOzsKb6PENG0w3BrIYAe7awEwu9Q1Zls9ERn9v1mMaL2Jme2j+6N1NCWxu2y42VgrDtJnhadk3xI/E=";

    #[test]
    fn scripted_randomness_reproduces_reference_envelope() {
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        let envelope = engine
            .encrypt(&api_key(), &pass("correct-horse-battery-staple"))
            .unwrap();
        assert_eq!(envelope, REFERENCE_ONE_ROUND);
    }

    #[test]
    fn production_parameters_reproduce_reference_envelope() {
        let engine = VaultEngine::with_components(
            CountingRandom::default(),
            Pbkdf2Sha256::new(),
            Aes256Gcm,
        );
        let envelope = engine
            .encrypt(&api_key(), &pass("correct-horse-battery-staple"))
            .unwrap();
        assert_eq!(envelope, REFERENCE_FULL);
    }

    #[test]
    fn reference_envelope_decrypts_with_default_engine() {
        let decoded: ApiKey =
            decrypt_data(REFERENCE_FULL, &pass("correct-horse-battery-staple")).unwrap();
        assert_eq!(decoded, api_key());
    }

    #[test]
    fn broken_random_source_is_an_encryption_failure() {
        let engine = VaultEngine::with_components(BrokenRandom, one_round(), Aes256Gcm);
        assert_eq!(
            engine.encrypt(&api_key(), &pass("p")).unwrap_err(),
            VaultError::EncryptionFailure
        );
    }

    #[test]
    fn unserializable_payload_is_an_encryption_failure() {
        use std::collections::HashMap;
        // JSON object keys must be strings.
        let mut map = HashMap::new();
        map.insert(vec![1u8], "x");
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        assert_eq!(
            engine.encrypt(&map, &pass("p")).unwrap_err(),
            VaultError::EncryptionFailure
        );
    }

    #[test]
    fn payload_of_wrong_shape_is_a_decryption_failure() {
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        let envelope = engine.encrypt(&vec![1, 2, 3], &pass("p")).unwrap();
        assert_eq!(
            engine.decrypt::<ApiKey>(&envelope, &pass("p")).unwrap_err(),
            VaultError::DecryptionFailure
        );
    }

    #[test]
    fn seal_and_open_raw_bytes() {
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        let envelope = engine.seal_bytes(b"\x00\xffraw", &pass("p")).unwrap();
        let opened = engine.open_bytes(&envelope, &pass("p")).unwrap();
        assert_eq!(opened.as_slice(), b"\x00\xffraw");
    }

    #[tokio::test]
    async fn async_forms_roundtrip() {
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        let envelope = engine
            .encrypt_async(&api_key(), &pass("async-pass"))
            .await
            .unwrap();
        let decoded: ApiKey = engine
            .decrypt_async(&envelope, &pass("async-pass"))
            .await
            .unwrap();
        assert_eq!(decoded, api_key());

        let err = engine
            .decrypt_async::<ApiKey>(&envelope, &pass("other"))
            .await
            .unwrap_err();
        assert_eq!(err, VaultError::DecryptionFailure);
    }

    #[test]
    #[tracing_test::traced_test]
    fn failed_decrypt_logs_the_event_but_not_the_passphrase() {
        let engine = VaultEngine::with_components(CountingRandom::default(), one_round(), Aes256Gcm);
        let envelope = engine.encrypt(&api_key(), &pass("hunter2-sealing")).unwrap();
        let _ = engine.decrypt::<ApiKey>(&envelope, &pass("hunter2-guess"));

        assert!(logs_contain("vault decryption failed"));
        assert!(!logs_contain("hunter2"));
        assert!(!logs_contain("sk-test-123"));
    }
}
