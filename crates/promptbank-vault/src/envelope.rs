// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The envelope wire format.
//!
//! ```text
//! Base64( salt[16] || iv[12] || ciphertext || tag[16] )
//! ```
//!
//! Standard alphabet with padding, no length prefixes, no version byte.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use promptbank_core::VaultError;

use crate::cipher::IV_LEN;
use crate::kdf::SALT_LEN;

/// Bytes preceding the ciphertext: salt followed by IV.
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Standard alphabet, padding optional and trailing bits ignored on decode,
/// matching the forgiving decode of browsers' `atob`.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A decoded envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    /// Ciphertext with the authentication tag appended.
    pub sealed: Vec<u8>,
}

impl Envelope {
    /// Concatenate the parts and Base64-encode them.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.sealed.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.iv);
        buf.extend_from_slice(&self.sealed);
        STANDARD.encode(buf)
    }

    /// Parse an encoded envelope.
    ///
    /// Decoding is as forgiving as browsers' `atob`: ASCII whitespace anywhere
    /// is ignored and `=` padding may be omitted. Anything that is not Base64
    /// or decodes to fewer than
    /// [`HEADER_LEN`] bytes is a [`VaultError::DecryptionFailure`].
    pub fn decode(encoded: &str) -> Result<Self, VaultError> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let raw = FORGIVING
            .decode(compact.as_bytes())
            .map_err(|_| VaultError::DecryptionFailure)?;
        if raw.len() < HEADER_LEN {
            return Err(VaultError::DecryptionFailure);
        }

        let (salt, rest) = raw.split_at(SALT_LEN);
        let (iv, sealed) = rest.split_at(IV_LEN);
        Ok(Self {
            salt: salt.try_into().map_err(|_| VaultError::DecryptionFailure)?,
            iv: iv.try_into().map_err(|_| VaultError::DecryptionFailure)?,
            sealed: sealed.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            salt: std::array::from_fn(|i| i as u8),
            iv: std::array::from_fn(|i| 100 + i as u8),
            sealed: vec![0xAA; 20],
        }
    }

    #[test]
    fn layout_is_salt_then_iv_then_sealed() {
        let encoded = sample().encode();
        let raw = STANDARD.decode(&encoded).unwrap();
        assert_eq!(raw.len(), HEADER_LEN + 20);
        assert_eq!(&raw[..16], &sample().salt);
        assert_eq!(&raw[16..28], &sample().iv);
        assert_eq!(&raw[28..], &[0xAA; 20][..]);
    }

    #[test]
    fn decode_inverts_encode() {
        assert_eq!(Envelope::decode(&sample().encode()).unwrap(), sample());
    }

    #[test]
    fn header_only_envelope_decodes_with_empty_body() {
        let raw = [5u8; HEADER_LEN];
        let env = Envelope::decode(&STANDARD.encode(raw)).unwrap();
        assert!(env.sealed.is_empty());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let raw = [5u8; HEADER_LEN - 1];
        assert_eq!(
            Envelope::decode(&STANDARD.encode(raw)).unwrap_err(),
            VaultError::DecryptionFailure
        );
    }

    #[test]
    fn non_base64_is_rejected() {
        assert_eq!(
            Envelope::decode("not base64 at all!!").unwrap_err(),
            VaultError::DecryptionFailure
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(Envelope::decode("").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let encoded = format!("  {}\n", sample().encode());
        assert_eq!(Envelope::decode(&encoded).unwrap(), sample());
    }

    #[test]
    fn embedded_line_breaks_are_ignored() {
        let encoded = sample().encode();
        let wrapped = format!("{}\r\n{}", &encoded[..20], &encoded[20..]);
        assert_eq!(Envelope::decode(&wrapped).unwrap(), sample());
    }

    #[test]
    fn missing_padding_is_accepted() {
        let padded_sample = Envelope {
            sealed: vec![0xAA; 21],
            ..sample()
        };
        let encoded = padded_sample.encode();
        assert!(encoded.ends_with("=="));
        let unpadded = encoded.trim_end_matches('=');
        assert_eq!(Envelope::decode(unpadded).unwrap(), padded_sample);
    }

    #[test]
    fn encoding_keeps_padding() {
        let encoded = Envelope {
            sealed: vec![0xAA; 22],
            ..sample()
        }
        .encode();
        assert!(encoded.ends_with('='));
    }
}
