// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptbank encrypt` and `promptbank decrypt` command implementation.
//!
//! Both commands take their input as an argument or, when it is omitted, from
//! stdin, so envelopes can be piped between invocations.

use std::io::Read;

use promptbank_config::model::PromptBankConfig;
use promptbank_core::PromptBankError;
use promptbank_vault::{read_new_passphrase, read_passphrase, VaultEngine};
use serde_json::Value;

/// Run `promptbank encrypt`. Prints the envelope on stdout.
pub async fn run_encrypt(
    config: &PromptBankConfig,
    data: Option<String>,
) -> Result<(), PromptBankError> {
    let raw = match data {
        Some(data) => data,
        None => read_stdin()?,
    };
    let value = parse_json(&raw)?;

    let passphrase = read_new_passphrase(&config.vault.passphrase_env)?;
    let envelope = VaultEngine::new().encrypt_async(&value, &passphrase).await?;
    println!("{envelope}");
    Ok(())
}

/// Run `promptbank decrypt`. Prints the payload as pretty JSON.
pub async fn run_decrypt(
    config: &PromptBankConfig,
    envelope: Option<String>,
) -> Result<(), PromptBankError> {
    let envelope = match envelope {
        Some(envelope) => envelope,
        None => read_stdin()?,
    };

    let passphrase = read_passphrase(&config.vault.passphrase_env)?;
    let value: Value = VaultEngine::new()
        .decrypt_async(envelope.trim(), &passphrase)
        .await?;
    println!("{}", to_pretty(&value)?);
    Ok(())
}

fn parse_json(raw: &str) -> Result<Value, PromptBankError> {
    serde_json::from_str(raw)
        .map_err(|e| PromptBankError::InvalidInput(format!("input is not valid JSON: {e}")))
}

pub(crate) fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, PromptBankError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PromptBankError::Internal(format!("failed to format output: {e}")))
}

fn read_stdin() -> Result<String, PromptBankError> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| PromptBankError::Internal(format!("failed to read stdin: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_accepts_any_value() {
        assert_eq!(parse_json("42").unwrap(), Value::from(42));
        assert_eq!(parse_json(" \"text\"\n").unwrap(), Value::from("text"));
    }

    #[test]
    fn parse_json_rejects_garbage() {
        let err = parse_json("{service: OpenAI}").unwrap_err();
        assert!(matches!(err, PromptBankError::InvalidInput(_)));
    }
}
