// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition via environment variable or TTY prompt.

use std::io::IsTerminal;

use promptbank_core::PromptBankError;
use secrecy::SecretString;

/// Read the vault passphrase.
///
/// Priority:
/// 1. the environment variable named `env_var` (headless use), if non-empty
/// 2. an interactive hidden prompt on a TTY
pub fn read_passphrase(env_var: &str) -> Result<SecretString, PromptBankError> {
    if let Some(passphrase) = from_env(env_var) {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let passphrase = prompt_hidden("Vault passphrase: ")?;
        if passphrase.is_empty() {
            return Err(PromptBankError::InvalidInput(
                "empty passphrase not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(passphrase));
    }

    Err(no_source(env_var))
}

/// Read a passphrase for sealing new data, asking twice on a TTY.
///
/// The environment variable needs no confirmation.
pub fn read_new_passphrase(env_var: &str) -> Result<SecretString, PromptBankError> {
    if let Some(passphrase) = from_env(env_var) {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let first = prompt_hidden("Vault passphrase: ")?;
        let second = prompt_hidden("Confirm vault passphrase: ")?;
        if first != second {
            return Err(PromptBankError::InvalidInput(
                "passphrases do not match".to_string(),
            ));
        }
        if first.is_empty() {
            return Err(PromptBankError::InvalidInput(
                "empty passphrase not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(first));
    }

    Err(no_source(env_var))
}

/// Read a secret value without echoing it. Requires a TTY.
pub fn read_secret_value(label: &str) -> Result<SecretString, PromptBankError> {
    if !std::io::stdin().is_terminal() {
        return Err(PromptBankError::InvalidInput(format!(
            "{label} must be passed explicitly when not running interactively"
        )));
    }
    prompt_hidden(&format!("{label}: ")).map(SecretString::from)
}

fn from_env(env_var: &str) -> Option<SecretString> {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

fn prompt_hidden(prompt: &str) -> Result<String, PromptBankError> {
    rpassword::prompt_password(prompt)
        .map_err(|e| PromptBankError::Internal(format!("failed to read from terminal: {e}")))
}

fn no_source(env_var: &str) -> PromptBankError {
    PromptBankError::Config(format!(
        "no passphrase provided. Set the {env_var} environment variable or run interactively."
    ))
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serial_test::serial;

    use super::*;

    const TEST_VAR: &str = "PROMPTBANK_TEST_PROMPT_KEY";

    #[test]
    #[serial]
    fn passphrase_from_env_var() {
        // SAFETY: env mutation is confined to #[serial] tests.
        unsafe { std::env::set_var(TEST_VAR, "env-passphrase") };
        let result = read_passphrase(TEST_VAR);
        unsafe { std::env::remove_var(TEST_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "env-passphrase");
    }

    #[test]
    #[serial]
    fn new_passphrase_from_env_var_skips_confirmation() {
        unsafe { std::env::set_var(TEST_VAR, "env-passphrase") };
        let result = read_new_passphrase(TEST_VAR);
        unsafe { std::env::remove_var(TEST_VAR) };

        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn empty_env_var_without_tty_is_rejected() {
        unsafe { std::env::set_var(TEST_VAR, "") };
        // Test harness stdin is not a terminal.
        let result = read_passphrase(TEST_VAR);
        unsafe { std::env::remove_var(TEST_VAR) };

        let err = result.unwrap_err();
        assert!(err.to_string().contains(TEST_VAR));
    }

    #[test]
    fn secret_value_without_tty_is_rejected() {
        let err = read_secret_value("secret value").unwrap_err();
        assert!(matches!(err, PromptBankError::InvalidInput(_)));
    }
}
