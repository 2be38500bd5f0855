// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::PromptBankConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `vault.min_passphrase_length`.
pub const MAX_MIN_PASSPHRASE_LENGTH: usize = 1024;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or every collected error
/// (does not fail fast).
pub fn validate_config(config: &PromptBankConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.logging.normalized_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.vault.passphrase_env.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.passphrase_env must not be empty".to_string(),
        });
    }

    if config.vault.min_passphrase_length > MAX_MIN_PASSPHRASE_LENGTH {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.min_passphrase_length must be at most {MAX_MIN_PASSPHRASE_LENGTH}, got {}",
                config.vault.min_passphrase_length
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
