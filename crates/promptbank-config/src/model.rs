// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for PromptBank.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level PromptBank configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptBankConfig {
    /// Secret store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Vault passphrase policy.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Secret store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding encrypted envelopes.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("promptbank").join("promptbank.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("promptbank.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Vault passphrase policy.
///
/// Key derivation parameters are deliberately absent: they are part of the
/// envelope wire format and cannot change without breaking stored secrets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Minimum passphrase length (in characters) required when storing a
    /// secret. `0` disables the check.
    #[serde(default)]
    pub min_passphrase_length: usize,

    /// Environment variable consulted for the passphrase before prompting.
    ///
    /// A `PROMPTBANK_STORAGE_*`, `PROMPTBANK_VAULT_*` or `PROMPTBANK_LOGGING_*`
    /// name would also be read as a config override, so pick one outside
    /// those (the default `PROMPTBANK_VAULT_KEY` is special-cased).
    #[serde(default = "default_passphrase_env")]
    pub passphrase_env: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            min_passphrase_length: 0,
            passphrase_env: default_passphrase_env(),
        }
    }
}

fn default_passphrase_env() -> String {
    "PROMPTBANK_VAULT_KEY".to_string()
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format written to stderr.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// `level` trimmed and lowercased, as validated and as handed to the
    /// log filter.
    pub fn normalized_level(&self) -> String {
        self.level.trim().to_ascii_lowercase()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
