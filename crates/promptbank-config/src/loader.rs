// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./promptbank.toml` > `~/.config/promptbank/promptbank.toml`
//! > `/etc/promptbank/promptbank.toml`, with environment variable overrides via the
//! `PROMPTBANK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PromptBankConfig;

pub(crate) const LOCAL_CONFIG_FILE: &str = "promptbank.toml";
pub(crate) const SYSTEM_CONFIG_FILE: &str = "/etc/promptbank/promptbank.toml";

/// Location of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("promptbank").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/promptbank/promptbank.toml`
/// 3. `~/.config/promptbank/promptbank.toml`
/// 4. `./promptbank.toml`
/// 5. `PROMPTBANK_*` environment variables
pub fn load_config() -> Result<PromptBankConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PromptBankConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptBankConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PromptBankConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptBankConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PromptBankConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Config sections that may be overridden from the environment.
const ENV_SECTIONS: &[&str] = &["storage", "vault", "logging"];

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::filter_map()` rather than `Env::split("_")` so that
/// underscore-containing keys survive: `PROMPTBANK_VAULT_MIN_PASSPHRASE_LENGTH`
/// must map to `vault.min_passphrase_length`, not `vault.min.passphrase.length`.
fn env_provider() -> Env {
    Env::prefixed("PROMPTBANK_").filter_map(|key| env_key(key.as_str()).map(Into::into))
}

/// Map a prefix-stripped variable name to a dotted config key.
///
/// figment lowercases keys only after this runs, so the raw name may be in
/// any case. Names outside a known section are not configuration and are
/// skipped, as is `VAULT_KEY`, which carries the passphrase itself.
pub(crate) fn env_key(raw: &str) -> Option<String> {
    let key = raw.to_ascii_lowercase();
    if key == "vault_key" {
        return None;
    }
    ENV_SECTIONS.iter().find_map(|section| {
        key.strip_prefix(*section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|field| !field.is_empty())
            .map(|field| format!("{section}.{field}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PROMPTBANK_STORAGE_DATABASE_PATH", "/tmp/jail.db");
            jail.set_env("PROMPTBANK_VAULT_MIN_PASSPHRASE_LENGTH", "12");
            jail.set_env("PROMPTBANK_LOGGING_LEVEL", "debug");

            let config = load_config()?;
            assert_eq!(config.storage.database_path, "/tmp/jail.db");
            assert_eq!(config.vault.min_passphrase_length, 12);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn env_key_maps_upper_case_names_into_sections() {
        assert_eq!(env_key("LOGGING_LEVEL").as_deref(), Some("logging.level"));
        assert_eq!(env_key("STORAGE_WAL_MODE").as_deref(), Some("storage.wal_mode"));
        assert_eq!(
            env_key("VAULT_MIN_PASSPHRASE_LENGTH").as_deref(),
            Some("vault.min_passphrase_length")
        );
        assert_eq!(env_key("logging_format").as_deref(), Some("logging.format"));
    }

    #[test]
    fn env_key_skips_names_outside_sections() {
        assert_eq!(env_key("VAULT_KEY"), None);
        assert_eq!(env_key("SECRET"), None);
        assert_eq!(env_key("LOGGING"), None);
        assert_eq!(env_key("LOGGING_"), None);
        assert_eq!(env_key("VAULTED_THING"), None);
    }

    #[test]
    fn every_section_accepts_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PROMPTBANK_STORAGE_WAL_MODE", "false");
            jail.set_env("PROMPTBANK_LOGGING_FORMAT", "json");
            jail.set_env("PROMPTBANK_VAULT_PASSPHRASE_ENV", "MY_PASS");

            let config = load_config()?;
            assert!(!config.storage.wal_mode);
            assert_eq!(config.logging.format, crate::model::LogFormat::Json);
            assert_eq!(config.vault.passphrase_env, "MY_PASS");
            Ok(())
        });
    }

    #[test]
    fn unrelated_promptbank_variables_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PROMPTBANK_SECRET", "hunter2-hunter2");
            let config = load_config()?;
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn passphrase_env_var_is_not_configuration() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PROMPTBANK_VAULT_KEY", "hunter2-hunter2");
            let config = load_config()?;
            assert_eq!(config.vault.passphrase_env, "PROMPTBANK_VAULT_KEY");
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[storage]
wal_mode = false
"#,
            )?;
            let config = load_config()?;
            assert!(!config.storage.wal_mode);
            Ok(())
        });
    }
}
