// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the PromptBank configuration system.

use promptbank_config::diagnostic::ConfigError;
use promptbank_config::model::{LogFormat, PromptBankConfig};
use promptbank_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[storage]
database_path = "/tmp/promptbank-test.db"
wal_mode = false

[vault]
min_passphrase_length = 12
passphrase_env = "MY_VAULT_PASS"

[logging]
level = "debug"
format = "json"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.database_path, "/tmp/promptbank-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.vault.min_passphrase_length, 12);
    assert_eq!(config.vault.passphrase_env, "MY_VAULT_PASS");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("empty config is valid");
    let defaults = PromptBankConfig::default();
    assert_eq!(config.storage.database_path, defaults.storage.database_path);
    assert!(config.storage.wal_mode);
    assert_eq!(config.vault.min_passphrase_length, 0);
    assert_eq!(config.vault.passphrase_env, "PROMPTBANK_VAULT_KEY");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = r#"
[logging]
levl = "debug"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key,
                suggestion,
                span,
                ..
            } => Some((key.clone(), suggestion.clone(), *span)),
            _ => None,
        })
        .expect("an UnknownKey diagnostic");
    assert_eq!(unknown.0, "levl");
    assert_eq!(unknown.1.as_deref(), Some("level"));
    assert!(unknown.2.is_some(), "inline source should yield a span");
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[vault]
min_passphrase_length = "twelve"
"#;
    let errors = load_and_validate_str(toml).expect_err("string is not a usize");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))));
}

#[test]
fn unknown_log_format_is_rejected() {
    let toml = r#"
[logging]
format = "xml"
"#;
    assert!(load_and_validate_str(toml).is_err());
}

#[test]
fn semantic_validation_runs_after_parsing() {
    let toml = r#"
[logging]
level = "chatty"
"#;
    let errors = load_and_validate_str(toml).expect_err("invalid level");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("chatty"))));
}

#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("promptbank.toml");
    std::fs::write(
        &path,
        r#"
[storage]
database_path = "/var/lib/promptbank/vault.db"
"#,
    )
    .unwrap();

    let config = load_and_validate_path(&path).expect("file config is valid");
    assert_eq!(config.storage.database_path, "/var/lib/promptbank/vault.db");
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml"))
        .expect_err("explicit file must exist");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("absent.toml")));
}
