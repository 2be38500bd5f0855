// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptbank secret` command implementation.
//!
//! Secrets live in the configured SQLite store as envelopes. Every command
//! that reads or writes a payload asks for the vault passphrase.

use std::sync::Arc;

use clap::Subcommand;
use promptbank_config::model::PromptBankConfig;
use promptbank_core::{PromptBankError, RecordId};
use promptbank_storage::SqliteSecretStore;
use promptbank_vault::prompt::read_secret_value;
use promptbank_vault::{
    read_new_passphrase, read_passphrase, SecretPayload, SecretSummary, SecretsWorkspace,
};
use secrecy::ExposeSecret;

use crate::crypt::to_pretty;

#[derive(Subcommand, Debug)]
pub enum SecretCommand {
    /// Encrypt and store a new secret.
    Add {
        /// Provider the key belongs to, e.g. "OpenAI".
        #[arg(long)]
        service: String,
        /// Label for this key.
        #[arg(long)]
        name: String,
        /// Secret value. Prompted for (hidden) when omitted.
        #[arg(long)]
        value: Option<String>,
    },
    /// List stored secrets with masked values, newest first.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print one secret in full.
    Show {
        id: String,
        /// Print JSON instead of plain lines.
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a stored secret. Omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Delete a stored secret.
    Delete { id: String },
}

/// Run a `promptbank secret` subcommand.
pub async fn run_secret(
    config: &PromptBankConfig,
    command: SecretCommand,
) -> Result<(), PromptBankError> {
    let store = SqliteSecretStore::open(&config.storage).await?;
    let workspace = SecretsWorkspace::new(Arc::new(store), &config.vault);
    let env_var = config.vault.passphrase_env.as_str();

    match command {
        SecretCommand::Add {
            service,
            name,
            value,
        } => {
            let value = match value {
                Some(value) => value,
                None => read_secret_value("Secret value")?.expose_secret().to_owned(),
            };
            let passphrase = read_new_passphrase(env_var)?;
            let id = workspace
                .add(&SecretPayload::new(service, name, value), &passphrase)
                .await?;
            println!("{id}");
        }
        SecretCommand::List { json } => {
            let passphrase = read_passphrase(env_var)?;
            let summaries = workspace.list(&passphrase).await?;
            if json {
                println!("{}", to_pretty(&summaries)?);
            } else {
                print_table(&summaries);
            }
        }
        SecretCommand::Show { id, json } => {
            let id = RecordId(id);
            let passphrase = read_passphrase(env_var)?;
            let payload = workspace
                .reveal(&id, &passphrase)
                .await?
                .ok_or_else(|| not_found(&id))?;
            if json {
                println!("{}", to_pretty(&payload)?);
            } else {
                println!("service: {}", payload.service);
                println!("name:    {}", payload.name);
                println!("value:   {}", payload.value);
            }
        }
        SecretCommand::Edit {
            id,
            service,
            name,
            value,
        } => {
            let id = RecordId(id);
            let passphrase = read_passphrase(env_var)?;
            let current = workspace
                .reveal(&id, &passphrase)
                .await?
                .ok_or_else(|| not_found(&id))?;
            let edited = apply_edit(current, service, name, value);
            workspace.update(&id, &edited, &passphrase).await?;
            eprintln!("updated {id}");
        }
        SecretCommand::Delete { id } => {
            let id = RecordId(id);
            if !workspace.delete(&id).await? {
                return Err(not_found(&id));
            }
            eprintln!("deleted {id}");
        }
    }
    Ok(())
}

fn apply_edit(
    current: SecretPayload,
    service: Option<String>,
    name: Option<String>,
    value: Option<String>,
) -> SecretPayload {
    SecretPayload {
        service: service.unwrap_or(current.service),
        name: name.unwrap_or(current.name),
        value: value.unwrap_or(current.value),
    }
}

fn not_found(id: &RecordId) -> PromptBankError {
    PromptBankError::NotFound(format!("secret {id}"))
}

fn print_table(summaries: &[SecretSummary]) {
    if summaries.is_empty() {
        println!("no secrets stored");
        return;
    }
    for summary in summaries {
        let added = summary.date_added.format("%Y-%m-%d");
        if summary.locked {
            println!("{}  {added}  {}", summary.id, summary.masked_value);
        } else {
            println!(
                "{}  {added}  {:<12} {:<20} {}",
                summary.id, summary.service, summary.name, summary.masked_value
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_keeps_omitted_fields() {
        let current = SecretPayload::new("OpenAI", "prod-key", "sk-old");
        let edited = apply_edit(current, None, Some("staging-key".into()), None);
        assert_eq!(edited, SecretPayload::new("OpenAI", "staging-key", "sk-old"));
    }

    #[test]
    fn edit_can_replace_everything() {
        let current = SecretPayload::new("OpenAI", "prod-key", "sk-old");
        let edited = apply_edit(
            current,
            Some("Anthropic".into()),
            Some("dev".into()),
            Some("sk-ant-new".into()),
        );
        assert_eq!(edited, SecretPayload::new("Anthropic", "dev", "sk-ant-new"));
    }
}
