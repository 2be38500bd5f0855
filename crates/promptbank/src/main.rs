// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PromptBank - passphrase-encrypted storage for API keys.
//!
//! This is the binary entry point.

mod crypt;
mod secret;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptbank_config::model::{LogFormat, LoggingConfig, PromptBankConfig};
use promptbank_config::ConfigError;
use promptbank_core::{PromptBankError, VaultError};

/// PromptBank - passphrase-encrypted storage for API keys.
#[derive(Parser, Debug)]
#[command(name = "promptbank", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a JSON value into an envelope.
    Encrypt {
        /// JSON to encrypt. Read from stdin when omitted.
        #[arg(long)]
        data: Option<String>,
    },
    /// Decrypt an envelope and print its JSON.
    Decrypt {
        /// Envelope to decrypt. Read from stdin when omitted.
        envelope: Option<String>,
    },
    /// Manage stored secrets.
    #[command(subcommand)]
    Secret(secret::SecretCommand),
}

/// Exit status for a decryption failure, so scripts can re-prompt.
const EXIT_DECRYPTION_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            promptbank_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    let result = match cli.command {
        Commands::Encrypt { data } => crypt::run_encrypt(&config, data).await,
        Commands::Decrypt { envelope } => crypt::run_decrypt(&config, envelope).await,
        Commands::Secret(command) => secret::run_secret(&config, command).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PromptBankConfig, Vec<ConfigError>> {
    match path {
        Some(path) => promptbank_config::load_and_validate_path(path),
        None => promptbank_config::load_and_validate(),
    }
}

fn exit_code(err: &PromptBankError) -> i32 {
    match err {
        PromptBankError::Vault(VaultError::DecryptionFailure) => EXIT_DECRYPTION_FAILURE,
        _ => 1,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let level = logging.normalized_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("promptbank={level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
