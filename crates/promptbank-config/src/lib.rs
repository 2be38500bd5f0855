// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for PromptBank.
//!
//! Compiled defaults are overlaid by `promptbank.toml` files (system, user,
//! working directory) and then by `PROMPTBANK_*` environment variables.
//! Unknown keys are rejected; every problem found is returned as a
//! [`ConfigError`] ready for [`render_errors`].
//!
//! ```no_run
//! let config = match promptbank_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         promptbank_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! println!("secrets live in {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PromptBankConfig;

/// Named TOML text, used to point diagnostics at the offending line.
type Source = (String, String);

/// Load from the standard locations plus environment, then validate.
pub fn load_and_validate() -> Result<PromptBankConfig, Vec<ConfigError>> {
    checked(loader::load_config(), standard_sources)
}

/// Load one explicit file plus environment, then validate.
///
/// Unlike the standard locations, an explicit file must exist.
pub fn load_and_validate_path(path: &Path) -> Result<PromptBankConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file not found: {}",
            path.display()
        ))]);
    }
    checked(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load inline TOML (no files, no environment), then validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<PromptBankConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Run semantic validation on a parsed config, or translate the parse error.
///
/// Sources are only read when there is an error to annotate.
fn checked(
    parsed: Result<PromptBankConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<Source>,
) -> Result<PromptBankConfig, Vec<ConfigError>> {
    let config = parsed.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

fn standard_sources() -> Vec<Source> {
    let local = std::env::current_dir()
        .map(|dir| dir.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| PathBuf::from(loader::LOCAL_CONFIG_FILE));

    [
        Some(local),
        loader::user_config_path(),
        Some(PathBuf::from(loader::SYSTEM_CONFIG_FILE)),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| read_source(&path))
    .collect()
}

fn read_source(path: &Path) -> Option<Source> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| (path.display().to_string(), content))
}
