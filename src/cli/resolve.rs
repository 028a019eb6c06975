//! Resolution of per-invocation inputs.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use tracing::debug;

use crate::core::config::Settings;
use crate::core::domain::Password;
use crate::error::{ConfigError, Result};

/// Load settings for the base directory given on the command line.
pub fn settings(base_dir: Option<PathBuf>) -> Result<Settings> {
    let settings = Settings::load(base_dir)?;
    debug!(base_dir = %settings.base_dir().display(), "settings resolved");
    Ok(settings)
}

/// Vault password from the flag/env value, or an interactive prompt.
///
/// `confirm` asks twice; use it when creating new vault files.
///
/// # Errors
///
/// Returns `ConfigError::MissingParameter` when no password is given and
/// stdin is not a terminal.
pub fn password(given: Option<String>, confirm: bool) -> Result<Password> {
    if let Some(password) = given {
        return Password::new(password);
    }

    if !io::stdin().is_terminal() {
        return Err(ConfigError::MissingParameter {
            field: "vault password",
        }
        .into());
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Vault password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm vault password", "passwords do not match");
    }
    Password::new(prompt.interact()?)
}
