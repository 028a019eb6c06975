//! Settings management.
//!
//! Resolves the kpas base directory and reads the optional `kpas.toml`
//! stored in it. The file only supplies defaults for command-line options
//! the user left unset:
//!
//! ```toml
//! [defaults]
//! base_domain = "example.com"
//! variant = "k3s"
//! ssh_key_name = "deploy"
//! letsencrypt_production = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `kpas.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Fallback values for `cluster generate`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub base_domain: Option<String>,
    pub variant: Option<String>,
    pub ssh_key_name: Option<String>,
    pub letsencrypt_production: Option<bool>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    base_dir: PathBuf,
    pub defaults: Defaults,
}

impl Settings {
    /// Resolve the base directory and load `kpas.toml` if present.
    ///
    /// The base directory is `base_dir` if given, else `$KPAS_HOME`, else
    /// `~/.kpas2`. A missing config file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if no base directory can be
    /// determined, or `ConfigError::ReadFile`/`ConfigError::Parse` for an
    /// unreadable or malformed config file.
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = resolve_base_dir(
            base_dir,
            std::env::var_os(constants::BASE_DIR_ENV).map(PathBuf::from),
            dirs::home_dir(),
        )?;
        Self::load_from(base_dir)
    }

    /// Load settings rooted at an already-resolved base directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load_from(base_dir: PathBuf) -> Result<Self> {
        let path = base_dir.join(constants::CONFIG_FILE);
        debug!(path = %path.display(), "loading config");

        let file = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| {
                ConfigError::ReadFile {
                    path: path.clone(),
                    source,
                }
            })?;
            let file: ConfigFile = toml::from_str(&contents)
                .map_err(|source| ConfigError::Parse { path, source })?;
            debug!(defaults = ?file.defaults, "config loaded");
            file
        } else {
            debug!("no config file, using built-in defaults");
            ConfigFile::default()
        };

        Ok(Self {
            base_dir,
            defaults: file.defaults,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding all local repositories.
    pub fn repos_dir(&self) -> PathBuf {
        self.base_dir.join(constants::REPOS_DIR)
    }
}

/// Pick the base directory: explicit, then environment, then home.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` when all three are absent.
pub fn resolve_base_dir(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = explicit.or(from_env).filter(|p| !p.as_os_str().is_empty()) {
        return Ok(dir);
    }
    home.map(|h| h.join(constants::DEFAULT_BASE_DIR))
        .ok_or_else(|| ConfigError::NoHomeDir.into())
}
