//! Constants used throughout kpas.
//!
//! Centralizes magic strings and configuration values.

/// Default base directory relative to HOME (~/.kpas2).
pub const DEFAULT_BASE_DIR: &str = ".kpas2";

/// Environment variable overriding the base directory.
pub const BASE_DIR_ENV: &str = "KPAS_HOME";

/// Repositories live in `<base>/repos`.
pub const REPOS_DIR: &str = "repos";

/// Optional settings file in the base directory.
pub const CONFIG_FILE: &str = "kpas.toml";

/// Gitignore entries written into every new repository.
///
/// Decrypted kubeconfigs must never be committed.
pub const GITIGNORE_ENTRIES: &[&str] = &["**/kubeconfs/*.yml"];

/// Name of the tracked remote.
pub const ORIGIN: &str = "origin";

/// Branch created by `repo init`.
pub const INITIAL_BRANCH: &str = "main";

/// Author and committer of the initial commit.
pub const COMMIT_NAME: &str = "kpas";
pub const COMMIT_EMAIL: &str = "kpas@kpas.io";

/// Timestamp (seconds since the Unix epoch, UTC) of the initial commit.
///
/// Together with the fixed identity this makes the initial commit id
/// identical on every machine.
pub const INITIAL_COMMIT_TIME: i64 = 0;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial Commit";

/// Random bytes per generated secret (hex-encoded to twice as many chars).
pub const SECRET_BYTES: usize = 16;
