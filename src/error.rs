//! Error types for kpas.
//!
//! Each area of the crate has its own error enum; all of them fold into
//! [`Error`] so library functions can return a single [`Result`].
//! [`Error::kind`] maps every error onto the coarse taxonomy used by the
//! command line to pick hints and by tests to assert failure classes.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of every error the crate can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid parameter, malformed template or config file.
    Configuration,
    /// A repository or cluster with this name already exists.
    AlreadyExists,
    /// A repository or file that was asked for does not exist.
    NotFound,
    /// Wrong vault password.
    Authentication,
    /// Corrupt or unrecognised vault file.
    Format,
    /// Git or network failure.
    ExternalOperation,
    /// Filesystem failure.
    Io,
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::Template(_) => ErrorKind::Configuration,
            Error::Vault(e) => e.kind(),
            Error::Repository(e) => e.kind(),
            Error::Provision(e) => e.kind(),
            Error::Io(_) | Error::Json(_) | Error::Prompt(_) => ErrorKind::Io,
        }
    }
}

/// Configuration and parameter errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to determine home directory (set KPAS_HOME or --base-dir)")]
    NoHomeDir,

    #[error("missing required parameter: {field}")]
    MissingParameter { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Template definition and rendering errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("malformed template '{template}': {source}")]
    Malformed {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("unknown template '{0}'")]
    Unknown(String),

    #[error("template '{template}' is missing a required parameter: {source}")]
    MissingParameter {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render template '{template}': {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Vault encryption and decryption errors.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("vault password must not be empty")]
    EmptyPassword,

    #[error("decryption failed: wrong vault password or tampered file")]
    Authentication,

    #[error("invalid vault file: {0}")]
    Format(String),
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::EmptyPassword => ErrorKind::Configuration,
            VaultError::Authentication => ErrorKind::Authentication,
            VaultError::Format(_) => ErrorKind::Format,
        }
    }
}

/// Repository lifecycle errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("a repository named '{name}' already exists at {}", .path.display())]
    AlreadyExists { name: String, path: PathBuf },

    #[error("no repository named '{0}'")]
    NotFound(String),

    #[error("invalid repository name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("git {operation} failed: {source}")]
    Git {
        operation: &'static str,
        #[source]
        source: git2::Error,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            RepositoryError::NotFound(_) => ErrorKind::NotFound,
            RepositoryError::InvalidName { .. } => ErrorKind::Configuration,
            RepositoryError::Git { .. } => ErrorKind::ExternalOperation,
            RepositoryError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Build a closure that wraps a git2 error for `operation`.
    pub(crate) fn git(operation: &'static str) -> impl FnOnce(git2::Error) -> Self {
        move |source| RepositoryError::Git { operation, source }
    }
}

/// Cluster provisioning errors.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("cluster '{cluster}' already exists at {}", .path.display())]
    ClusterExists { cluster: String, path: PathBuf },

    #[error("failed to write artifact {artifact} (staged before failure: {}; nothing was written): {source}", staged_list(.staged))]
    Artifact {
        artifact: String,
        staged: Vec<String>,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to move cluster into place at {}: {source}", .path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvisionError::ClusterExists { .. } => ErrorKind::AlreadyExists,
            ProvisionError::Artifact { source, .. } => source.kind(),
            ProvisionError::Commit { .. } => ErrorKind::Io,
        }
    }
}

fn staged_list(staged: &[String]) -> String {
    if staged.is_empty() {
        "none".to_string()
    } else {
        staged.join(", ")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
