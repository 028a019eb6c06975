//! Local configuration repositories.
//!
//! Every repository is a git working tree at `<base>/repos/<name>`. A name
//! maps to exactly one directory and creation never overwrites: the
//! directory is claimed with a single `create_dir`, so a second `create` or
//! `clone` for the same name fails without touching the first one.

mod git;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::validation;
use crate::error::{RepositoryError, Result};

/// One entry of [`RepositoryStore::list`].
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub path: PathBuf,
    pub origin: Option<String>,
    /// Head commit id, `None` for an empty repository.
    pub head: Option<String>,
    pub summary: Option<String>,
    /// Head commit time, RFC 3339.
    pub time: Option<String>,
}

/// Manages the repositories under one root directory.
#[derive(Debug, Clone)]
pub struct RepositoryStore {
    root: PathBuf,
}

impl RepositoryStore {
    /// Store rooted at `root` (normally `<base>/repos`). The directory is
    /// created on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the repository `name` lives in, whether or not it exists.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }

    /// Create a new repository with remote `origin` set to `remote`.
    ///
    /// The repository gets a `.gitignore` excluding decrypted kubeconfigs
    /// and one initial commit with a fixed author and timestamp, so its id
    /// is the same on every machine.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::AlreadyExists` if the directory exists,
    /// `RepositoryError::InvalidName` for a bad name, or
    /// `RepositoryError::Git` if any git step fails. On a git failure the
    /// half-built directory is removed.
    pub fn create(&self, name: &str, remote: &str) -> Result<PathBuf> {
        validation::validate_repository_name(name)?;
        validation::validate_required("remote url", remote)?;

        let path = self.claim(name)?;
        info!(repository = name, path = %path.display(), "creating repository");

        match git::init(&path, remote) {
            Ok(commit) => {
                info!(repository = name, %commit, "repository created");
                Ok(path)
            }
            Err(e) => {
                discard(&path);
                Err(e)
            }
        }
    }

    /// Clone `remote` as repository `name`.
    ///
    /// Nothing is decrypted; vault files stay as they are in the remote.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::AlreadyExists` if the directory exists or
    /// `RepositoryError::Git` if the clone fails, in which case the
    /// directory is removed again.
    pub fn clone(&self, name: &str, remote: &str) -> Result<PathBuf> {
        validation::validate_repository_name(name)?;
        validation::validate_required("remote url", remote)?;

        let path = self.claim(name)?;
        info!(repository = name, remote, "cloning repository");

        match git::clone(remote, &path) {
            Ok(repo) => {
                let head = git::head_commit(&repo)
                    .ok()
                    .flatten()
                    .map(|c| c.id().to_string());
                info!(repository = name, head = ?head, "repository cloned");
                Ok(path)
            }
            Err(e) => {
                discard(&path);
                Err(e)
            }
        }
    }

    /// Open an existing repository.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no such repository.
    pub fn open(&self, name: &str) -> Result<git2::Repository> {
        validation::validate_repository_name(name)?;
        let path = self.path_of(name);
        if !path.is_dir() {
            return Err(RepositoryError::NotFound(name.to_string()).into());
        }
        let repo = git2::Repository::open(&path).map_err(RepositoryError::git("open"))?;
        Ok(repo)
    }

    /// All repositories under the root, sorted by name.
    ///
    /// Directories that are not git repositories are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the root cannot be read.
    pub fn list(&self) -> Result<Vec<RepositorySummary>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(RepositoryError::Io {
                    path: self.root.clone(),
                    source,
                }
                .into())
            }
        };

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepositoryError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !path.is_dir() || validation::validate_repository_name(&name).is_err() {
                continue;
            }

            let repo = match git2::Repository::open(&path) {
                Ok(repo) => repo,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping non-repository");
                    continue;
                }
            };

            let head = git::head_commit(&repo)?;
            out.push(RepositorySummary {
                origin: git::origin_url(&repo),
                head: head.as_ref().map(|c| c.id().to_string()),
                summary: head
                    .as_ref()
                    .and_then(|c| c.summary().map(str::to_string)),
                time: head.as_ref().and_then(|c| {
                    chrono::DateTime::from_timestamp(c.time().seconds(), 0)
                        .map(|t| t.to_rfc3339())
                }),
                name,
                path,
            });
        }

        out.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = out.len(), "repositories listed");
        Ok(out)
    }

    /// Atomically create the directory for `name`.
    fn claim(&self, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|source| RepositoryError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_of(name);
        match fs::create_dir(&path) {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(RepositoryError::AlreadyExists {
                    name: name.to_string(),
                    path,
                }
                .into())
            }
            Err(source) => Err(RepositoryError::Io { path, source }.into()),
        }
    }
}

/// Remove a directory this process claimed; the original error wins.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_dir_all(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove partial repository");
        }
    }
}
