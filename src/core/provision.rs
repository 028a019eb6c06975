//! Cluster provisioning.
//!
//! Generates the artifact set of one cluster into `<repository>/<cluster>/`.
//! Every artifact is rendered and sealed before anything touches the disk;
//! the sealed files are then written into a staging directory inside the
//! repository and moved into place with one rename. Either the whole
//! cluster directory appears or nothing does.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::core::domain::{Artifact, ClusterParameters, Password, SealedArtifact};
use crate::core::repository::RepositoryStore;
use crate::core::template::{artifact_set, TemplateEngine};
use crate::core::vault::{AnsibleVault, Codec};
use crate::error::{Error, ProvisionError, Result};

const STAGING_PREFIX: &str = ".kpas-staging-";

/// One file written by [`ClusterProvisioner::provision`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    /// Path relative to the cluster directory.
    pub path: String,
    pub encrypted: bool,
}

/// Result of a successful provisioning call.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub repository: String,
    pub cluster: String,
    /// The new cluster directory.
    pub path: PathBuf,
    pub artifacts: Vec<WrittenArtifact>,
}

/// Orchestrates cluster generation.
pub struct ClusterProvisioner<C = AnsibleVault> {
    store: RepositoryStore,
    engine: TemplateEngine,
    codec: C,
}

impl ClusterProvisioner<AnsibleVault> {
    /// Provisioner writing Ansible Vault 1.1 files.
    pub fn new(store: RepositoryStore, engine: TemplateEngine) -> Self {
        Self::with_codec(store, engine, AnsibleVault)
    }
}

impl<C: Codec> ClusterProvisioner<C> {
    pub fn with_codec(store: RepositoryStore, engine: TemplateEngine, codec: C) -> Self {
        Self {
            store,
            engine,
            codec,
        }
    }

    /// Generate cluster `params.cluster_name()` in `repository`.
    ///
    /// Nothing is committed; the new files are left for the user to review.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the repository does not exist
    /// - `ProvisionError::ClusterExists` if the cluster directory exists
    /// - `ProvisionError::Artifact` naming the artifact that failed to
    ///   render, encrypt or write; no cluster directory is left behind
    /// - `ProvisionError::Commit` if the final rename fails
    pub fn provision(
        &self,
        repository: &str,
        params: &ClusterParameters,
        password: &Password,
    ) -> Result<ProvisionReport> {
        let cluster = params.cluster_name();
        let provider = params.provider().provider();

        self.store.open(repository)?;
        let repo_dir = self.store.path_of(repository);
        let cluster_dir = repo_dir.join(cluster);
        if cluster_dir.exists() {
            return Err(ProvisionError::ClusterExists {
                cluster: cluster.to_string(),
                path: cluster_dir,
            }
            .into());
        }

        info!(
            repository,
            cluster,
            %provider,
            codec = self.codec.name(),
            "provisioning cluster"
        );

        let sealed = self.prepare(params, password)?;
        write_all(&repo_dir, &cluster_dir, &sealed)?;

        let artifacts = sealed
            .iter()
            .map(|a| WrittenArtifact {
                path: a.path().to_string(),
                encrypted: a.is_encrypted(),
            })
            .collect();

        info!(repository, cluster, path = %cluster_dir.display(), "cluster generated");
        Ok(ProvisionReport {
            repository: repository.to_string(),
            cluster: cluster.to_string(),
            path: cluster_dir,
            artifacts,
        })
    }

    /// Render and seal every artifact, in memory.
    fn prepare(&self, params: &ClusterParameters, password: &Password) -> Result<Vec<SealedArtifact>> {
        let specs = artifact_set(params.provider().provider());
        let mut sealed: Vec<SealedArtifact> = Vec::with_capacity(specs.len());

        for spec in specs {
            let result = self
                .engine
                .render(spec.template, params)
                .and_then(|content| Artifact::new(*spec, content).seal(&self.codec, password));

            match result {
                Ok(artifact) => {
                    debug!(
                        artifact = artifact.path(),
                        encrypted = artifact.is_encrypted(),
                        "artifact prepared"
                    );
                    sealed.push(artifact);
                }
                Err(source) => return Err(artifact_error(spec.path, &sealed, source)),
            }
        }

        Ok(sealed)
    }
}

/// Write `sealed` under a staging directory in `repo_dir`, then rename the
/// staging directory to `cluster_dir`.
fn write_all(repo_dir: &Path, cluster_dir: &Path, sealed: &[SealedArtifact]) -> Result<()> {
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(repo_dir)?;
    debug!(path = %staging.path().display(), "staging directory created");

    for (i, artifact) in sealed.iter().enumerate() {
        let target = staging.path().join(artifact.path());
        let written = target
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&target, artifact.bytes()));

        if let Err(source) = written {
            return Err(artifact_error(artifact.path(), &sealed[..i], source.into()));
        }
        debug!(artifact = artifact.path(), "artifact staged");
    }

    fs::rename(staging.path(), cluster_dir).map_err(|source| ProvisionError::Commit {
        path: cluster_dir.to_path_buf(),
        source,
    })?;
    // The staging path is gone after the rename; dropping the guard is a no-op.
    drop(staging);

    Ok(())
}

fn artifact_error(artifact: &str, staged: &[SealedArtifact], source: Error) -> Error {
    ProvisionError::Artifact {
        artifact: artifact.to_string(),
        staged: staged.iter().map(|a| a.path().to_string()).collect(),
        source: Box::new(source),
    }
    .into()
}
