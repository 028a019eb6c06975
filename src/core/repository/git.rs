//! git2 plumbing for the repository store.

use std::fs;
use std::path::Path;

use git2::build::RepoBuilder;
use git2::{
    Commit, Cred, CredentialType, ErrorCode, FetchOptions, Oid, RemoteCallbacks, Repository,
    RepositoryInitOptions, Signature, Time,
};
use tracing::{debug, trace};

use crate::core::constants::{
    COMMIT_EMAIL, COMMIT_NAME, GITIGNORE_ENTRIES, INITIAL_BRANCH, INITIAL_COMMIT_MESSAGE,
    INITIAL_COMMIT_TIME, ORIGIN,
};
use crate::error::{RepositoryError, Result};

/// Credential attempts before giving up; libgit2 retries the callback
/// indefinitely when a credential is rejected.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Content of the `.gitignore` written into new repositories.
pub(super) fn gitignore() -> String {
    let mut out = String::new();
    for entry in GITIGNORE_ENTRIES {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Initialise a repository in the empty directory `path` with remote
/// `origin`, a `.gitignore` and a single reproducible commit.
pub(super) fn init(path: &Path, remote: &str) -> Result<Oid> {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(INITIAL_BRANCH);
    let repo = Repository::init_opts(path, &opts).map_err(RepositoryError::git("init"))?;

    repo.remote(ORIGIN, remote)
        .map_err(RepositoryError::git("remote add"))?;

    let ignore_path = path.join(".gitignore");
    fs::write(&ignore_path, gitignore()).map_err(|source| RepositoryError::Io {
        path: ignore_path,
        source,
    })?;

    let mut index = repo.index().map_err(RepositoryError::git("index"))?;
    index
        .add_path(Path::new(".gitignore"))
        .map_err(RepositoryError::git("add"))?;
    index.write().map_err(RepositoryError::git("add"))?;
    let tree_id = index.write_tree().map_err(RepositoryError::git("write-tree"))?;
    let tree = repo
        .find_tree(tree_id)
        .map_err(RepositoryError::git("write-tree"))?;

    let when = Time::new(INITIAL_COMMIT_TIME, 0);
    let signature =
        Signature::new(COMMIT_NAME, COMMIT_EMAIL, &when).map_err(RepositoryError::git("commit"))?;
    let oid = repo
        .commit(
            Some("HEAD"),
            &signature,
            &signature,
            INITIAL_COMMIT_MESSAGE,
            &tree,
            &[],
        )
        .map_err(RepositoryError::git("commit"))?;

    debug!(commit = %oid, "initial commit created");
    Ok(oid)
}

/// Clone `url` into the empty directory `path`.
///
/// SSH remotes authenticate through the SSH agent; everything else uses
/// libgit2's default credentials.
pub(super) fn clone(url: &str, path: &Path) -> Result<Repository> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }
        if allowed_types.contains(CredentialType::SSH_KEY) {
            Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
        } else if allowed_types.contains(CredentialType::DEFAULT) {
            Cred::default()
        } else {
            Err(git2::Error::from_str("unsupported authentication type"))
        }
    });

    callbacks.transfer_progress(|stats| {
        if stats.received_objects() == stats.total_objects() {
            trace!(
                indexed = stats.indexed_deltas(),
                total = stats.total_deltas(),
                "resolving deltas"
            );
        } else {
            trace!(
                received = stats.received_objects(),
                total = stats.total_objects(),
                bytes = stats.received_bytes(),
                "receiving objects"
            );
        }
        true
    });

    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch);

    let repo = builder
        .clone(url, path)
        .map_err(RepositoryError::git("clone"))?;
    Ok(repo)
}

/// Head commit of `repo`, or `None` for an unborn branch.
pub(super) fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => {
            let commit = head
                .peel_to_commit()
                .map_err(RepositoryError::git("rev-parse HEAD"))?;
            Ok(Some(commit))
        }
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(RepositoryError::git("rev-parse HEAD")(e).into()),
    }
}

/// URL of the `origin` remote, if one is configured.
pub(super) fn origin_url(repo: &Repository) -> Option<String> {
    repo.find_remote(ORIGIN)
        .ok()
        .and_then(|r| r.url().map(str::to_string))
}
