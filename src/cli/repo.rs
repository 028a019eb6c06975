//! Repository commands.

use tracing::info;

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::repository::RepositoryStore;
use crate::error::Result;

/// Create a new repository.
pub fn init(settings: &Settings, name: &str, remote: &str) -> Result<()> {
    let store = RepositoryStore::new(settings.repos_dir());
    let path = store.create(name, remote)?;

    output::success(&format!(
        "created repository {} at {}",
        name,
        output::path(path.display())
    ));
    output::dimmed(&format!("origin is {}; push when ready", remote));
    Ok(())
}

/// Clone an existing repository.
pub fn add(settings: &Settings, name: &str, remote: &str) -> Result<()> {
    let store = RepositoryStore::new(settings.repos_dir());
    let path = store.clone(name, remote)?;

    info!(repository = name, "added");
    output::success(&format!(
        "cloned {} into {}",
        remote,
        output::path(path.display())
    ));
    Ok(())
}

/// List local repositories.
pub fn list(settings: &Settings, json: bool) -> Result<()> {
    let store = RepositoryStore::new(settings.repos_dir());
    let repos = store.list()?;

    if json {
        let result = serde_json::json!({
            "repositories": serde_json::to_value(&repos)?,
            "count": repos.len()
        });
        let mut text = serde_json::to_string_pretty(&result)?;
        text.push('\n');
        output::data(text.as_bytes())?;
    } else if repos.is_empty() {
        output::dimmed("no repositories");
    } else {
        output::blank();
        output::header(&format!("{} repositories", output::count(repos.len())));
        output::rule();
        for repo in &repos {
            output::header(&repo.name);
            output::kv("path:  ", output::path(repo.path.display()));
            output::kv("origin:", repo.origin.as_deref().unwrap_or("-"));
            if let (Some(head), Some(summary)) = (&repo.head, &repo.summary) {
                output::kv("head:  ", format!("{} {}", &head[..head.len().min(8)], summary));
            }
        }
    }

    Ok(())
}
