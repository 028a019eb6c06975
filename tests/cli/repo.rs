//! Tests for `kpas repo`.

use crate::support::*;

#[test]
fn test_init_creates_repository() {
    let t = Test::new();

    let output = t.repo_init("teamA", REMOTE);
    assert_success(&output);
    assert_stdout_contains(&output, "created repository teamA");

    let path = t.repo_path("teamA");
    assert!(path.join(".git").is_dir());
    assert_eq!(
        std::fs::read_to_string(path.join(".gitignore")).unwrap(),
        "**/kubeconfs/*.yml\n"
    );

    let repo = git2::Repository::open(&path).unwrap();
    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    assert_eq!(walk.count(), 1);
}

#[test]
fn test_init_twice_fails_without_changes() {
    let t = Test::with_repo("teamA");
    let gitignore = t.repo_path("teamA").join(".gitignore");
    std::fs::write(&gitignore, "edited\n").unwrap();

    let output = t.repo_init("teamA", "git@example.com:other.git");
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_stderr_contains(&output, "choose another name");
    assert_eq!(std::fs::read_to_string(&gitignore).unwrap(), "edited\n");
}

#[test]
fn test_init_rejects_path_names() {
    let t = Test::new();

    let output = t.repo_init("../escape", REMOTE);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid repository name");
    assert!(!t.base.path().join("escape").exists());
}

#[test]
fn test_add_clones_existing_repository() {
    let t = Test::with_repo("upstream");
    let upstream = t.repo_path("upstream");

    let output = t.repo_add("teamB", upstream.to_str().unwrap());
    assert_success(&output);
    assert_stdout_contains(&output, "cloned");

    let a = git2::Repository::open(&upstream).unwrap();
    let b = git2::Repository::open(t.repo_path("teamB")).unwrap();
    assert_eq!(a.head().unwrap().target(), b.head().unwrap().target());
}

#[test]
fn test_add_keeps_vault_files_encrypted() {
    let t = Test::with_cluster("upstream");
    let upstream = t.repo_path("upstream");

    // Commit the generated cluster so the clone sees it.
    let repo = git2::Repository::open(&upstream).unwrap();
    let mut index = repo.index().unwrap();
    index
        .add_all(["prod"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().unwrap().peel_to_commit().unwrap();
    let sig = git2::Signature::now("test", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "add prod", &tree, &[&parent])
        .unwrap();

    let output = t.repo_add("teamB", upstream.to_str().unwrap());
    assert_success(&output);
    assert_vault_file(&t.cluster_path("teamB", "prod").join("provider_vault.yml"), HCLOUD_TOKEN);
}

#[test]
fn test_add_unreachable_remote_leaves_nothing() {
    let t = Test::new();
    let missing = t.dir.path().join("missing.git");

    let output = t.repo_add("teamA", missing.to_str().unwrap());
    assert_failure(&output);
    assert_stderr_contains(&output, "git clone failed");
    assert!(!t.repo_path("teamA").exists());
}

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.repo_list();
    assert_success(&output);
    assert_stdout_contains(&output, "no repositories");
}

#[test]
fn test_list_shows_repositories() {
    let t = Test::with_repo("teamA");
    assert_success(&t.repo_init("teamB", "https://example.com/teamB.git"));

    let output = t.repo_list();
    assert_success(&output);
    assert_stdout_contains(&output, "2 repositories");
    assert_stdout_contains(&output, "teamA");
    assert_stdout_contains(&output, "https://example.com/teamB.git");
    assert_stdout_contains(&output, "Initial Commit");
}

#[test]
fn test_list_json() {
    let t = Test::with_repo("teamA");

    let output = t.repo_list_json();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["repositories"][0]["name"], "teamA");
    assert_eq!(json["repositories"][0]["origin"], REMOTE);
    assert_eq!(json["repositories"][0]["summary"], "Initial Commit");
}
