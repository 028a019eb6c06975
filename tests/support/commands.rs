//! Command helper methods for Test.

use super::{Test, BASE_DOMAIN, HCLOUD_TOKEN, PASSWORD, SSH_KEY};
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create a kpas command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - KPAS_HOME set to the temporary base directory
    /// - HOME set to the temporary home directory
    /// - NO_COLOR set, and inherited kpas variables removed
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kpas").expect("failed to find kpas binary");
        cmd.env("KPAS_HOME", self.base.path());
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("KPAS_VAULT_PASSWORD");
        cmd.env_remove("KPAS_LOG");
        cmd.env_remove("HCLOUD_TOKEN");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `kpas repo init`.
    pub fn repo_init(&self, name: &str, remote: &str) -> Output {
        self.cmd()
            .args(["repo", "init", name, remote])
            .output()
            .expect("failed to run kpas repo init")
    }

    /// Shortcut for `kpas repo add`.
    pub fn repo_add(&self, name: &str, remote: &str) -> Output {
        self.cmd()
            .args(["repo", "add", name, remote])
            .output()
            .expect("failed to run kpas repo add")
    }

    /// Shortcut for `kpas repo list`.
    pub fn repo_list(&self) -> Output {
        self.cmd()
            .args(["repo", "list"])
            .output()
            .expect("failed to run kpas repo list")
    }

    /// Shortcut for `kpas repo list --json`.
    pub fn repo_list_json(&self) -> Output {
        self.cmd()
            .args(["repo", "list", "--json"])
            .output()
            .expect("failed to run kpas repo list --json")
    }

    /// `kpas cluster generate hcloud` with the standard fixture values plus
    /// `extra` arguments.
    pub fn generate(&self, repo: &str, cluster: &str, extra: &[&str]) -> Output {
        self.cmd()
            .args(["cluster", "generate", "hcloud", repo, cluster])
            .args(["--hcloud-api-token", HCLOUD_TOKEN])
            .args(["--ssh-key-name", SSH_KEY])
            .args(["--base-domain", BASE_DOMAIN])
            .args(["--vault-password", PASSWORD])
            .args(extra)
            .output()
            .expect("failed to run kpas cluster generate")
    }

    /// Shortcut for `kpas vault view` with a password.
    pub fn vault_view(&self, file: &Path, password: &str) -> Output {
        self.cmd()
            .args(["vault", "view"])
            .arg(file)
            .args(["--vault-password", password])
            .output()
            .expect("failed to run kpas vault view")
    }

    /// Shortcut for `kpas vault encrypt` with a password.
    pub fn vault_encrypt(&self, file: &Path, password: &str) -> Output {
        self.cmd()
            .args(["vault", "encrypt"])
            .arg(file)
            .args(["--vault-password", password])
            .output()
            .expect("failed to run kpas vault encrypt")
    }
}
