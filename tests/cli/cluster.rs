//! Tests for `kpas cluster generate`.

use crate::support::*;

#[test]
fn test_generate_hcloud_cluster() {
    let t = Test::with_repo("teamA");

    let output = t.generate("teamA", "prod", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "generated cluster prod");
    assert_stdout_contains(&output, "provider_vault.yml (vault)");

    let dir = t.cluster_path("teamA", "prod");
    for artifact in HCLOUD_ARTIFACTS {
        assert!(dir.join(artifact).is_file(), "{} missing", artifact);
    }

    let inventory = std::fs::read_to_string(dir.join("inventory/inventory.yml")).unwrap();
    assert_eq!(inventory.matches("kpas_cluster_name == 'prod'").count(), 5);

    assert_vault_file(&dir.join("provider_vault.yml"), HCLOUD_TOKEN);
    assert_vault_file(&dir.join("shared_vault.yml"), BASE_DOMAIN);

    let values = assert_yaml(&dir.join("provider_values.yml"));
    assert_eq!(values["global_hetzner"]["ssh_keys"][0].as_str(), Some(SSH_KEY));
    assert_yaml(&dir.join("shared_values.yml"));
    assert_yaml(&dir.join("inventory/inventory.yml"));
}

#[test]
fn test_generated_vault_decrypts_with_password() {
    let t = Test::with_cluster("teamA");
    let vault = t.cluster_path("teamA", "prod").join("provider_vault.yml");

    let output = t.vault_view(&vault, PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "vault_global_hetzner_api_token: tok123");
}

#[test]
fn test_generate_twice_fails_and_keeps_first() {
    let t = Test::with_cluster("teamA");
    let vault = t.cluster_path("teamA", "prod").join("shared_vault.yml");
    let before = std::fs::read(&vault).unwrap();

    let output = t.generate("teamA", "prod", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cluster 'prod' already exists");
    assert_eq!(std::fs::read(&vault).unwrap(), before);
}

#[test]
fn test_generate_into_missing_repository() {
    let t = Test::new();

    let output = t.generate("nope", "prod", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no repository named 'nope'");
    assert_stderr_contains(&output, "kpas repo list");
}

#[test]
fn test_generate_without_password_fails_when_not_interactive() {
    let t = Test::with_repo("teamA");

    let output = t
        .cmd()
        .args(["cluster", "generate", "hcloud", "teamA", "prod"])
        .args(["--hcloud-api-token", HCLOUD_TOKEN])
        .args(["--ssh-key-name", SSH_KEY])
        .args(["--base-domain", BASE_DOMAIN])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required parameter: vault password");
    assert!(!t.cluster_path("teamA", "prod").exists());
}

#[test]
fn test_generate_reads_password_and_token_from_env() {
    let t = Test::with_repo("teamA");

    let output = t
        .cmd()
        .env("KPAS_VAULT_PASSWORD", "from-env")
        .env("HCLOUD_TOKEN", "env-token")
        .args(["cluster", "generate", "hcloud", "teamA", "prod"])
        .args(["--ssh-key-name", SSH_KEY])
        .args(["--base-domain", BASE_DOMAIN])
        .output()
        .unwrap();
    assert_success(&output);

    let vault = t.cluster_path("teamA", "prod").join("provider_vault.yml");
    let output = t.vault_view(&vault, "from-env");
    assert_success(&output);
    assert_stdout_contains(&output, "env-token");
}

#[test]
fn test_generate_uses_config_defaults() {
    let t = Test::with_repo("teamA");
    std::fs::write(
        t.base.path().join("kpas.toml"),
        "[defaults]\nbase_domain = \"configured.io\"\nssh_key_name = \"cfg-key\"\n",
    )
    .unwrap();

    let output = t
        .cmd()
        .args(["cluster", "generate", "hcloud", "teamA", "prod"])
        .args(["--hcloud-api-token", HCLOUD_TOKEN])
        .args(["--vault-password", PASSWORD])
        .output()
        .unwrap();
    assert_success(&output);

    let dir = t.cluster_path("teamA", "prod");
    let values = assert_yaml(&dir.join("provider_values.yml"));
    assert_eq!(values["global_hetzner"]["ssh_keys"][0].as_str(), Some("cfg-key"));

    let output = t.vault_view(&dir.join("shared_vault.yml"), PASSWORD);
    assert_stdout_contains(&output, "vault_global_base_domain: configured.io");
}

#[test]
fn test_generate_missing_base_domain() {
    let t = Test::with_repo("teamA");

    let output = t
        .cmd()
        .args(["cluster", "generate", "hcloud", "teamA", "prod"])
        .args(["--hcloud-api-token", HCLOUD_TOKEN])
        .args(["--ssh-key-name", SSH_KEY])
        .args(["--vault-password", PASSWORD])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required parameter: base domain");
}

#[test]
fn test_generate_with_cloudflare() {
    let t = Test::with_repo("teamA");

    let output = t.generate(
        "teamA",
        "prod",
        &["--cloudflare-api-token", "cf-token", "--cloudflare-zone-id", "zone-1"],
    );
    assert_success(&output);

    let dir = t.cluster_path("teamA", "prod");
    let values = assert_yaml(&dir.join("shared_values.yml"));
    assert_eq!(values["global_cloudflare"]["enable"].as_bool(), Some(true));
    assert!(!std::fs::read_to_string(dir.join("shared_values.yml"))
        .unwrap()
        .contains("cf-token"));

    let output = t.vault_view(&dir.join("shared_vault.yml"), PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "vault_global_cloudflare_api_token: cf-token");
    assert_stdout_contains(&output, "vault_global_cloudflare_zone_identifier: zone-1");
}

#[test]
fn test_cloudflare_token_requires_zone() {
    let t = Test::with_repo("teamA");

    let output = t.generate("teamA", "prod", &["--cloudflare-api-token", "cf-token"]);
    assert_failure(&output);
    assert!(!t.cluster_path("teamA", "prod").exists());
}

#[test]
fn test_generate_rejects_invalid_cluster_name() {
    let t = Test::with_repo("teamA");

    let output = t.generate("teamA", "Prod'", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid value for cluster name");
    assert!(!t.cluster_path("teamA", "Prod'").exists());
}

#[test]
fn test_generate_server_layout() {
    let t = Test::with_repo("teamA");

    let output = t.generate(
        "teamA",
        "prod",
        &["--master-count", "3", "--worker-type", "cx51", "--k3s-multimaster"],
    );
    assert_success(&output);

    let dir = t.cluster_path("teamA", "prod");
    let values = assert_yaml(&dir.join("provider_values.yml"));
    assert_eq!(values["global_hetzner"]["master_count"].as_u64(), Some(3));
    assert_eq!(values["global_hetzner"]["worker_type"].as_str(), Some("cx51"));

    let shared = assert_yaml(&dir.join("shared_values.yml"));
    assert_eq!(shared["k3s"]["multimaster"].as_bool(), Some(true));
}
