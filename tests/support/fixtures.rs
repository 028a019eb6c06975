//! Test fixtures and constants.

/// Remote registered for repositories created in tests.
pub const REMOTE: &str = "git@example.com:teamA.git";

/// Vault password used by the helpers.
pub const PASSWORD: &str = "pw";

pub const HCLOUD_TOKEN: &str = "tok123";
pub const SSH_KEY: &str = "mykey";
pub const BASE_DOMAIN: &str = "example.com";

/// Plaintext of [`ANSIBLE_VAULT_FIXTURE`].
pub const FIXTURE_PLAINTEXT: &str = "vault_global_hetzner_api_token: tok123\n";

/// Password of [`ANSIBLE_VAULT_FIXTURE`].
pub const FIXTURE_PASSWORD: &str = "correct horse";

/// A vault file produced independently of kpas with the Ansible Vault 1.1
/// algorithm (PBKDF2-SHA256, AES-256-CTR, HMAC-SHA256).
pub const ANSIBLE_VAULT_FIXTURE: &str = "\
$ANSIBLE_VAULT;1.1;AES256
63646331356165643662646565653834373438323331333634343033313431613962323235303830
3464323038323865656137643837663134663762393539330a643236343833623139336164366333
32396263646131313931653532373366633338316533373261323332363065383466613264613130
3632383264313831350a343965643464616361666437343433306264356439616561653766373734
66653039613432346233653031653964376538623733663835333464393039636166653866666662
6334626336366431353235633963333932326631393335666362
";

/// Artifacts of an `hcloud` cluster, relative to the cluster directory.
pub const HCLOUD_ARTIFACTS: &[&str] = &[
    "inventory/inventory.yml",
    "provider_vault.yml",
    "shared_vault.yml",
    "provider_values.yml",
    "shared_values.yml",
];
