//! Built-in templates and the artifact set of each provider.

use crate::core::domain::{ArtifactSpec, Provider};

/// A named template and the secrets it consumes.
///
/// Every name in `secrets` gets a fresh random value per render, available
/// to the template as `secrets.<name>`.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    pub name: &'static str,
    pub source: &'static str,
    pub secrets: &'static [&'static str],
}

pub const HCLOUD_INVENTORY: &str = "hcloud/inventory.yml";
pub const HCLOUD_PROVIDER_VAULT: &str = "hcloud/provider_vault.yml";
pub const HCLOUD_PROVIDER_VALUES: &str = "hcloud/provider_values.yml";
pub const SHARED_VAULT: &str = "shared/vault.yml";
pub const SHARED_VALUES: &str = "shared/values.yml";

/// Every template shipped with kpas.
pub const TEMPLATES: &[TemplateSpec] = &[
    TemplateSpec {
        name: HCLOUD_INVENTORY,
        source: include_str!("templates/hcloud/inventory.yml.j2"),
        secrets: &[],
    },
    TemplateSpec {
        name: HCLOUD_PROVIDER_VAULT,
        source: include_str!("templates/hcloud/provider_vault.yml.j2"),
        secrets: &[],
    },
    TemplateSpec {
        name: HCLOUD_PROVIDER_VALUES,
        source: include_str!("templates/hcloud/provider_values.yml.j2"),
        secrets: &[],
    },
    TemplateSpec {
        name: SHARED_VAULT,
        source: include_str!("templates/shared/vault.yml.j2"),
        secrets: &[
            "basic_auth_password",
            "grafana_password",
            "drone_bearer_token",
            "gitea_admin_password",
            "k3s_shared_secret",
        ],
    },
    TemplateSpec {
        name: SHARED_VALUES,
        source: include_str!("templates/shared/values.yml.j2"),
        secrets: &[],
    },
];

const HCLOUD_ARTIFACTS: &[ArtifactSpec] = &[
    ArtifactSpec {
        path: "inventory/inventory.yml",
        template: HCLOUD_INVENTORY,
        sensitive: false,
    },
    ArtifactSpec {
        path: "provider_vault.yml",
        template: HCLOUD_PROVIDER_VAULT,
        sensitive: true,
    },
    ArtifactSpec {
        path: "shared_vault.yml",
        template: SHARED_VAULT,
        sensitive: true,
    },
    ArtifactSpec {
        path: "provider_values.yml",
        template: HCLOUD_PROVIDER_VALUES,
        sensitive: false,
    },
    ArtifactSpec {
        path: "shared_values.yml",
        template: SHARED_VALUES,
        sensitive: false,
    },
];

/// Files generated for a cluster on `provider`, in write order.
pub fn artifact_set(provider: Provider) -> &'static [ArtifactSpec] {
    match provider {
        Provider::Hcloud => HCLOUD_ARTIFACTS,
    }
}
