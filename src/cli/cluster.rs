//! Cluster commands.
//!
//! Builds a fully-populated [`ClusterParameters`] from the command line
//! and `kpas.toml` defaults, then hands it to the provisioner.

use tracing::debug;

use crate::cli::{output, resolve, CommonArgs, HcloudArgs};
use crate::core::config::{Defaults, Settings};
use crate::core::domain::{
    ClusterParameters, CommonParameters, HcloudParameters, ProviderParameters, DEFAULT_VARIANT,
};
use crate::core::provision::{ClusterProvisioner, ProvisionReport};
use crate::core::repository::RepositoryStore;
use crate::core::template::TemplateEngine;
use crate::error::{ConfigError, Result};

/// Generate a Hetzner Cloud cluster.
pub fn generate_hcloud(settings: &Settings, args: HcloudArgs) -> Result<()> {
    let HcloudArgs {
        common,
        hcloud_api_token,
        ssh_key_name,
        master_count,
        worker_count,
        master_type,
        worker_type,
    } = args;

    let ssh_key_name = ssh_key_name
        .or_else(|| settings.defaults.ssh_key_name.clone())
        .ok_or(ConfigError::MissingParameter {
            field: "ssh key name",
        })?;
    let mut hcloud = HcloudParameters::new(hcloud_api_token, ssh_key_name);
    hcloud.master_count = master_count;
    hcloud.worker_count = worker_count;
    hcloud.master_type = master_type;
    hcloud.worker_type = worker_type;

    let repository = common.repository.clone();
    let given_password = common.vault_password.clone();
    let params = ClusterParameters::new(
        common_parameters(common, &settings.defaults)?,
        ProviderParameters::Hcloud(hcloud),
    )?;
    debug!(?params, "parameters assembled");

    let store = RepositoryStore::new(settings.repos_dir());
    // Fail on a missing repository before prompting for a password.
    store.open(&repository)?;

    let password = resolve::password(given_password, true)?;
    let provisioner = ClusterProvisioner::new(store, TemplateEngine::new()?);
    let report = provisioner.provision(&repository, &params, &password)?;

    print_report(&report);
    Ok(())
}

/// Merge command-line options with config defaults.
fn common_parameters(args: CommonArgs, defaults: &Defaults) -> Result<CommonParameters> {
    let base_domain = args
        .base_domain
        .or_else(|| defaults.base_domain.clone())
        .ok_or(ConfigError::MissingParameter {
            field: "base domain",
        })?;
    let variant = args
        .variant
        .or_else(|| defaults.variant.clone())
        .unwrap_or_else(|| DEFAULT_VARIANT.to_string());
    let letsencrypt_production =
        args.letsencrypt_production || defaults.letsencrypt_production.unwrap_or(false);

    let mut common = CommonParameters::new(args.cluster, base_domain)
        .variant(variant)
        .letsencrypt_production(letsencrypt_production)
        .k3s_multimaster(args.k3s_multimaster);
    if let (Some(token), Some(zone)) = (args.cloudflare_api_token, args.cloudflare_zone_id) {
        common = common.cloudflare(token, zone);
    }
    Ok(common)
}

fn print_report(report: &ProvisionReport) {
    output::success(&format!(
        "generated cluster {} in {}",
        report.cluster,
        output::path(report.path.display())
    ));
    for artifact in &report.artifacts {
        if artifact.encrypted {
            output::list_item(&format!("{} (vault)", artifact.path));
        } else {
            output::list_item(&artifact.path);
        }
    }
    output::hint("review the files, then commit and push the repository");
}
