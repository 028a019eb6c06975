//! Cluster parameter records.
//!
//! A [`ClusterParameters`] value is assembled once per provisioning call from
//! the common settings and exactly one provider's settings. Construction
//! validates every field, so a value that exists is complete; it is never
//! mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Variant used when none is given.
pub const DEFAULT_VARIANT: &str = "k3s";

/// Infrastructure provider tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Hcloud,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Hcloud => "hcloud",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloudflare DNS integration settings.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CloudflareDns {
    pub api_token: String,
    pub zone_identifier: String,
}

impl fmt::Debug for CloudflareDns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareDns")
            .field("api_token", &"***")
            .field("zone_identifier", &self.zone_identifier)
            .finish()
    }
}

/// Settings shared by every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonParameters {
    pub cluster_name: String,
    pub variant: String,
    pub base_domain: String,
    /// DNS integration; `None` disables it.
    pub cloudflare: Option<CloudflareDns>,
    pub letsencrypt_production: bool,
    pub k3s_multimaster: bool,
}

impl CommonParameters {
    /// Common parameters with the default variant and every option off.
    pub fn new(cluster_name: impl Into<String>, base_domain: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            variant: DEFAULT_VARIANT.to_string(),
            base_domain: base_domain.into(),
            cloudflare: None,
            letsencrypt_production: false,
            k3s_multimaster: false,
        }
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn cloudflare(mut self, api_token: impl Into<String>, zone: impl Into<String>) -> Self {
        self.cloudflare = Some(CloudflareDns {
            api_token: api_token.into(),
            zone_identifier: zone.into(),
        });
        self
    }

    pub fn letsencrypt_production(mut self, enabled: bool) -> Self {
        self.letsencrypt_production = enabled;
        self
    }

    pub fn k3s_multimaster(mut self, enabled: bool) -> Self {
        self.k3s_multimaster = enabled;
        self
    }

    fn validate(&self) -> Result<()> {
        validation::validate_cluster_name(&self.cluster_name)?;
        validation::validate_required("base domain", &self.base_domain)?;
        validation::validate_required("variant", &self.variant)?;
        if !self
            .variant
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::InvalidValue {
                field: "variant",
                reason: format!("'{}' may only contain lowercase letters, digits and '-'", self.variant),
            }
            .into());
        }
        if let Some(dns) = &self.cloudflare {
            validation::validate_required("cloudflare api token", &dns.api_token)?;
            validation::validate_required("cloudflare zone identifier", &dns.zone_identifier)?;
        }
        Ok(())
    }
}

/// Hetzner Cloud settings.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct HcloudParameters {
    pub api_token: String,
    pub ssh_key_name: String,
    pub master_count: u32,
    pub worker_count: u32,
    pub master_type: String,
    pub worker_type: String,
}

impl HcloudParameters {
    pub const DEFAULT_MASTER_COUNT: u32 = 1;
    pub const DEFAULT_WORKER_COUNT: u32 = 3;
    pub const DEFAULT_MASTER_TYPE: &'static str = "cx11";
    pub const DEFAULT_WORKER_TYPE: &'static str = "cx41";

    /// Hetzner parameters with the default server layout.
    pub fn new(api_token: impl Into<String>, ssh_key_name: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ssh_key_name: ssh_key_name.into(),
            master_count: Self::DEFAULT_MASTER_COUNT,
            worker_count: Self::DEFAULT_WORKER_COUNT,
            master_type: Self::DEFAULT_MASTER_TYPE.to_string(),
            worker_type: Self::DEFAULT_WORKER_TYPE.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::validate_required("hcloud api token", &self.api_token)?;
        validation::validate_required("ssh key name", &self.ssh_key_name)?;
        validation::validate_required("master type", &self.master_type)?;
        validation::validate_required("worker type", &self.worker_type)?;
        if self.master_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "master count",
                reason: "a cluster needs at least one master".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for HcloudParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HcloudParameters")
            .field("api_token", &"***")
            .field("ssh_key_name", &self.ssh_key_name)
            .field("master_count", &self.master_count)
            .field("worker_count", &self.worker_count)
            .field("master_type", &self.master_type)
            .field("worker_type", &self.worker_type)
            .finish()
    }
}

/// Provider-specific settings, one variant per provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderParameters {
    Hcloud(HcloudParameters),
}

impl ProviderParameters {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderParameters::Hcloud(_) => Provider::Hcloud,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ProviderParameters::Hcloud(p) => p.validate(),
        }
    }
}

/// The complete, validated input for one provisioning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterParameters {
    common: CommonParameters,
    provider: ProviderParameters,
}

impl ClusterParameters {
    /// Validate and combine common and provider parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first missing or invalid field.
    pub fn new(common: CommonParameters, provider: ProviderParameters) -> Result<Self> {
        common.validate()?;
        provider.validate()?;
        Ok(Self { common, provider })
    }

    pub fn common(&self) -> &CommonParameters {
        &self.common
    }

    pub fn provider(&self) -> &ProviderParameters {
        &self.provider
    }

    pub fn cluster_name(&self) -> &str {
        &self.common.cluster_name
    }
}
