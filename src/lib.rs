//! kpas - bootstrap git-backed configuration repositories for Kubernetes
//! clusters.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── repo          # init / add / list repositories
//! │   ├── cluster       # generate cluster artifacts
//! │   ├── vault         # view / encrypt vault files
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # base directory and kpas.toml
//!     ├── domain/       # parameter records, artifacts, passwords
//!     ├── template/     # artifact templates and renderer
//!     ├── vault/        # Ansible Vault 1.1 codec
//!     ├── repository/   # git-backed repository store
//!     └── provision     # cluster generation
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kpas::core::domain::{
//!     ClusterParameters, CommonParameters, HcloudParameters, Password, ProviderParameters,
//! };
//! use kpas::core::provision::ClusterProvisioner;
//! use kpas::core::repository::RepositoryStore;
//! use kpas::core::template::TemplateEngine;
//!
//! # fn main() -> kpas::error::Result<()> {
//! let store = RepositoryStore::new("/tmp/kpas/repos");
//! store.create("teamA", "git@example.com:teamA.git")?;
//!
//! let params = ClusterParameters::new(
//!     CommonParameters::new("prod", "example.com"),
//!     ProviderParameters::Hcloud(HcloudParameters::new("token", "deploy-key")),
//! )?;
//! let provisioner = ClusterProvisioner::new(store, TemplateEngine::new()?);
//! provisioner.provision("teamA", &params, &Password::new("pw")?)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
