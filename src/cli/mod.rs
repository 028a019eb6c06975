//! Command-line interface.

pub mod cluster;
pub mod completions;
pub mod output;
pub mod repo;
pub mod resolve;
pub mod vault;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants::BASE_DIR_ENV;
use crate::core::domain::HcloudParameters;

/// Environment variable holding the vault password.
pub const VAULT_PASSWORD_ENV: &str = "KPAS_VAULT_PASSWORD";

/// kpas - bootstrap configuration repositories for Kubernetes clusters.
#[derive(Parser)]
#[command(
    name = "kpas",
    about = "Bootstrap git-backed configuration repositories for Kubernetes clusters",
    version
)]
pub struct Cli {
    /// Base directory (default: ~/.kpas2)
    #[arg(long, global = true, env = BASE_DIR_ENV, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage local repositories
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// Manage clusters in a repository
    Cluster {
        #[command(subcommand)]
        action: ClusterAction,
    },

    /// Work with vault-encrypted files
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Repository subcommands.
#[derive(Subcommand)]
pub enum RepoAction {
    /// Create a new repository
    Init {
        /// Repository name
        name: String,
        /// Remote URL registered as origin
        remote: String,
    },

    /// Clone an existing repository
    Add {
        /// Repository name
        name: String,
        /// Remote URL to clone
        remote: String,
    },

    /// List local repositories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Cluster subcommands.
#[derive(Subcommand)]
pub enum ClusterAction {
    /// Generate the configuration of a new cluster
    Generate {
        #[command(subcommand)]
        provider: GenerateProvider,
    },
}

/// Providers `cluster generate` supports.
#[derive(Subcommand)]
pub enum GenerateProvider {
    /// Hetzner Cloud
    Hcloud(HcloudArgs),
}

/// Options shared by every provider.
#[derive(Args)]
pub struct CommonArgs {
    /// Repository to generate into
    pub repository: String,

    /// Cluster name
    pub cluster: String,

    /// Base domain for ingress (default from kpas.toml)
    #[arg(long)]
    pub base_domain: Option<String>,

    /// Kubernetes distribution
    #[arg(long)]
    pub variant: Option<String>,

    /// Cloudflare API token; enables DNS integration
    #[arg(long, requires = "cloudflare_zone_id")]
    pub cloudflare_api_token: Option<String>,

    /// Cloudflare zone identifier
    #[arg(long, requires = "cloudflare_api_token")]
    pub cloudflare_zone_id: Option<String>,

    /// Issue production Let's Encrypt certificates
    #[arg(long)]
    pub letsencrypt_production: bool,

    /// Run k3s with multiple masters
    #[arg(long)]
    pub k3s_multimaster: bool,

    /// Vault password (prompted for if omitted)
    #[arg(long, env = VAULT_PASSWORD_ENV, hide_env_values = true)]
    pub vault_password: Option<String>,
}

/// `cluster generate hcloud` options.
#[derive(Args)]
pub struct HcloudArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Hetzner Cloud API token
    #[arg(long, env = "HCLOUD_TOKEN", hide_env_values = true)]
    pub hcloud_api_token: String,

    /// Name of the SSH key registered in Hetzner Cloud (default from kpas.toml)
    #[arg(long)]
    pub ssh_key_name: Option<String>,

    /// Number of master servers
    #[arg(long, default_value_t = HcloudParameters::DEFAULT_MASTER_COUNT)]
    pub master_count: u32,

    /// Number of worker servers
    #[arg(long, default_value_t = HcloudParameters::DEFAULT_WORKER_COUNT)]
    pub worker_count: u32,

    /// Server type for masters
    #[arg(long, default_value = HcloudParameters::DEFAULT_MASTER_TYPE)]
    pub master_type: String,

    /// Server type for workers
    #[arg(long, default_value = HcloudParameters::DEFAULT_WORKER_TYPE)]
    pub worker_type: String,
}

/// Vault subcommands.
#[derive(Subcommand)]
pub enum VaultAction {
    /// Decrypt a vault file to stdout
    View {
        /// Vault file
        file: PathBuf,
        /// Vault password (prompted for if omitted)
        #[arg(long, env = VAULT_PASSWORD_ENV, hide_env_values = true)]
        vault_password: Option<String>,
    },

    /// Encrypt a plaintext file in place
    Encrypt {
        /// File to encrypt
        file: PathBuf,
        /// Vault password (prompted for if omitted)
        #[arg(long, env = VAULT_PASSWORD_ENV, hide_env_values = true)]
        vault_password: Option<String>,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    let Cli {
        base_dir, command, ..
    } = cli;

    match command {
        Command::Repo { action } => {
            let settings = resolve::settings(base_dir)?;
            match action {
                RepoAction::Init { name, remote } => repo::init(&settings, &name, &remote),
                RepoAction::Add { name, remote } => repo::add(&settings, &name, &remote),
                RepoAction::List { json } => repo::list(&settings, json),
            }
        }
        Command::Cluster { action } => {
            let settings = resolve::settings(base_dir)?;
            match action {
                ClusterAction::Generate { provider } => match provider {
                    GenerateProvider::Hcloud(args) => cluster::generate_hcloud(&settings, args),
                },
            }
        }
        Command::Vault { action } => match action {
            VaultAction::View {
                file,
                vault_password,
            } => vault::view(&file, vault_password),
            VaultAction::Encrypt {
                file,
                vault_password,
            } => vault::encrypt(&file, vault_password),
        },
        Command::Completions { shell } => completions::execute(shell),
    }
}
