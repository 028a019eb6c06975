//! kpas - bootstrap configuration repositories for Kubernetes clusters.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kpas::cli::output;
use kpas::cli::{execute, Cli};
use kpas::error::{Error, ErrorKind, ProvisionError, RepositoryError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("KPAS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kpas=debug")
        } else {
            EnvFilter::new("kpas=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

/// Follow-up suggestion for errors the user can act on.
fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Repository(RepositoryError::NotFound(_)) => Some("run: kpas repo list"),
        Error::Repository(RepositoryError::AlreadyExists { .. }) => {
            Some("choose another name or remove the existing directory")
        }
        Error::Provision(ProvisionError::ClusterExists { .. }) => {
            Some("choose another cluster name; existing clusters are never overwritten")
        }
        _ => match e.kind() {
            ErrorKind::Authentication => Some("check the vault password"),
            ErrorKind::ExternalOperation => {
                Some("check the remote URL and that your SSH agent holds a key for it")
            }
            _ => None,
        },
    }
}
