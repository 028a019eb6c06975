//! Domain types.

mod artifact;
mod cluster;
mod password;

pub use artifact::{Artifact, ArtifactSpec, SealedArtifact};
pub use cluster::{
    CloudflareDns, ClusterParameters, CommonParameters, HcloudParameters, Provider,
    ProviderParameters, DEFAULT_VARIANT,
};
pub use password::Password;
