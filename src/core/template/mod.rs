//! Artifact templates.
//!
//! Turns a [`ClusterParameters`](crate::core::domain::ClusterParameters)
//! record into the files of a cluster. Templates use `${...}` for
//! substitution so the `{{ ... }}` references Ansible resolves later are
//! emitted verbatim:
//!
//! - `${ cluster.* }` - common parameters
//! - `${ provider.<provider>.* }` - provider parameters
//! - `${ provider_name }` - provider tag
//! - `${ secrets.<name> }` - fresh random secret declared by the template
//! - `{% if %}...{% endif %}` - conditionals
//! - `${ value | yaml }` - YAML scalar escaping

mod catalog;
mod engine;
mod filters;

pub use catalog::{
    artifact_set, TemplateSpec, HCLOUD_INVENTORY, HCLOUD_PROVIDER_VALUES, HCLOUD_PROVIDER_VAULT,
    SHARED_VALUES, SHARED_VAULT, TEMPLATES,
};
pub use engine::{generate_secret, TemplateEngine};
