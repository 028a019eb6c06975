//! Template engine for cluster artifacts.
//!
//! Uses minijinja with custom delimiters so that Ansible's own `{{ ... }}`
//! references pass through untouched:
//! - Variable delimiters: `${...}`
//! - Block delimiters: `{%...%}`
//! - Comment delimiters: `{#...#}`

use std::collections::{BTreeMap, HashMap};

use minijinja::syntax::SyntaxConfig;
use minijinja::{context, Environment, UndefinedBehavior};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::catalog::{TemplateSpec, TEMPLATES};
use super::filters;
use crate::core::constants::SECRET_BYTES;
use crate::core::domain::ClusterParameters;
use crate::error::{Result, TemplateError};

/// Renders named templates against a [`ClusterParameters`] record.
///
/// Supports:
/// - `${...}` substitution with strict undefined handling
/// - `{% if %}` conditionals
/// - the `yaml` filter for scalar escaping
/// - per-render random secrets declared by each template
pub struct TemplateEngine {
    env: Environment<'static>,
    secrets: HashMap<&'static str, &'static [&'static str]>,
}

impl TemplateEngine {
    /// Engine with every built-in template.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Malformed` if a built-in template does not
    /// compile.
    pub fn new() -> Result<Self> {
        Self::with_templates(TEMPLATES)
    }

    /// Engine with a specific set of templates.
    ///
    /// All templates are compiled up front, so a malformed definition fails
    /// here rather than halfway through a provisioning run.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Malformed` naming the first template that
    /// does not compile.
    pub fn with_templates(templates: &[TemplateSpec]) -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .variable_delimiters("${", "}")
            .block_delimiters("{%", "%}")
            .comment_delimiters("{#", "#}")
            .build()
            .map_err(|source| TemplateError::Malformed {
                template: "<syntax>".to_string(),
                source,
            })?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("yaml", filters::yaml);

        let mut secrets = HashMap::new();
        for spec in templates {
            env.add_template(spec.name, spec.source)
                .map_err(|source| TemplateError::Malformed {
                    template: spec.name.to_string(),
                    source,
                })?;
            secrets.insert(spec.name, spec.secrets);
        }

        debug!(templates = templates.len(), "template engine ready");
        Ok(Self { env, secrets })
    }

    /// Render `template` against `params`.
    ///
    /// Every secret the template declares is minted once for this call and
    /// is the same wherever the template uses it.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Unknown` for an unregistered name,
    /// `TemplateError::MissingParameter` if the template reads a field the
    /// record does not have, or `TemplateError::Render` for other failures.
    pub fn render(&self, template: &str, params: &ClusterParameters) -> Result<Vec<u8>> {
        let declared = self
            .secrets
            .get(template)
            .ok_or_else(|| TemplateError::Unknown(template.to_string()))?;
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|_| TemplateError::Unknown(template.to_string()))?;

        let secrets: BTreeMap<&str, String> = declared
            .iter()
            .map(|name| (*name, generate_secret()))
            .collect();

        let ctx = context! {
            cluster => params.common(),
            provider => params.provider(),
            provider_name => params.provider().provider().as_str(),
            secrets => &secrets,
        };

        trace!(template, secrets = secrets.len(), "rendering");
        let rendered = tmpl.render(ctx).map_err(|source| {
            if matches!(source.kind(), minijinja::ErrorKind::UndefinedError) {
                TemplateError::MissingParameter {
                    template: template.to_string(),
                    source,
                }
            } else {
                TemplateError::Render {
                    template: template.to_string(),
                    source,
                }
            }
        })?;

        Ok(rendered.into_bytes())
    }

    /// Names of all registered templates.
    pub fn templates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.secrets.keys().copied()
    }
}

/// A fresh random secret: [`SECRET_BYTES`] random bytes, hex-encoded.
pub fn generate_secret() -> String {
    let mut bytes = Zeroizing::new([0u8; SECRET_BYTES]);
    OsRng.fill_bytes(&mut bytes[..]);
    hex::encode(&bytes[..])
}
