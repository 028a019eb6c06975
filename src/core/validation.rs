//! Input validation for kpas operations.
//!
//! Validates repository names, cluster names and free-form parameters
//! before anything touches the filesystem.

use crate::error::{ConfigError, RepositoryError, Result};

/// Maximum length of a DNS label.
const MAX_LABEL_LEN: usize = 63;

/// Validate a repository name.
///
/// Repository names become a single directory under `<base>/repos`:
/// - Cannot be empty
/// - Only ASCII letters, digits, `-`, `_` and `.`
/// - Cannot start with `.`
///
/// # Errors
///
/// Returns `RepositoryError::InvalidName` if the name is invalid.
pub fn validate_repository_name(name: &str) -> Result<()> {
    let invalid = |reason: String| -> crate::error::Error {
        RepositoryError::InvalidName {
            name: name.to_string(),
            reason,
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if name.starts_with('.') {
        return Err(invalid("cannot start with '.'".to_string()));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.') {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '-', '_' and '.' are allowed",
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}

/// Validate a cluster name.
///
/// Cluster names end up in cloud labels and inventory filter expressions,
/// so they must be DNS labels: lowercase letters, digits and `-`, at most
/// 63 characters, not starting or ending with `-`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the name is invalid.
pub fn validate_cluster_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| -> crate::error::Error {
        ConfigError::InvalidValue {
            field: "cluster name",
            reason: format!("'{}' {}", name, reason),
        }
        .into()
    };

    if name.is_empty() {
        return Err(ConfigError::MissingParameter {
            field: "cluster name",
        }
        .into());
    }
    if name.len() > MAX_LABEL_LEN {
        return Err(invalid("is longer than 63 characters"));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("cannot start or end with '-'"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "may only contain lowercase letters, digits and '-'",
        ));
    }

    Ok(())
}

/// Validate a required single-line parameter.
///
/// Values must be non-empty after trimming and must not contain control
/// characters, which would break the single-line YAML scalars they are
/// rendered into.
///
/// # Errors
///
/// Returns `ConfigError::MissingParameter` or `ConfigError::InvalidValue`.
pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingParameter { field }.into());
    }
    validate_single_line(field, value)
}

/// Reject control characters (newlines, tabs, NUL, ...).
pub fn validate_single_line(field: &'static str, value: &str) -> Result<()> {
    if let Some(ch) = value.chars().find(|c| c.is_control()) {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("contains control character {:?}", ch),
        }
        .into());
    }
    Ok(())
}
