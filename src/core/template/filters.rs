//! Custom template filters.
//!
//! - `yaml`: render a value as a single-line YAML scalar, quoting it when the
//!   plain form would be read back as something else (`true`, `1e5`, `a: b`)

use minijinja::{Error, ErrorKind, Value};

/// YAML scalar filter
///
/// Usage: `${value | yaml}`
pub fn yaml(value: Value) -> Result<String, Error> {
    let rendered = serde_yaml::to_string(&value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot render value as YAML: {}", e),
        )
    })?;

    let scalar = rendered.trim_end_matches('\n');
    if scalar.contains('\n') {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "value does not fit in a single-line YAML scalar",
        ));
    }

    Ok(scalar.to_string())
}
