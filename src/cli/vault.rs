//! Vault file commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::cli::{output, resolve};
use crate::core::vault;
use crate::error::{Result, VaultError};

/// Decrypt `file` to stdout.
pub fn view(file: &Path, password: Option<String>) -> Result<()> {
    let text = fs::read_to_string(file)?;
    if !vault::is_encrypted(&text) {
        return Err(VaultError::Format(format!("{} is not a vault file", file.display())).into());
    }

    let password = resolve::password(password, false)?;
    let plaintext = zeroize::Zeroizing::new(vault::decrypt(&text, &password)?);
    output::data(&plaintext)?;
    Ok(())
}

/// Encrypt `file` in place.
pub fn encrypt(file: &Path, password: Option<String>) -> Result<()> {
    let plaintext = zeroize::Zeroizing::new(fs::read(file)?);
    if std::str::from_utf8(&plaintext).is_ok_and(vault::is_encrypted) {
        output::warn(&format!(
            "{} is already encrypted",
            output::path(file.display())
        ));
        return Ok(());
    }

    let password = resolve::password(password, true)?;
    let encrypted = vault::encrypt(&plaintext, &password)?;

    let dir = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(encrypted.as_bytes())?;
    tmp.persist(file).map_err(|e| e.error)?;

    info!(file = %file.display(), "encrypted");
    output::success(&format!("encrypted {}", output::path(file.display())));
    Ok(())
}
