//! Vault encryption.
//!
//! Sensitive artifacts are written only in a password-protected, documented
//! file format so the repository can be decrypted outside kpas.
//!
//! ## Backends
//!
//! - **Ansible Vault 1.1**: the only format today; `ansible-vault view`
//!   decrypts the files with nothing but the password.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Codec` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::core::domain::Password;
use crate::error::Result;

mod ansible;

pub use ansible::AnsibleVault;

/// Password-based encryption codec.
///
/// The password is passed per call; implementations must not keep it.
pub trait Codec {
    /// Encrypt plaintext into the codec's text file format.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], password: &Password) -> Result<String>;

    /// Decrypt a file produced by [`Codec::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Authentication` for a wrong password and
    /// `VaultError::Format` for a structurally invalid file.
    fn decrypt(&self, encrypted: &str, password: &Password) -> Result<Vec<u8>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Encrypt with the default codec.
///
/// This is a convenience wrapper around `AnsibleVault::encrypt`.
pub fn encrypt(plaintext: &[u8], password: &Password) -> Result<String> {
    AnsibleVault.encrypt(plaintext, password)
}

/// Decrypt with the default codec.
///
/// This is a convenience wrapper around `AnsibleVault::decrypt`.
pub fn decrypt(encrypted: &str, password: &Password) -> Result<Vec<u8>> {
    AnsibleVault.decrypt(encrypted, password)
}

/// Whether `text` looks like a vault file.
pub fn is_encrypted(text: &str) -> bool {
    text.trim_start().starts_with(ansible::MAGIC)
}
