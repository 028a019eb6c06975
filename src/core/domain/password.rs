//! Vault password type.
//!
//! Wraps the user-supplied password so it is wiped from memory on drop and
//! never shows up in `Debug` output or logs.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// A non-empty vault password.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a password.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EmptyPassword` if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(VaultError::EmptyPassword.into());
        }
        Ok(Self(password))
    }

    /// Password bytes, for key derivation only.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
