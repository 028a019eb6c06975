//! Artifact types.
//!
//! An [`Artifact`] is what the template engine produces. Before it can be
//! written it has to be turned into a [`SealedArtifact`], which is the only
//! type the provisioner writes to disk; sealing encrypts sensitive content,
//! so plaintext secrets cannot reach the filesystem by construction.

use zeroize::Zeroizing;

use crate::core::domain::Password;
use crate::core::vault::Codec;
use crate::error::Result;

/// Static description of one file in a provider's artifact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Path relative to the cluster directory.
    pub path: &'static str,
    /// Template rendered to produce the content.
    pub template: &'static str,
    /// Whether the content must be vault-encrypted before writing.
    pub sensitive: bool,
}

/// A rendered artifact, not yet safe to write.
pub struct Artifact {
    spec: ArtifactSpec,
    content: Zeroizing<Vec<u8>>,
}

impl Artifact {
    pub fn new(spec: ArtifactSpec, content: Vec<u8>) -> Self {
        Self {
            spec,
            content: Zeroizing::new(content),
        }
    }

    pub fn path(&self) -> &'static str {
        self.spec.path
    }

    pub fn is_sensitive(&self) -> bool {
        self.spec.sensitive
    }

    /// Rendered content (plaintext, even for sensitive artifacts).
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Encrypt sensitive content; pass plain content through unchanged.
    ///
    /// # Errors
    ///
    /// Returns the codec's error if encryption fails.
    pub fn seal<C: Codec + ?Sized>(self, codec: &C, password: &Password) -> Result<SealedArtifact> {
        let (bytes, encrypted) = if self.spec.sensitive {
            (codec.encrypt(&self.content, password)?.into_bytes(), true)
        } else {
            (self.content.to_vec(), false)
        };

        Ok(SealedArtifact {
            path: self.spec.path,
            bytes,
            encrypted,
        })
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("path", &self.spec.path)
            .field("sensitive", &self.spec.sensitive)
            .field("len", &self.content.len())
            .finish()
    }
}

/// An artifact whose bytes are safe to put on disk.
#[derive(Debug, Clone)]
pub struct SealedArtifact {
    path: &'static str,
    bytes: Vec<u8>,
    encrypted: bool,
}

impl SealedArtifact {
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}
