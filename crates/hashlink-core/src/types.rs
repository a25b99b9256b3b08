//! Strong type definitions for Hashlink.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A record digest: lowercase hex of a SHA-256 output.
///
/// Digests arriving over the wire are untrusted text, so this wraps a
/// `String` rather than a fixed array. A digest read from a submission may be
/// any length; only digests produced by [`crate::canonical`] are guaranteed
/// to be [`Digest::HEX_LEN`] characters.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Length of a well-formed digest in hex characters.
    pub const HEX_LEN: usize = 64;

    /// Wrap untrusted digest text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Encode raw hash output.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// The empty digest, used as the genesis record's predecessor.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short prefix used in logs.
    pub fn short(&self) -> &str {
        self.0.get(..16).unwrap_or(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}
