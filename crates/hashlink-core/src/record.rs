//! Record: one signed, hash-linked unit of the chain.
//!
//! A record is immutable once accepted. Its digest covers the linkage fields
//! and its signature covers the digest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::canonical;
use crate::types::Digest;

/// Signature bytes over a record digest.
///
/// Serialized as padded standard base64.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RecordSignature(pub Vec<u8>);

impl RecordSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(text).map(Self)
    }
}

impl fmt::Debug for RecordSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.to_base64();
        write!(f, "RecordSig({}...)", encoded.get(..16).unwrap_or(&encoded))
    }
}

impl From<Vec<u8>> for RecordSignature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for RecordSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for RecordSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base64(&text).map_err(D::Error::custom)
    }
}

/// A chain record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Position in the chain (genesis = 0).
    pub index: u64,

    /// Producer-claimed creation time. Informational only.
    pub timestamp: String,

    /// Value carried by the record.
    pub payload: i64,

    /// Hex SHA-256 over (index, timestamp, payload, previous_digest, nonce).
    pub digest: Digest,

    /// Digest of the preceding record (empty for genesis).
    pub previous_digest: Digest,

    /// Leading zero hex digits the digest must carry.
    pub difficulty: u32,

    /// Decimal nonce found by proof-of-work.
    pub nonce: String,

    /// RSA-PSS signature over the digest text.
    pub signature: RecordSignature,
}

impl Record {
    /// Recompute the digest from this record's own fields.
    pub fn compute_digest(&self) -> Digest {
        canonical::digest(self)
    }

    /// Whether this record has the genesis shape (index 0, no predecessor).
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_digest.is_empty()
    }
}
