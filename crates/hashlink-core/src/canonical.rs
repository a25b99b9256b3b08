//! Digest computation over a record's linkage fields.
//!
//! The pre-image is the plain concatenation, in this order, of:
//!
//! 1. `index` as decimal text
//! 2. `timestamp`
//! 3. `payload` as decimal text
//! 4. `previous_digest`
//! 5. `nonce`
//!
//! hashed with SHA-256 and hex-encoded. Integers are always rendered as
//! decimal text so that distinct small values never share a byte encoding.

use sha2::{Digest as _, Sha256};

use crate::record::Record;
use crate::types::Digest;

/// The exact bytes hashed to produce a record's digest.
pub fn digest_input(record: &Record) -> Vec<u8> {
    let mut buf = prefix_input(record);
    buf.extend_from_slice(record.nonce.as_bytes());
    buf
}

/// Compute a record's digest from its own fields.
pub fn digest(record: &Record) -> Digest {
    let hash: [u8; 32] = Sha256::digest(digest_input(record)).into();
    Digest::from_bytes(hash)
}

/// Everything except the nonce.
fn prefix_input(record: &Record) -> Vec<u8> {
    let index = record.index.to_string();
    let payload = record.payload.to_string();

    let mut buf = Vec::with_capacity(
        index.len()
            + record.timestamp.len()
            + payload.len()
            + record.previous_digest.as_str().len()
            + record.nonce.len(),
    );
    buf.extend_from_slice(index.as_bytes());
    buf.extend_from_slice(record.timestamp.as_bytes());
    buf.extend_from_slice(payload.as_bytes());
    buf.extend_from_slice(record.previous_digest.as_str().as_bytes());
    buf
}

/// A hasher that has already absorbed a record's nonce-independent prefix.
///
/// Proof-of-work tries many nonces against the same record; cloning the
/// absorbed state avoids re-hashing the prefix each time. The output is
/// identical to [`digest`] on the record with that nonce.
#[derive(Clone)]
pub struct DigestPrefix {
    hasher: Sha256,
}

impl DigestPrefix {
    pub fn new(record: &Record) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(prefix_input(record));
        Self { hasher }
    }

    /// Finish the digest with the given nonce.
    pub fn with_nonce(&self, nonce: &str) -> Digest {
        let mut hasher = self.hasher.clone();
        hasher.update(nonce.as_bytes());
        let hash: [u8; 32] = hasher.finalize().into();
        Digest::from_bytes(hash)
    }
}
