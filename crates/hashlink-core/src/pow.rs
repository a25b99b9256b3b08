//! Proof-of-work: nonce search against a leading-zero difficulty predicate.
//!
//! The search is an unbounded loop. It is the cost imposed on whoever
//! produces a record; validation only re-checks the predicate.

use crate::canonical::DigestPrefix;
use crate::record::Record;
use crate::types::Digest;

/// Largest satisfiable difficulty (every hex character of the digest is `'0'`).
pub const MAX_DIFFICULTY: u32 = Digest::HEX_LEN as u32;

/// Whether the first `difficulty` hex characters of `digest` are all `'0'`.
///
/// A difficulty longer than the digest is never met.
pub fn meets_difficulty(digest: &Digest, difficulty: u32) -> bool {
    let required = difficulty as usize;
    let text = digest.as_str().as_bytes();
    text.len() >= required && text[..required].iter().all(|&c| c == b'0')
}

/// A solved puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Winning nonce as decimal text.
    pub nonce: String,
    /// Digest of the record with that nonce.
    pub digest: Digest,
    /// Number of nonces tried, including the winner.
    pub attempts: u64,
}

/// Search nonces 0, 1, 2, ... until the record's digest meets `difficulty`.
///
/// The record's own `nonce` field is ignored. Callers must keep
/// `difficulty <= MAX_DIFFICULTY`; anything larger never terminates.
pub fn solve(record: &Record, difficulty: u32) -> Proof {
    let prefix = DigestPrefix::new(record);
    let mut counter: u64 = 0;
    loop {
        let nonce = counter.to_string();
        let digest = prefix.with_nonce(&nonce);
        if meets_difficulty(&digest, difficulty) {
            return Proof {
                nonce,
                digest,
                attempts: counter + 1,
            };
        }
        counter += 1;
    }
}

/// Find the winning nonce for `record` at `difficulty`.
pub fn mine(record: &Record, difficulty: u32) -> String {
    solve(record, difficulty).nonce
}
