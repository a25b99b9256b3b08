//! Building new records: fill the linkage fields, mine, sign.

use crate::crypto::SignatureService;
use crate::error::CoreError;
use crate::pow;
use crate::record::{Record, RecordSignature};
use crate::types::Digest;

/// Builder for a record that is sealed (mined and signed) in one step.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    index: u64,
    timestamp: String,
    payload: i64,
    previous_digest: Digest,
    difficulty: u32,
}

impl RecordBuilder {
    /// Start a record at an arbitrary position.
    pub fn new(index: u64, previous_digest: Digest) -> Self {
        Self {
            index,
            timestamp: String::new(),
            payload: 0,
            previous_digest,
            difficulty: 0,
        }
    }

    /// Start the genesis record (index 0, no predecessor, payload 0).
    pub fn genesis() -> Self {
        Self::new(0, Digest::empty())
    }

    /// Start the successor of `tail`.
    pub fn on_top_of(tail: &Record) -> Self {
        Self::new(tail.index.saturating_add(1), tail.digest.clone())
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn payload(mut self, payload: i64) -> Self {
        self.payload = payload;
        self
    }

    pub fn difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// The unsealed record: empty nonce, digest and signature.
    pub fn build_unsealed(self) -> Record {
        Record {
            index: self.index,
            timestamp: self.timestamp,
            payload: self.payload,
            digest: Digest::empty(),
            previous_digest: self.previous_digest,
            difficulty: self.difficulty,
            nonce: String::new(),
            signature: RecordSignature::default(),
        }
    }

    /// Mine a nonce at the builder's difficulty, fill the digest and sign it.
    ///
    /// Runs the proof-of-work to completion on the calling thread.
    pub fn seal(self, signer: &SignatureService) -> Result<Record, CoreError> {
        let difficulty = self.difficulty;
        let mut record = self.build_unsealed();

        let proof = pow::solve(&record, difficulty);
        record.nonce = proof.nonce;
        record.digest = proof.digest;
        record.signature = signer.sign(&record.digest)?;

        Ok(record)
    }
}
