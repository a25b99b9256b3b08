//! Chain validation: may a candidate extend the current tail?

use crate::crypto::PublicKey;
use crate::error::ValidationError;
use crate::pow::meets_difficulty;
use crate::record::Record;

/// Judges candidates against a tail under the process public key and the
/// chain's configured difficulty.
#[derive(Debug, Clone)]
pub struct ChainValidator {
    public_key: PublicKey,
    difficulty: u32,
}

impl ChainValidator {
    pub fn new(public_key: PublicKey, difficulty: u32) -> Self {
        Self {
            public_key,
            difficulty,
        }
    }

    /// The chain's configured difficulty.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Validate `candidate` as the successor of `tail`.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. index follows the tail
    /// 2. previous digest links to the tail
    /// 3. digest matches the record's fields
    /// 4. signature verifies under the process key
    /// 5. declared difficulty is the chain's and the digest carries that
    ///    many leading zeros
    pub fn validate(&self, candidate: &Record, tail: &Record) -> Result<(), ValidationError> {
        // 1. Sequence
        if tail.index.checked_add(1) != Some(candidate.index) {
            return Err(ValidationError::OutOfSequence {
                expected: tail.index.saturating_add(1),
                got: candidate.index,
            });
        }

        // 2. Linkage
        if candidate.previous_digest != tail.digest {
            return Err(ValidationError::BrokenLinkage {
                expected: tail.digest.clone(),
                got: candidate.previous_digest.clone(),
            });
        }

        self.check_sealed(candidate)
    }

    /// Validate a record found at position 0: genesis shape plus the same
    /// digest, signature and work rules as any other record.
    pub fn validate_genesis(&self, genesis: &Record) -> Result<(), ValidationError> {
        if genesis.index != 0 {
            return Err(ValidationError::InvalidGenesis(format!(
                "index {} is not 0",
                genesis.index
            )));
        }
        if !genesis.previous_digest.is_empty() {
            return Err(ValidationError::InvalidGenesis(
                "genesis has a previous digest".into(),
            ));
        }

        self.check_sealed(genesis)
    }

    /// Checks 3-5: the record is internally consistent, signed and mined.
    fn check_sealed(&self, record: &Record) -> Result<(), ValidationError> {
        // 3. Digest
        let computed = record.compute_digest();
        if computed != record.digest {
            return Err(ValidationError::DigestMismatch {
                claimed: record.digest.clone(),
                computed,
            });
        }

        // 4. Signature
        self.public_key
            .verify(&record.digest, &record.signature)
            .map_err(|_| ValidationError::BadSignature)?;

        // 5. Work. The declared difficulty is not covered by the digest, so it
        // must equal the chain's.
        if record.difficulty != self.difficulty {
            return Err(ValidationError::DifficultyMismatch {
                expected: self.difficulty,
                got: record.difficulty,
            });
        }
        if !meets_difficulty(&record.digest, self.difficulty) {
            return Err(ValidationError::InsufficientWork {
                required: self.difficulty,
                digest: record.digest.clone(),
            });
        }

        Ok(())
    }
}
