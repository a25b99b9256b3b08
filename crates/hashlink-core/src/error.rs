//! Error types for Hashlink Core.

use thiserror::Error;

use crate::types::Digest;

/// Core errors raised by the signing identity and encoders.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("encoding error: {0}")]
    EncodingError(String),
}

/// Reasons a candidate record is refused by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("out of sequence: expected index {expected}, got {got}")]
    OutOfSequence { expected: u64, got: u64 },

    #[error("broken linkage: expected previous digest {expected:?}, got {got:?}")]
    BrokenLinkage { expected: Digest, got: Digest },

    #[error("digest mismatch: record claims {claimed:?}, fields hash to {computed:?}")]
    DigestMismatch { claimed: Digest, computed: Digest },

    #[error("bad signature")]
    BadSignature,

    #[error("difficulty mismatch: chain requires {expected}, record declares {got}")]
    DifficultyMismatch { expected: u32, got: u32 },

    #[error("insufficient work: digest {digest:?} does not have {required} leading zeros")]
    InsufficientWork { required: u32, digest: Digest },

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}

impl ValidationError {
    /// Short, stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::OutOfSequence { .. } => "out of sequence",
            ValidationError::BrokenLinkage { .. } => "broken linkage",
            ValidationError::DigestMismatch { .. } => "digest mismatch",
            ValidationError::BadSignature => "bad signature",
            ValidationError::DifficultyMismatch { .. } => "difficulty mismatch",
            ValidationError::InsufficientWork { .. } => "insufficient work",
            ValidationError::InvalidGenesis(_) => "invalid genesis",
        }
    }
}
