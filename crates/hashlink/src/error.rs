//! Error types for the chain context.

use hashlink_core::{CoreError, ValidationError};
use hashlink_store::StoreError;
use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Key generation or signing error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CoreError),

    /// A locally produced record was refused for a reason other than a race.
    #[error("produced record rejected: {0}")]
    Rejected(ValidationError),

    /// The tail kept moving while we were mining.
    #[error("gave up after {attempts} attempts: the tail kept advancing")]
    Contended { attempts: u32 },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChainError {
    /// Whether this is the "genesis not installed yet" condition.
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, ChainError::Store(StoreError::NotInitialized))
    }
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
