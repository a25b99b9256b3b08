//! Error types for the store module.

use hashlink_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// A rejected candidate is not an error; see [`crate::AppendResult`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Genesis has not been installed yet.
    #[error("chain not yet initialized")]
    NotInitialized,

    /// Genesis was already installed.
    #[error("chain already initialized")]
    AlreadyInitialized,

    /// A stored record breaks the chain invariants.
    #[error("stored record at position {position} is invalid: {source}")]
    Corrupted {
        position: usize,
        #[source]
        source: ValidationError,
    },

    /// Building the genesis record failed.
    #[error("genesis creation failed: {0}")]
    Genesis(#[from] CoreError),

    /// A thread panicked while holding the chain lock.
    #[error("chain lock poisoned")]
    LockPoisoned,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
