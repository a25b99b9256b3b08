//! # Hashlink
//!
//! A single, in-process, append-only chain of signed, hash-linked records.
//!
//! ## Overview
//!
//! - **Records**: immutable; each carries the digest of its predecessor
//! - **Proof-of-work**: a record's digest must start with `difficulty` zero hex digits
//! - **Signatures**: every record is signed by the one process identity (RSA-PSS)
//! - **Validation**: sequence, linkage, digest, signature and work are checked
//!   under the chain lock before a record is appended
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hashlink::{Chain, ChainConfig};
//!
//! let chain = Chain::bootstrap(ChainConfig::default()).unwrap();
//! chain.initialize_genesis().unwrap();
//!
//! // Mine, sign and append a record carrying 42.
//! let record = chain.produce_and_submit(42).unwrap();
//! assert_eq!(record.index, 1);
//! ```
//!
//! ## Re-exports
//!
//! - `hashlink::core` - Core primitives (Record, Digest, validation, ...)
//! - `hashlink::store` - The in-memory chain store

pub mod chain;
pub mod error;

pub use hashlink_core as core;
pub use hashlink_store as store;

pub use chain::{now_timestamp, Chain, ChainConfig, MAX_PRODUCE_ATTEMPTS};
pub use error::{ChainError, Result};

pub use hashlink_core::{
    ChainValidator, Digest, PublicKey, Record, RecordBuilder, RecordSignature, SignatureService,
    ValidationError,
};
pub use hashlink_store::AppendResult;
