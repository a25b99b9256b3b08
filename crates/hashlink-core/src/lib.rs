//! # Hashlink Core
//!
//! Pure primitives for Hashlink: records, digests, proof-of-work, signatures
//! and chain validation.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over the record data model.
//!
//! ## Key Types
//!
//! - [`Record`] - One signed, hash-linked unit of the chain
//! - [`Digest`] - Hex-encoded SHA-256 identifying a record's content
//! - [`SignatureService`] - The process signing identity (RSA-PSS)
//! - [`ChainValidator`] - Decides whether a candidate may extend a tail
//!
//! ## Digests
//!
//! Record digests are computed over the decimal/text rendering of the linkage
//! fields. See the [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod pow;
pub mod producer;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{digest, digest_input, DigestPrefix};
pub use crypto::{PublicKey, SignatureService, DEFAULT_KEY_BITS, MIN_KEY_BITS};
pub use error::{CoreError, ValidationError};
pub use pow::{meets_difficulty, mine, solve, Proof, MAX_DIFFICULTY};
pub use producer::RecordBuilder;
pub use record::{Record, RecordSignature};
pub use types::Digest;
pub use validation::ChainValidator;
