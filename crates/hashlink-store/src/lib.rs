//! # Hashlink Store
//!
//! The ordered, append-only sequence of accepted records.
//!
//! ## Overview
//!
//! [`ChainStore`] keeps the chain in memory behind a single exclusive lock.
//! Every append validates the candidate against the current tail while the
//! lock is held, so two concurrent appends are strictly ordered and the second
//! one sees the first one's result. Reads take the same lock and never observe
//! a partially-updated chain.
//!
//! The store also owns the genesis record: it is built once with
//! [`ChainStore::initialize_genesis`] and trusted unconditionally. Until then
//! every operation answers [`StoreError::NotInitialized`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hashlink_core::{ChainValidator, RecordBuilder, SignatureService};
//! use hashlink_store::{AppendResult, ChainStore};
//!
//! let signer = SignatureService::generate().unwrap();
//! let store = ChainStore::new(ChainValidator::new(signer.public_key().clone(), 1));
//! let genesis = store.initialize_genesis(&signer, "1736870400000").unwrap();
//!
//! let candidate = RecordBuilder::on_top_of(&genesis)
//!     .payload(42)
//!     .difficulty(1)
//!     .seal(&signer)
//!     .unwrap();
//!
//! match store.append(candidate).unwrap() {
//!     AppendResult::Accepted(record) => println!("appended #{}", record.index),
//!     AppendResult::Rejected(reason) => println!("rejected: {}", reason),
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **No persistence**: everything is lost when the store is dropped.
//! - **Mine outside the lock**: callers build candidates first; the store only
//!   validates and appends.

pub mod error;
pub mod memory;

pub use error::{Result, StoreError};
pub use memory::{AppendResult, ChainStore};
