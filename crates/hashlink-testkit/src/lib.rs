//! # Hashlink Testkit
//!
//! Testing utilities for Hashlink.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed record fields with their exact digest pre-image
//!   and SHA-256 output
//! - **Generators**: Proptest strategies for records and single-field mutations
//! - **Fixtures**: a signer plus store, with helpers to grow valid chains
//!
//! ## Golden Vectors
//!
//! ```rust
//! use hashlink_testkit::vectors::{all_vectors, record_from_vector};
//!
//! for vector in all_vectors() {
//!     let record = record_from_vector(&vector);
//!     assert_eq!(record.compute_digest().as_str(), vector.digest);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use hashlink_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let genesis = fixture.init_genesis();
//! let next = fixture.make_successor(&genesis, 42);
//! assert_eq!(next.index, 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{mutate, record_from_params, Mutation, RecordParams};
pub use vectors::{all_vectors, record_from_vector, verify_all_vectors, GoldenVector};
