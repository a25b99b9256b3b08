//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use hashlink_core::{ChainValidator, Record, RecordBuilder, SignatureService, MIN_KEY_BITS};
use hashlink_store::{AppendResult, ChainStore};

/// Timestamp used by every fixture record, so digests are reproducible
/// within a run.
pub const FIXTURE_TIMESTAMP: &str = "1736870400000";

/// A test fixture with a signer and an uninitialized store.
pub struct TestFixture {
    pub signer: SignatureService,
    pub store: ChainStore,
    pub difficulty: u32,
}

impl TestFixture {
    /// Difficulty 1 and a small (fast) key.
    pub fn new() -> Self {
        Self::with_difficulty(1)
    }

    pub fn with_difficulty(difficulty: u32) -> Self {
        let signer = SignatureService::generate_with_bits(MIN_KEY_BITS)
            .expect("fixture key generation");
        let store = ChainStore::new(ChainValidator::new(signer.public_key().clone(), difficulty));
        Self {
            signer,
            store,
            difficulty,
        }
    }

    /// A validator bound to this fixture's key.
    pub fn validator(&self) -> ChainValidator {
        ChainValidator::new(self.signer.public_key().clone(), self.difficulty)
    }

    /// Install genesis in the fixture store and return it.
    pub fn init_genesis(&self) -> Record {
        self.store
            .initialize_genesis(&self.signer, FIXTURE_TIMESTAMP)
            .expect("fixture genesis")
    }

    /// A mined and signed successor of `tail`, not yet submitted.
    pub fn make_successor(&self, tail: &Record, payload: i64) -> Record {
        RecordBuilder::on_top_of(tail)
            .timestamp(FIXTURE_TIMESTAMP)
            .payload(payload)
            .difficulty(self.difficulty)
            .seal(&self.signer)
            .expect("fixture signing")
    }

    /// Install genesis and append `count` records carrying 1..=count.
    pub fn grow_chain(&self, count: usize) -> Vec<Record> {
        let mut tail = self.init_genesis();
        for payload in 1..=count as i64 {
            let next = self.make_successor(&tail, payload);
            match self.store.append(next).expect("fixture append") {
                AppendResult::Accepted(record) => tail = record,
                AppendResult::Rejected(reason) => panic!("fixture record rejected: {}", reason),
            }
        }
        self.store.snapshot().expect("fixture snapshot")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
