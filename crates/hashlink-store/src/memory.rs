//! In-memory chain store.
//!
//! One `Mutex<Vec<Record>>` guards the whole chain. An empty vector means
//! genesis has not been installed yet.

use std::sync::{Mutex, MutexGuard};

use hashlink_core::{ChainValidator, Record, RecordBuilder, SignatureService, ValidationError};

use crate::error::{Result, StoreError};

/// Outcome of offering a candidate to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendResult {
    /// The candidate is now the tail.
    Accepted(Record),
    /// The candidate failed validation against the tail and was discarded.
    Rejected(ValidationError),
}

impl AppendResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AppendResult::Accepted(_))
    }
}

/// The append-only chain.
///
/// Thread-safe via a single Mutex; share it behind an `Arc`.
pub struct ChainStore {
    validator: ChainValidator,
    records: Mutex<Vec<Record>>,
}

impl ChainStore {
    /// Create an uninitialized store.
    pub fn new(validator: ChainValidator) -> Self {
        Self {
            validator,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn validator(&self) -> &ChainValidator {
        &self.validator
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Record>>> {
        self.records.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Build, mine and sign the genesis record, then install it.
    ///
    /// Mining happens before the lock is taken. Genesis is not run through the
    /// validator: it has no predecessor and is trusted by construction.
    pub fn initialize_genesis(
        &self,
        signer: &SignatureService,
        timestamp: impl Into<String>,
    ) -> Result<Record> {
        if self.is_initialized()? {
            return Err(StoreError::AlreadyInitialized);
        }

        let genesis = RecordBuilder::genesis()
            .timestamp(timestamp)
            .difficulty(self.validator.difficulty())
            .seal(signer)?;

        let mut records = self.lock()?;
        if !records.is_empty() {
            return Err(StoreError::AlreadyInitialized);
        }
        records.push(genesis.clone());

        tracing::debug!(digest = %genesis.digest, nonce = %genesis.nonce, "genesis installed");
        Ok(genesis)
    }

    /// Validate `candidate` against the current tail and append it on success.
    pub fn append(&self, candidate: Record) -> Result<AppendResult> {
        let mut records = self.lock()?;
        let tail = records.last().ok_or(StoreError::NotInitialized)?;

        if let Err(reason) = self.validator.validate(&candidate, tail) {
            tracing::debug!(
                index = candidate.index,
                tail = tail.index,
                reason = reason.reason(),
                "candidate rejected"
            );
            return Ok(AppendResult::Rejected(reason));
        }

        records.push(candidate.clone());
        tracing::debug!(index = candidate.index, digest = %candidate.digest, "record appended");
        Ok(AppendResult::Accepted(candidate))
    }

    /// The full chain in append order.
    pub fn snapshot(&self) -> Result<Vec<Record>> {
        let records = self.lock()?;
        if records.is_empty() {
            return Err(StoreError::NotInitialized);
        }
        Ok(records.clone())
    }

    /// The most recently accepted record.
    pub fn tail(&self) -> Result<Record> {
        let records = self.lock()?;
        records.last().cloned().ok_or(StoreError::NotInitialized)
    }

    /// Number of records, genesis included (0 before genesis).
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(!self.lock()?.is_empty())
    }

    /// Re-check every stored record against the chain invariants.
    ///
    /// Works on a snapshot so signature checks do not hold the lock.
    pub fn verify_chain(&self) -> Result<()> {
        let records = self.snapshot()?;

        if let Some(genesis) = records.first() {
            self.validator
                .validate_genesis(genesis)
                .map_err(|source| StoreError::Corrupted {
                    position: 0,
                    source,
                })?;
        }

        for (position, pair) in records.windows(2).enumerate() {
            self.validator
                .validate(&pair[1], &pair[0])
                .map_err(|source| StoreError::Corrupted {
                    position: position + 1,
                    source,
                })?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for ChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainStore")
            .field("difficulty", &self.validator.difficulty())
            .field("len", &self.len().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink_core::MIN_KEY_BITS;
    use std::sync::Arc;
    use std::thread;

    fn make_store() -> (ChainStore, SignatureService) {
        let signer = SignatureService::generate_with_bits(MIN_KEY_BITS).unwrap();
        let store = ChainStore::new(ChainValidator::new(signer.public_key().clone(), 1));
        (store, signer)
    }

    fn make_next(tail: &Record, signer: &SignatureService, payload: i64) -> Record {
        RecordBuilder::on_top_of(tail)
            .timestamp("1736870400000")
            .payload(payload)
            .difficulty(1)
            .seal(signer)
            .unwrap()
    }

    #[test]
    fn test_uninitialized_store() {
        let (store, signer) = make_store();
        assert!(matches!(store.snapshot(), Err(StoreError::NotInitialized)));
        assert!(matches!(store.tail(), Err(StoreError::NotInitialized)));
        assert_eq!(store.len().unwrap(), 0);

        // Even a well-formed candidate is refused before genesis.
        let orphan = RecordBuilder::genesis().difficulty(1).seal(&signer).unwrap();
        let candidate = make_next(&orphan, &signer, 1);
        assert!(matches!(
            store.append(candidate),
            Err(StoreError::NotInitialized)
        ));
    }

    #[test]
    fn test_genesis_installed_once() {
        let (store, signer) = make_store();
        let genesis = store.initialize_genesis(&signer, "t0").unwrap();

        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.payload, 0);
        assert!(genesis.previous_digest.is_empty());
        assert_eq!(store.snapshot().unwrap(), vec![genesis]);
        assert!(matches!(
            store.initialize_genesis(&signer, "t1"),
            Err(StoreError::AlreadyInitialized)
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_append_and_resubmit() {
        let (store, signer) = make_store();
        let genesis = store.initialize_genesis(&signer, "t0").unwrap();

        let candidate = make_next(&genesis, &signer, 42);
        let result = store.append(candidate.clone()).unwrap();
        assert_eq!(result, AppendResult::Accepted(candidate.clone()));
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.tail().unwrap(), candidate);

        // Same candidate again: the tail has moved on.
        let again = store.append(candidate).unwrap();
        assert_eq!(
            again,
            AppendResult::Rejected(ValidationError::OutOfSequence {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_rejected_candidate_leaves_chain_untouched() {
        let (store, signer) = make_store();
        let genesis = store.initialize_genesis(&signer, "t0").unwrap();

        let mut candidate = make_next(&genesis, &signer, 42);
        candidate.payload = 43;
        let result = store.append(candidate).unwrap();
        assert!(matches!(
            result,
            AppendResult::Rejected(ValidationError::DigestMismatch { .. })
        ));
        assert_eq!(store.snapshot().unwrap(), vec![genesis]);
    }

    #[test]
    fn test_stale_candidate_after_concurrent_append() {
        let (store, signer) = make_store();
        let genesis = store.initialize_genesis(&signer, "t0").unwrap();

        // Two producers build on the same tail; only the first can land.
        let first = make_next(&genesis, &signer, 1);
        let second = make_next(&genesis, &signer, 2);

        assert!(store.append(first).unwrap().is_accepted());
        assert!(matches!(
            store.append(second).unwrap(),
            AppendResult::Rejected(ValidationError::OutOfSequence { .. })
        ));
    }

    #[test]
    fn test_concurrent_appends_are_ordered() {
        let (store, signer) = make_store();
        store.initialize_genesis(&signer, "t0").unwrap();
        let store = Arc::new(store);

        let workers = 4;
        let per_worker = 3;
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let store = Arc::clone(&store);
                let signer = signer.clone();
                thread::spawn(move || {
                    let mut landed = 0;
                    while landed < per_worker {
                        let tail = store.tail().unwrap();
                        let candidate = make_next(&tail, &signer, (w * 100 + landed) as i64);
                        if store.append(candidate).unwrap().is_accepted() {
                            landed += 1;
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let chain = store.snapshot().unwrap();
        assert_eq!(chain.len(), 1 + workers * per_worker);
        for (i, record) in chain.iter().enumerate() {
            assert_eq!(record.index, i as u64);
        }
        for pair in chain.windows(2) {
            assert_eq!(pair[1].previous_digest, pair[0].digest);
        }
        store.verify_chain().unwrap();
    }

    #[test]
    fn test_verify_chain_detects_corruption() {
        let (store, signer) = make_store();
        let genesis = store.initialize_genesis(&signer, "t0").unwrap();
        let next = make_next(&genesis, &signer, 7);
        store.append(next).unwrap();
        store.verify_chain().unwrap();

        // Reach in and tamper with the stored record.
        store.records.lock().unwrap()[1].payload = 8;
        assert!(matches!(
            store.verify_chain(),
            Err(StoreError::Corrupted { position: 1, .. })
        ));
    }
}
