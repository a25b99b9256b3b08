//! The Chain: the one context object that owns the record chain and the
//! process signing identity.
//!
//! Handlers receive a cloned [`Chain`] handle; the store's lock inside it is
//! the only synchronization point.

use std::sync::Arc;

use hashlink_core::{
    ChainValidator, PublicKey, Record, RecordBuilder, SignatureService, ValidationError,
    DEFAULT_KEY_BITS, MAX_DIFFICULTY,
};
use hashlink_store::{AppendResult, ChainStore};

use crate::error::{ChainError, Result};

/// How many times [`Chain::produce_and_submit`] re-mines after losing a race.
pub const MAX_PRODUCE_ATTEMPTS: u32 = 3;

/// Configuration for a chain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Leading zero hex digits required of every record digest.
    pub difficulty: u32,
    /// RSA modulus size of the process identity.
    pub key_bits: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: 1,
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

struct ChainInner {
    signer: SignatureService,
    store: ChainStore,
    difficulty: u32,
}

/// Shared handle to the chain. Cheap to clone.
#[derive(Clone)]
pub struct Chain {
    inner: Arc<ChainInner>,
}

impl Chain {
    /// Wrap an existing identity. Genesis is not created yet.
    pub fn new(signer: SignatureService, difficulty: u32) -> Result<Self> {
        if difficulty > MAX_DIFFICULTY {
            return Err(ChainError::InvalidConfig(format!(
                "difficulty {} exceeds the maximum of {}",
                difficulty, MAX_DIFFICULTY
            )));
        }

        let validator = ChainValidator::new(signer.public_key().clone(), difficulty);
        Ok(Self {
            inner: Arc::new(ChainInner {
                signer,
                store: ChainStore::new(validator),
                difficulty,
            }),
        })
    }

    /// Generate a fresh process identity and wrap it.
    ///
    /// Identity generation failure is the one error that should abort the
    /// process.
    pub fn bootstrap(config: ChainConfig) -> Result<Self> {
        let signer = SignatureService::generate_with_bits(config.key_bits)?;
        tracing::info!(public_key = ?signer.public_key(), "generated signing identity");
        Self::new(signer, config.difficulty)
    }

    pub fn difficulty(&self) -> u32 {
        self.inner.difficulty
    }

    pub fn public_key(&self) -> &PublicKey {
        self.inner.signer.public_key()
    }

    pub fn store(&self) -> &ChainStore {
        &self.inner.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Mine, sign and install the genesis record.
    pub fn initialize_genesis(&self) -> Result<Record> {
        let genesis = self
            .inner
            .store
            .initialize_genesis(&self.inner.signer, now_timestamp())?;
        tracing::info!(
            digest = %genesis.digest,
            nonce = %genesis.nonce,
            timestamp = %genesis.timestamp,
            "genesis record created"
        );
        Ok(genesis)
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.inner.store.is_initialized()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Producing and submitting
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the successor of the current tail carrying `payload`.
    ///
    /// The tail is read under the lock, then the lock is released before
    /// mining. The result must still go through [`Chain::submit`], which
    /// rejects it if the tail moved in the meantime.
    pub fn produce(&self, payload: i64) -> Result<Record> {
        let tail = self.inner.store.tail()?;
        let record = RecordBuilder::on_top_of(&tail)
            .timestamp(now_timestamp())
            .payload(payload)
            .difficulty(self.inner.difficulty)
            .seal(&self.inner.signer)?;
        Ok(record)
    }

    /// Offer a candidate to the chain.
    ///
    /// Rejections are returned as [`AppendResult::Rejected`] and logged with
    /// their reason; callers can report them generically.
    pub fn submit(&self, candidate: Record) -> Result<AppendResult> {
        let index = candidate.index;
        let result = self.inner.store.append(candidate)?;
        match &result {
            AppendResult::Accepted(record) => {
                tracing::info!(index = record.index, digest = %record.digest, "record accepted");
            }
            AppendResult::Rejected(reason) => {
                tracing::warn!(index, reason = reason.reason(), detail = %reason, "record rejected");
            }
        }
        Ok(result)
    }

    /// Produce and submit, re-reading the tail and re-mining if another
    /// append got in first.
    pub fn produce_and_submit(&self, payload: i64) -> Result<Record> {
        for attempt in 1..=MAX_PRODUCE_ATTEMPTS {
            let candidate = self.produce(payload)?;
            match self.submit(candidate)? {
                AppendResult::Accepted(record) => return Ok(record),
                AppendResult::Rejected(ValidationError::OutOfSequence { .. }) => {
                    tracing::debug!(attempt, "tail advanced while mining, retrying");
                }
                AppendResult::Rejected(reason) => return Err(ChainError::Rejected(reason)),
            }
        }
        Err(ChainError::Contended {
            attempts: MAX_PRODUCE_ATTEMPTS,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The full chain in append order.
    pub fn snapshot(&self) -> Result<Vec<Record>> {
        Ok(self.inner.store.snapshot()?)
    }

    pub fn tail(&self) -> Result<Record> {
        Ok(self.inner.store.tail()?)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.inner.store.len()?)
    }

    /// Re-validate the whole chain.
    pub fn verify(&self) -> Result<()> {
        Ok(self.inner.store.verify_chain()?)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("signer", &self.inner.signer)
            .field("store", &self.inner.store)
            .finish()
    }
}

/// Current time in Unix milliseconds, as record timestamp text.
pub fn now_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink_core::MIN_KEY_BITS;

    fn make_chain(difficulty: u32) -> Chain {
        Chain::bootstrap(ChainConfig {
            difficulty,
            key_bits: MIN_KEY_BITS,
        })
        .unwrap()
    }

    #[test]
    fn test_operations_before_genesis() {
        let chain = make_chain(1);
        assert!(!chain.is_initialized().unwrap());
        assert!(chain.snapshot().unwrap_err().is_not_initialized());
        assert!(chain.produce(1).unwrap_err().is_not_initialized());
        assert!(chain.produce_and_submit(1).unwrap_err().is_not_initialized());
    }

    #[test]
    fn test_produce_and_submit() {
        let chain = make_chain(1);
        let genesis = chain.initialize_genesis().unwrap();

        let record = chain.produce_and_submit(42).unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(record.payload, 42);
        assert_eq!(record.previous_digest, genesis.digest);
        assert_eq!(record.difficulty, 1);
        assert_eq!(chain.len().unwrap(), 2);
        chain.verify().unwrap();
    }

    #[test]
    fn test_produce_does_not_append() {
        let chain = make_chain(1);
        chain.initialize_genesis().unwrap();
        let candidate = chain.produce(5).unwrap();
        assert_eq!(candidate.index, 1);
        assert_eq!(chain.len().unwrap(), 1);
    }

    #[test]
    fn test_stale_produce_is_rejected_not_forced() {
        let chain = make_chain(1);
        chain.initialize_genesis().unwrap();

        let stale = chain.produce(1).unwrap();
        chain.produce_and_submit(2).unwrap();

        let result = chain.submit(stale).unwrap();
        assert!(matches!(
            result,
            AppendResult::Rejected(ValidationError::OutOfSequence {
                expected: 2,
                got: 1
            })
        ));
        assert_eq!(chain.len().unwrap(), 2);
    }

    #[test]
    fn test_difficulty_above_max_refused() {
        let signer = SignatureService::generate_with_bits(MIN_KEY_BITS).unwrap();
        assert!(matches!(
            Chain::new(signer, MAX_DIFFICULTY + 1),
            Err(ChainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_genesis_carries_chain_difficulty() {
        let chain = make_chain(2);
        let genesis = chain.initialize_genesis().unwrap();
        assert_eq!(genesis.difficulty, 2);
        assert!(genesis.digest.as_str().starts_with("00"));
    }

    #[test]
    fn test_now_timestamp_is_numeric() {
        let ts = now_timestamp();
        assert!(ts.parse::<u128>().unwrap() > 0);
    }
}
