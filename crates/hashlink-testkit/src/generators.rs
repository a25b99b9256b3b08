//! Proptest generators for property-based testing.

use proptest::prelude::*;

use hashlink_core::{Digest, Record, RecordBuilder, RecordSignature, MAX_DIFFICULTY};

/// Generate a random well-formed digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate timestamp text.
pub fn timestamp() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..=2_000_000_000_000u64).prop_map(|ms| ms.to_string()),
        "[ -~]{0,40}".prop_map(String::from),
    ]
}

/// Parameters for generating an unsigned record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub index: u64,
    pub timestamp: String,
    pub payload: i64,
    pub previous_digest: Digest,
    pub nonce: u64,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<u64>(),
            timestamp(),
            any::<i64>(),
            prop_oneof![Just(Digest::empty()), digest()],
            any::<u64>(),
        )
            .prop_map(|(index, timestamp, payload, previous_digest, nonce)| RecordParams {
                index,
                timestamp,
                payload,
                previous_digest,
                nonce,
            })
            .boxed()
    }
}

/// Build an unsigned record from parameters, with its digest filled in.
pub fn record_from_params(params: &RecordParams) -> Record {
    let mut record = RecordBuilder::new(params.index, params.previous_digest.clone())
        .timestamp(params.timestamp.clone())
        .payload(params.payload)
        .build_unsealed();
    record.nonce = params.nonce.to_string();
    record.digest = record.compute_digest();
    record
}

/// A single-field change to an otherwise valid record.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Add a non-zero amount to the index (wrapping).
    Index(u64),
    /// Append text to the timestamp.
    Timestamp(char),
    /// Add a non-zero amount to the payload (wrapping).
    Payload(i64),
    /// Change one character of the previous digest.
    PreviousDigest(usize),
    /// Replace the claimed digest with another one.
    Digest(Digest),
    /// Append a digit to the nonce.
    Nonce(u8),
    /// Flip bits in one signature byte.
    SignatureByte(usize, u8),
    /// Drop the tail of the signature.
    SignatureTruncate(usize),
    /// Declare more work than was done.
    RaiseDifficulty,
    /// Declare one unit less work (wrapping at zero).
    LowerDifficulty,
}

/// Generate a mutation.
pub fn mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (1u64..=u64::MAX).prop_map(Mutation::Index),
        any::<char>().prop_map(Mutation::Timestamp),
        any::<i64>()
            .prop_filter("non-zero", |d| *d != 0)
            .prop_map(Mutation::Payload),
        (0usize..64).prop_map(Mutation::PreviousDigest),
        digest().prop_map(Mutation::Digest),
        (0u8..10).prop_map(Mutation::Nonce),
        (any::<usize>(), 1u8..=255).prop_map(|(i, x)| Mutation::SignatureByte(i, x)),
        any::<usize>().prop_map(Mutation::SignatureTruncate),
        Just(Mutation::RaiseDifficulty),
        Just(Mutation::LowerDifficulty),
    ]
}

/// Apply a mutation to a copy of `record`.
pub fn mutate(record: &Record, mutation: &Mutation) -> Record {
    let mut out = record.clone();
    match mutation {
        Mutation::Index(delta) => out.index = out.index.wrapping_add(*delta),
        Mutation::Timestamp(c) => out.timestamp.push(*c),
        Mutation::Payload(delta) => out.payload = out.payload.wrapping_add(*delta),
        Mutation::PreviousDigest(pos) => {
            let mut chars: Vec<char> = out.previous_digest.as_str().chars().collect();
            if chars.is_empty() {
                chars.push('0');
            } else {
                let i = pos % chars.len();
                chars[i] = if chars[i] == '0' { '1' } else { '0' };
            }
            out.previous_digest = Digest::new(chars.into_iter().collect::<String>());
        }
        Mutation::Digest(other) => {
            out.digest = if *other == record.digest {
                Digest::from_bytes([0xff; 32])
            } else {
                other.clone()
            };
        }
        Mutation::Nonce(d) => out.nonce.push(char::from(b'0' + d % 10)),
        Mutation::SignatureByte(i, x) => {
            let bytes = &mut out.signature.0;
            if bytes.is_empty() {
                bytes.push(*x);
            } else {
                let at = i % bytes.len();
                bytes[at] ^= x;
            }
        }
        Mutation::SignatureTruncate(keep) => {
            let len = out.signature.0.len();
            let keep = if len == 0 { 0 } else { keep % len };
            out.signature = RecordSignature(out.signature.0[..keep].to_vec());
        }
        Mutation::RaiseDifficulty => out.difficulty = MAX_DIFFICULTY,
        Mutation::LowerDifficulty => out.difficulty = out.difficulty.wrapping_sub(1),
    }
    out
}
