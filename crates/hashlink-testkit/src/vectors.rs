//! Golden vectors for the record digest.
//!
//! Any implementation of the digest must reproduce these pre-images and
//! outputs byte for byte.

use hashlink_core::{digest_input, Digest, Record, RecordSignature};
use serde::{Deserialize, Serialize};

/// A single golden vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub index: u64,
    pub timestamp: String,
    pub payload: i64,
    pub previous_digest: String,
    pub nonce: String,

    // Expected outputs
    pub preimage: String,
    pub digest: String,
}

fn vector(
    name: &str,
    description: &str,
    (index, timestamp, payload, previous_digest, nonce): (u64, &str, i64, &str, &str),
    preimage: &str,
    digest: &str,
) -> GoldenVector {
    GoldenVector {
        name: name.into(),
        description: description.into(),
        index,
        timestamp: timestamp.into(),
        payload,
        previous_digest: previous_digest.into(),
        nonce: nonce.into(),
        preimage: preimage.into(),
        digest: digest.into(),
    }
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        vector(
            "all_empty",
            "Index 0, payload 0, every text field empty",
            (0, "", 0, "", ""),
            "00",
            "f1534392279bddbf9d43dde8701cb5be14b82f76ec6607bf8d6ad557f60f304e",
        ),
        vector(
            "genesis_like",
            "Genesis shape with a millisecond timestamp and nonce 0",
            (0, "1736870400000", 0, "", "0"),
            "0173687040000000",
            "8bf2506a4fb95b17d914737fef615fb50cc8e5ada17a0b8676ed6cc87ee30522",
        ),
        vector(
            "payload_42",
            "Index 1 carrying 42 with no predecessor text",
            (1, "1736870400000", 42, "", "7"),
            "11736870400000427",
            "59750da481ba9bb0c50ccedb7ca17b5bba798c2b2b44850166e99b5029e0ce81",
        ),
        vector(
            "linked",
            "Short fields with a previous digest",
            (1, "t", 42, "abc", "7"),
            "1t42abc7",
            "b86501ac36ce41045dbf2ce91941bb3a973143b402ae3fd25eeff401b822545c",
        ),
        vector(
            "negative_payload",
            "Negative payload keeps its sign in decimal",
            (3, "2026-10-19T00:00:00Z", -5, "00f3a2", "12345"),
            "32026-10-19T00:00:00Z-500f3a212345",
            "6f8bdd5447f80d845ce040a6296ce84c1f622678b48df6f57c33f2c5a63bcc91",
        ),
        vector(
            "extremes",
            "u64::MAX index and i64::MIN payload",
            (u64::MAX, "x", i64::MIN, "ff", "0"),
            "18446744073709551615x-9223372036854775808ff0",
            "d76f3fd2d080bfd914e2197ee31269d1e3d6705bcbc8afdb034337ab36f90f77",
        ),
        vector(
            "unseparated_a",
            "Fields are concatenated without separators: pairs with unseparated_b",
            (11, "", 0, "", "1"),
            "1101",
            "36ab771eba23f49d7ae43af88c601f3de8fccb201250906a4085444ae765f2db",
        ),
        vector(
            "unseparated_b",
            "Same pre-image as unseparated_a from different fields",
            (1, "", 10, "", "1"),
            "1101",
            "36ab771eba23f49d7ae43af88c601f3de8fccb201250906a4085444ae765f2db",
        ),
    ]
}

/// Build the (unsigned) record described by a vector.
pub fn record_from_vector(vector: &GoldenVector) -> Record {
    Record {
        index: vector.index,
        timestamp: vector.timestamp.clone(),
        payload: vector.payload,
        digest: Digest::new(vector.digest.clone()),
        previous_digest: Digest::new(vector.previous_digest.clone()),
        difficulty: 0,
        nonce: vector.nonce.clone(),
        signature: RecordSignature::default(),
    }
}

/// Check every vector; returns the names of the ones that fail.
pub fn verify_all_vectors() -> Vec<String> {
    all_vectors()
        .into_iter()
        .filter(|v| {
            let record = record_from_vector(v);
            digest_input(&record) != v.preimage.as_bytes()
                || record.compute_digest().as_str() != v.digest
        })
        .map(|v| v.name)
        .collect()
}
