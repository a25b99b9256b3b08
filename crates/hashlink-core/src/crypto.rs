//! The process signing identity.
//!
//! Wraps an RSA keypair with PSS (SHA-256, random salt) signing over record
//! digest text. A fresh keypair is generated per process; nothing is persisted.

use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::error::CoreError;
use crate::record::RecordSignature;
use crate::types::Digest;

/// Default modulus size for a process identity.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Smallest modulus accepted by [`SignatureService::generate_with_bits`].
pub const MIN_KEY_BITS: usize = 1024;

/// The public half of the signing identity.
#[derive(Clone)]
pub struct PublicKey {
    key: RsaPublicKey,
    verifying_key: VerifyingKey<Sha256>,
}

impl PublicKey {
    fn new(key: RsaPublicKey) -> Self {
        let verifying_key = VerifyingKey::<Sha256>::new(key.clone());
        Self { key, verifying_key }
    }

    /// Verify a signature over a digest.
    ///
    /// Every failure, including undecodable signature bytes, is reported as
    /// [`CoreError::InvalidSignature`].
    pub fn verify(&self, digest: &Digest, signature: &RecordSignature) -> Result<(), CoreError> {
        if signature.is_empty() {
            return Err(CoreError::InvalidSignature);
        }

        let sig =
            Signature::try_from(signature.as_bytes()).map_err(|_| CoreError::InvalidSignature)?;

        self.verifying_key
            .verify(digest.as_str().as_bytes(), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }

    /// SPKI PEM encoding.
    pub fn to_pem(&self) -> Result<String, CoreError> {
        self.key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Hex SHA-256 of the SPKI DER encoding.
    pub fn fingerprint(&self) -> Result<String, CoreError> {
        let der = self
            .key
            .to_public_key_der()
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(der.as_bytes())))
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fingerprint() {
            Ok(fp) => write!(f, "RsaPub({}, {})", self.bits(), &fp[..16]),
            Err(_) => write!(f, "RsaPub({})", self.bits()),
        }
    }
}

/// The process signing identity.
///
/// Holds the private key; only [`PublicKey`] is ever handed out.
#[derive(Clone)]
pub struct SignatureService {
    signing_key: BlindedSigningKey<Sha256>,
    public_key: PublicKey,
}

impl SignatureService {
    /// Generate a fresh identity with [`DEFAULT_KEY_BITS`].
    pub fn generate() -> Result<Self, CoreError> {
        Self::generate_with_bits(DEFAULT_KEY_BITS)
    }

    /// Generate a fresh identity with the given modulus size.
    pub fn generate_with_bits(bits: usize) -> Result<Self, CoreError> {
        if bits < MIN_KEY_BITS {
            return Err(CoreError::KeyGeneration(format!(
                "{} bits is below the {} bit minimum",
                bits, MIN_KEY_BITS
            )));
        }

        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| CoreError::KeyGeneration(e.to_string()))?;
        let public_key = PublicKey::new(RsaPublicKey::from(&private_key));

        Ok(Self {
            signing_key: BlindedSigningKey::<Sha256>::new(private_key),
            public_key,
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign a digest. Each call draws a fresh salt, so signatures differ.
    pub fn sign(&self, digest: &Digest) -> Result<RecordSignature, CoreError> {
        let mut rng = rand::thread_rng();
        let sig = self
            .signing_key
            .try_sign_with_rng(&mut rng, digest.as_str().as_bytes())
            .map_err(|e| CoreError::Signing(e.to_string()))?;
        Ok(RecordSignature(sig.to_vec()))
    }

    /// Verify against this identity's public key.
    pub fn verify(&self, digest: &Digest, signature: &RecordSignature) -> Result<(), CoreError> {
        self.public_key.verify(digest, signature)
    }
}

impl fmt::Debug for SignatureService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureService({:?})", self.public_key)
    }
}
