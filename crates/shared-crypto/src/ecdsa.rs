//! # ECDSA Signatures (secp256k1)
//!
//! Compact recoverable signatures over 32-byte digests.
//!
//! ## Compact Format (65 bytes)
//!
//! ```text
//! [header][r: 32 bytes][s: 32 bytes]
//! header = 27 + recovery_id + (4 if the signer key is compressed)
//! ```
//!
//! The header tells the verifier which of the candidate public keys produced
//! the signature and which serialization the signer uses, so a verifier can
//! recover the exact key bytes without being told them.

use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

const HEADER_BASE: u8 = 27;
const HEADER_COMPRESSED: u8 = 4;

/// Length of a compact recoverable signature.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// secp256k1 public key together with its serialization form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey {
    key: VerifyingKey,
    compressed: bool,
}

impl Secp256k1PublicKey {
    /// Parse SEC1 bytes (33-byte compressed or 65-byte uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let compressed = match bytes.len() {
            33 => true,
            65 => false,
            _ => return Err(CryptoError::InvalidPublicKey),
        };
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { key, compressed })
    }

    /// Serialized key in its own form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.key.to_encoded_point(self.compressed).as_bytes().to_vec()
    }

    /// Whether the key serializes in compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }
}

/// 65-byte compact recoverable signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature([u8; COMPACT_SIGNATURE_LEN]);

impl RecoverableSignature {
    /// Create from a byte slice, checking only the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; COMPACT_SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidSignatureFormat(format!(
                "expected {} bytes, got {}",
                COMPACT_SIGNATURE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; COMPACT_SIGNATURE_LEN] {
        &self.0
    }

    /// Recover the public key that signed `digest`.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<Secp256k1PublicKey, CryptoError> {
        let header = self.0[0];
        if !(HEADER_BASE..HEADER_BASE + 8).contains(&header) {
            return Err(CryptoError::InvalidSignatureFormat(format!(
                "bad header byte {header}"
            )));
        }
        let flags = header - HEADER_BASE;
        let compressed = flags & HEADER_COMPRESSED != 0;
        let recovery_id = RecoveryId::from_byte(flags & 3).ok_or_else(|| {
            CryptoError::InvalidSignatureFormat(format!("bad recovery id in header {header}"))
        })?;

        let sig = Signature::from_slice(&self.0[1..])
            .map_err(|e| CryptoError::InvalidSignatureFormat(e.to_string()))?;

        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| CryptoError::SignatureVerificationFailed)?;
        Ok(Secp256k1PublicKey { key, compressed })
    }
}

/// secp256k1 ECDSA keypair.
///
/// The secret scalar is wiped when the key is dropped.
#[derive(Clone)]
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
    compressed: bool,
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate(compressed: bool) -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self {
            signing_key,
            compressed,
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32], compressed: bool) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self {
            signing_key,
            compressed,
        })
    }

    /// Public key in this keypair's serialization form.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey {
            key: self.signing_key.verifying_key().clone(),
            compressed: self.compressed,
        }
    }

    /// Whether the public key serializes compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Sign a 32-byte digest (deterministic RFC 6979, low-S).
    pub fn sign_recoverable(&self, digest: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        // Flipping s to the low half negates R's y parity.
        let (sig, recovery_id) = match sig.normalize_s() {
            Some(low) => (
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = HEADER_BASE
            + recovery_id.to_byte()
            + if self.compressed { HEADER_COMPRESSED } else { 0 };
        out[1..].copy_from_slice(&sig.to_bytes());
        Ok(RecoverableSignature(out))
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}
