//! # Signed Messages
//!
//! Human-readable payloads signed under a network-specific magic prefix.
//!
//! ```text
//! digest = SHA256d( CompactSize(|magic|) || magic || CompactSize(|msg|) || msg )
//! ```
//!
//! The prefix keeps a signature over a message from ever being valid as a
//! signature over a transaction or block.

use crate::ecdsa::{RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey};
use crate::hashing::sha256d;
use crate::CryptoError;
use shared_types::ByteWriter;

/// Digest actually signed for `message` under `magic`.
pub fn signed_message_digest(magic: &str, message: &str) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(magic.len() + message.len() + 2);
    writer
        .write_var_bytes(magic.as_bytes())
        .write_var_bytes(message.as_bytes());
    sha256d(&writer.into_bytes())
}

/// Sign `message` and return the compact signature bytes.
pub fn sign_message(
    key: &Secp256k1KeyPair,
    magic: &str,
    message: &str,
) -> Result<RecoverableSignature, CryptoError> {
    key.sign_recoverable(&signed_message_digest(magic, message))
}

/// Recover the key that produced `signature` over `message`.
pub fn recover_message_signer(
    signature: &[u8],
    magic: &str,
    message: &str,
) -> Result<Secp256k1PublicKey, CryptoError> {
    RecoverableSignature::from_slice(signature)?.recover(&signed_message_digest(magic, message))
}

/// Check that `expected` signed `message`.
///
/// The recovered key must serialize to exactly the same bytes as `expected`,
/// so a compressed-key signature never satisfies an uncompressed expected key.
pub fn verify_message(
    expected: &Secp256k1PublicKey,
    signature: &[u8],
    magic: &str,
    message: &str,
) -> Result<(), CryptoError> {
    let recovered = recover_message_signer(signature, magic, message)?;
    if recovered.to_bytes() != expected.to_bytes() {
        return Err(CryptoError::SignatureVerificationFailed);
    }
    Ok(())
}
