//! # Spork Message
//!
//! ```text
//! ┌──────────┬──────────┬──────────────┬──────────────────────────┐
//! │ id i32LE │ value    │ time_signed  │ CompactSize ‖ signature  │
//! │          │ i64LE    │ i64LE        │                          │
//! └──────────┴──────────┴──────────────┴──────────────────────────┘
//! ```
//!
//! The hash covers the first three fields only, so re-encoding a signature
//! never changes a message's identity.

use super::errors::SporkResult;
use super::signing::{SporkAuthority, SporkSigner};
use super::spork_id::spork_name;
use shared_crypto::sha256d;
use shared_types::{ByteReader, ByteWriter, Hash};
use std::fmt;

/// A signed override of one network parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct SporkMessage {
    spork_id: i32,
    value: i64,
    time_signed: i64,
    signature: Vec<u8>,
}

impl SporkMessage {
    /// Unsigned message.
    pub fn new(spork_id: i32, value: i64, time_signed: i64) -> Self {
        Self {
            spork_id,
            value,
            time_signed,
            signature: Vec::new(),
        }
    }

    /// Raw spork id.
    pub fn spork_id(&self) -> i32 {
        self.spork_id
    }

    /// Parameter value carried by this message.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Adjusted network time at which the message was signed.
    pub fn time_signed(&self) -> i64 {
        self.time_signed
    }

    /// Compact signature bytes, empty when unsigned.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Text covered by the signature.
    pub fn signing_text(&self) -> String {
        format!("{}{}{}", self.spork_id, self.value, self.time_signed)
    }

    /// Identity of the message, independent of its signature.
    pub fn hash(&self) -> Hash {
        let mut writer = ByteWriter::with_capacity(20);
        writer
            .write_i32(self.spork_id)
            .write_i64(self.value)
            .write_i64(self.time_signed);
        sha256d(&writer.into_bytes())
    }

    /// Sign with `signer` and store the signature.
    pub fn sign(&mut self, signer: &SporkSigner) -> SporkResult<()> {
        let signature = signer.sign(&self.signing_text())?;
        self.signature = signature.as_bytes().to_vec();
        Ok(())
    }

    /// True only if the signature recovers to the network spork key.
    pub fn check_signature(&self, authority: &SporkAuthority) -> bool {
        authority.verify(&self.signing_text(), &self.signature)
    }

    /// Peer wire encoding. Also the stored record format.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(20 + 1 + self.signature.len());
        writer
            .write_i32(self.spork_id)
            .write_i64(self.value)
            .write_i64(self.time_signed)
            .write_var_bytes(&self.signature);
        writer.into_bytes()
    }

    /// Parse exactly one message from `bytes`.
    pub fn decode(bytes: &[u8]) -> SporkResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let message = Self {
            spork_id: reader.read_i32()?,
            value: reader.read_i64()?,
            time_signed: reader.read_i64()?,
            signature: reader.read_var_bytes()?,
        };
        reader.finish()?;
        Ok(message)
    }
}

impl fmt::Debug for SporkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SporkMessage")
            .field("spork_id", &self.spork_id)
            .field("value", &self.value)
            .field("time_signed", &self.time_signed)
            .field("signature", &hex::encode(&self.signature))
            .finish()
    }
}

impl fmt::Display for SporkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) = {} signed at {}",
            spork_name(self.spork_id),
            self.spork_id,
            self.value,
            self.time_signed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SporkError;
    use crate::domain::network::MESSAGE_MAGIC;
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::EncodingError;

    fn key_pair() -> (SporkSigner, SporkAuthority) {
        let key = Secp256k1KeyPair::generate(false);
        let authority = SporkAuthority::new(key.public_key(), MESSAGE_MAGIC);
        (SporkSigner::new(key, MESSAGE_MAGIC), authority)
    }

    #[test]
    fn test_signing_text() {
        let msg = SporkMessage::new(10001, -5, 1_500_000_000);
        assert_eq!(msg.signing_text(), "10001-51500000000");
    }

    #[test]
    fn test_wire_layout() {
        let msg = SporkMessage::new(1, 2, 3);
        let bytes = msg.encode();
        assert_eq!(
            bytes,
            vec![1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(SporkMessage::decode(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_signed_message_decodes() {
        let (signer, authority) = key_pair();
        let mut msg = SporkMessage::new(94680010, 100_000, 1_600_000_000);
        msg.sign(&signer).unwrap();
        assert_eq!(msg.signature().len(), 65);

        let decoded = SporkMessage::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
        assert!(decoded.check_signature(&authority));
    }

    #[test]
    fn test_hash_ignores_signature() {
        let (signer, _) = key_pair();
        let unsigned = SporkMessage::new(10011, 10, 1_600_000_000);
        let mut signed = unsigned.clone();
        signed.sign(&signer).unwrap();
        assert_eq!(unsigned.hash(), signed.hash());
        assert_ne!(unsigned.hash(), SporkMessage::new(10011, 11, 1_600_000_000).hash());
    }

    #[test]
    fn test_tampered_fields_fail_signature() {
        let (signer, authority) = key_pair();
        let mut msg = SporkMessage::new(10008, 0, 1_600_000_000);
        msg.sign(&signer).unwrap();
        assert!(msg.check_signature(&authority));

        let mut bad_value = msg.clone();
        bad_value.value = 1;
        assert!(!bad_value.check_signature(&authority));

        let mut bad_id = msg.clone();
        bad_id.spork_id = 10009;
        assert!(!bad_id.check_signature(&authority));

        let mut bad_time = msg;
        bad_time.time_signed += 1;
        assert!(!bad_time.check_signature(&authority));
    }

    #[test]
    fn test_foreign_key_fails_signature() {
        let (signer, _) = key_pair();
        let (_, other_authority) = key_pair();
        let mut msg = SporkMessage::new(10001, 0, 1);
        msg.sign(&signer).unwrap();
        assert!(!msg.check_signature(&other_authority));
    }

    #[test]
    fn test_unsigned_fails_signature() {
        let (_, authority) = key_pair();
        assert!(!SporkMessage::new(10001, 0, 1).check_signature(&authority));
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let bytes = SporkMessage::new(1, 2, 3).encode();
        assert!(matches!(
            SporkMessage::decode(&bytes[..10]),
            Err(SporkError::Malformed(EncodingError::UnexpectedEof { .. }))
        ));

        let mut long = bytes;
        long.push(0);
        assert!(matches!(
            SporkMessage::decode(&long),
            Err(SporkError::Malformed(EncodingError::TrailingBytes(1)))
        ));
    }

    #[test]
    fn test_display_names_known_sporks() {
        let msg = SporkMessage::new(10011, 5, 7);
        assert_eq!(msg.to_string(), "SPORK_12_RECONSIDER_BLOCKS (10011) = 5 signed at 7");
    }
}
