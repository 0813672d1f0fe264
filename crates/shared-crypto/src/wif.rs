//! # Wallet Import Format
//!
//! Base58Check encoding of a secp256k1 secret key:
//!
//! ```text
//! [prefix: 1][secret: 32][0x01 if compressed][checksum: 4]
//! checksum = SHA256d(prefix || secret || flag)[0..4]
//! ```

use crate::ecdsa::Secp256k1KeyPair;
use crate::hashing::sha256d;
use crate::CryptoError;
use zeroize::Zeroizing;

const COMPRESSED_FLAG: u8 = 0x01;

/// Decode a WIF string whose version byte must equal `prefix`.
pub fn decode_wif(wif: &str, prefix: u8) -> Result<Secp256k1KeyPair, CryptoError> {
    let decoded = Zeroizing::new(
        bs58::decode(wif.trim())
            .into_vec()
            .map_err(|e| CryptoError::InvalidWif(format!("base58: {e}")))?,
    );

    let compressed = match decoded.len() {
        37 => false,
        38 if decoded[33] == COMPRESSED_FLAG => true,
        38 => return Err(CryptoError::InvalidWif("invalid compression flag".into())),
        n => return Err(CryptoError::InvalidWif(format!("invalid length {n}"))),
    };

    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    if &sha256d(payload)[..4] != checksum {
        return Err(CryptoError::InvalidWif("checksum mismatch".into()));
    }
    if payload[0] != prefix {
        return Err(CryptoError::InvalidWif(format!(
            "unexpected version byte {:#04x}",
            payload[0]
        )));
    }

    let mut secret = Zeroizing::new([0u8; 32]);
    secret.copy_from_slice(&payload[1..33]);
    Secp256k1KeyPair::from_bytes(&secret, compressed)
}

/// Encode a keypair's secret as WIF under `prefix`.
pub fn encode_wif(key: &Secp256k1KeyPair, prefix: u8) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(38));
    payload.push(prefix);
    payload.extend_from_slice(Zeroizing::new(key.to_bytes()).as_ref());
    if key.is_compressed() {
        payload.push(COMPRESSED_FLAG);
    }
    let checksum = sha256d(&payload);
    payload.extend_from_slice(&checksum[..4]);
    bs58::encode(payload.as_slice()).into_string()
}
