//! # Spork Authority
//!
//! The verifying side holds the network key; the signing side holds a
//! private key that must correspond to it.

use super::errors::{SporkError, SporkResult};
use super::network::SporkNetworkConfig;
use shared_crypto::{
    decode_wif, sign_message, verify_message, RecoverableSignature, Secp256k1KeyPair,
    Secp256k1PublicKey,
};

/// Verifies that text was signed by the network spork key.
#[derive(Debug, Clone)]
pub struct SporkAuthority {
    pubkey: Option<Secp256k1PublicKey>,
    magic: String,
}

impl SporkAuthority {
    /// Parse the authority key out of `config`.
    pub fn from_config(config: &SporkNetworkConfig) -> SporkResult<Self> {
        let pubkey = match &config.spork_pubkey {
            Some(encoded) => {
                let bytes = hex::decode(encoded)
                    .map_err(|e| SporkError::InvalidKey(format!("spork pubkey: {e}")))?;
                Some(
                    Secp256k1PublicKey::from_sec1_bytes(&bytes)
                        .map_err(|e| SporkError::InvalidKey(e.to_string()))?,
                )
            }
            None => None,
        };
        Ok(Self {
            pubkey,
            magic: config.message_magic.clone(),
        })
    }

    /// Build an authority directly from a key.
    pub fn new(pubkey: Secp256k1PublicKey, magic: impl Into<String>) -> Self {
        Self {
            pubkey: Some(pubkey),
            magic: magic.into(),
        }
    }

    /// Signed-message magic in use.
    pub fn magic(&self) -> &str {
        &self.magic
    }

    /// The authority key, if one is configured.
    pub fn pubkey(&self) -> Option<&Secp256k1PublicKey> {
        self.pubkey.as_ref()
    }

    /// True only if `signature` over `text` recovers to the authority key.
    pub fn verify(&self, text: &str, signature: &[u8]) -> bool {
        match &self.pubkey {
            Some(pubkey) => verify_message(pubkey, signature, &self.magic, text).is_ok(),
            None => false,
        }
    }
}

/// A private key allowed to produce spork signatures.
#[derive(Debug, Clone)]
pub struct SporkSigner {
    key: Secp256k1KeyPair,
    magic: String,
}

impl SporkSigner {
    /// Decode a WIF key using the network's secret-key prefix.
    pub fn from_wif(wif: &str, config: &SporkNetworkConfig) -> SporkResult<Self> {
        let key = decode_wif(wif, config.secret_key_prefix)
            .map_err(|e| SporkError::InvalidKey(e.to_string()))?;
        Ok(Self::new(key, config.message_magic.clone()))
    }

    /// Wrap an existing key pair.
    pub fn new(key: Secp256k1KeyPair, magic: impl Into<String>) -> Self {
        Self {
            key,
            magic: magic.into(),
        }
    }

    /// Public half of the signing key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        self.key.public_key()
    }

    /// Sign `text` and check the result against our own public key.
    pub fn sign(&self, text: &str) -> SporkResult<RecoverableSignature> {
        let signature = sign_message(&self.key, &self.magic, text)?;
        verify_message(&self.key.public_key(), signature.as_bytes(), &self.magic, text)?;
        Ok(signature)
    }
}
