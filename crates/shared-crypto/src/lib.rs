//! # Shared Crypto - Node Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, double SHA-256 | Message identity, checksums |
//! | `ecdsa` | secp256k1 compact recoverable | Spork signing |
//! | `message` | Magic-prefixed message digest | Human-readable signed payloads |
//! | `wif` | Base58Check | Operator private key import/export |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalization
//! - **Verification**: signer identity is recovered from the signature and
//!   compared byte-for-byte against the expected serialized key

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod message;
pub mod wif;

// Re-exports
pub use ecdsa::{RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256d};
pub use message::{recover_message_signer, sign_message, signed_message_digest, verify_message};
pub use wif::{decode_wif, encode_wif};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
