//! Error types for the spork subsystem.

use shared_crypto::CryptoError;
use shared_types::EncodingError;
use thiserror::Error;

/// Failures reported by the key-value storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Spork subsystem errors.
#[derive(Debug, Error)]
pub enum SporkError {
    /// Message bytes could not be parsed.
    #[error("malformed spork message: {0}")]
    Malformed(#[from] EncodingError),

    /// Signature did not come from the network spork key.
    #[error("invalid signature for spork {spork_id}")]
    InvalidSignature { spork_id: i32 },

    /// Signing key could not be parsed or does not match the network key.
    #[error("invalid spork signing key: {0}")]
    InvalidKey(String),

    /// Signing failed at the crypto layer.
    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// An operation that requires the master key ran without one.
    #[error("no spork signing key configured")]
    NoSigningKey,

    /// The persistent store failed.
    #[error("spork store failure: {0}")]
    Store(#[from] KVStoreError),
}

/// Result alias for spork operations.
pub type SporkResult<T> = Result<T, SporkError>;
