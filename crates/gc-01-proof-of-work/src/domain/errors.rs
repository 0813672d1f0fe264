//! Error types for proof-of-work computations.

use thiserror::Error;

/// Errors raised by retargeting.
///
/// Both variants mean the caller handed over an inconsistent chain or
/// configuration. They are never expected during correct operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    /// The ancestor walk ran past the start of the available chain.
    #[error("Ancestor missing: no block before height {height}")]
    AncestorMissing { height: u64 },

    /// Chain parameters are unusable.
    #[error("Invalid chain parameters: {0}")]
    InvalidParams(String),
}

/// Result type for proof-of-work operations.
pub type PowResult<T> = Result<T, PowError>;
