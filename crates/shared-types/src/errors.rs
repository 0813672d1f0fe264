//! # Error Types
//!
//! Errors raised while decoding wire-format bytes.

use thiserror::Error;

/// Errors that can occur while reading wire-format data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Input ended before the field was complete.
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// CompactSize used a wider form than its value requires.
    #[error("Non-canonical CompactSize encoding")]
    NonCanonicalSize,

    /// Declared length exceeds the protocol maximum.
    #[error("Length {0} exceeds maximum")]
    OversizedLength(u64),

    /// Bytes were left over after the last field.
    #[error("Trailing bytes after message: {0}")]
    TrailingBytes(usize),
}
