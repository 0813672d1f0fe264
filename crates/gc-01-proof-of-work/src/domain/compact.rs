//! Compact Target Encoding
//!
//! A 256-bit target packed into 32 bits as a base-256 float:
//!
//! ```text
//! [exponent: 8 bits][sign: 1 bit][mantissa: 23 bits]
//! value = mantissa * 256^(exponent - 3)
//! ```
//!
//! Encoding truncates to the 23 most significant mantissa bits. The exact
//! loss is part of consensus, so encode/decode must never be "improved".

use super::arith;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

const MANTISSA_MASK: u32 = 0x007f_ffff;
const SIGN_BIT: u32 = 0x0080_0000;

/// A target in its 32-bit on-wire form (a header's `bits` field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTarget(pub u32);

/// Result of expanding a compact target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    /// Expanded value (mantissa magnitude only).
    pub target: U256,
    /// Sign bit set on a non-zero mantissa.
    pub negative: bool,
    /// Value does not fit in 256 bits.
    pub overflow: bool,
}

impl DecodedTarget {
    /// Usable as a proof-of-work threshold: positive and in range.
    pub fn is_valid(&self) -> bool {
        !self.negative && !self.overflow && !self.target.is_zero()
    }
}

impl CompactTarget {
    /// Expand to a 256-bit value, flagging negative and overflowing forms.
    pub fn decode(self) -> DecodedTarget {
        let size = self.0 >> 24;
        let mut word = self.0 & MANTISSA_MASK;

        let target = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            arith::shl(U256::from(word), 8 * (size - 3))
        };

        let negative = word != 0 && (self.0 & SIGN_BIT) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        DecodedTarget {
            target,
            negative,
            overflow,
        }
    }

    /// Expanded value, ignoring the sign and overflow flags.
    pub fn to_target(self) -> U256 {
        self.decode().target
    }

    /// Encode a non-negative target.
    pub fn from_target(target: U256) -> Self {
        Self::encode(target, false)
    }

    /// Encode `target`, setting the sign bit when `negative` and the
    /// mantissa is non-zero.
    pub fn encode(target: U256, negative: bool) -> Self {
        let mut size = (target.bits() as u32 + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            arith::shr(target, 8 * (size - 3)).low_u64() as u32
        };

        // The top mantissa bit doubles as the sign, so push it into the
        // exponent instead.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        compact |= size << 24;
        if negative && (compact & MANTISSA_MASK) != 0 {
            compact |= SIGN_BIT;
        }
        Self(compact)
    }

    /// Raw 32-bit value.
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
