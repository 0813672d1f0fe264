//! 256-bit helpers with fixed-width register semantics.
//!
//! `U256` from primitive-types panics on overflow in debug builds and its
//! shift operators are only defined for in-range amounts. Difficulty math is
//! consensus-critical and must wrap modulo 2^256 and shift to zero exactly
//! like a plain 256-bit register, so every retarget computation goes through
//! these helpers.

use primitive_types::U256;

/// `a * b mod 2^256`
#[inline]
pub fn mul(a: U256, b: U256) -> U256 {
    a.overflowing_mul(b).0
}

/// `a * n mod 2^256`
#[inline]
pub fn mul_u64(a: U256, n: u64) -> U256 {
    mul(a, U256::from(n))
}

/// `a + b mod 2^256`
#[inline]
pub fn add(a: U256, b: U256) -> U256 {
    a.overflowing_add(b).0
}

/// Left shift; shifting by 256 or more yields zero.
#[inline]
pub fn shl(a: U256, bits: u32) -> U256 {
    if bits >= 256 {
        U256::zero()
    } else {
        a << bits
    }
}

/// Right shift; shifting by 256 or more yields zero.
#[inline]
pub fn shr(a: U256, bits: u32) -> U256 {
    if bits >= 256 {
        U256::zero()
    } else {
        a >> bits
    }
}
