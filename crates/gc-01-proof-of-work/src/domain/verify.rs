//! Proof-of-Work Check
//!
//! A header proves its work when its hash, read as a 256-bit integer, does
//! not exceed the target it claims, and that target is itself legal.

use super::compact::CompactTarget;
use super::params::ChainParams;
use shared_types::{hash_to_u256, Hash};

/// Whether `hash` satisfies `bits` under `params`.
///
/// Negative, zero, overflowing and above-ceiling targets are rejected before
/// the hash is looked at.
pub fn check_proof_of_work(hash: &Hash, bits: CompactTarget, params: &ChainParams) -> bool {
    let decoded = bits.decode();
    if !decoded.is_valid() || decoded.target > params.pow_limit {
        return false;
    }
    hash_to_u256(hash) <= decoded.target
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::u256_to_hash;

    fn params() -> ChainParams {
        ChainParams::main()
    }

    #[test]
    fn test_hash_at_target_passes() {
        let bits = CompactTarget(0x1d00_ffff);
        let target = bits.to_target();
        assert!(check_proof_of_work(&u256_to_hash(&target), bits, &params()));
        assert!(!check_proof_of_work(
            &u256_to_hash(&(target + 1)),
            bits,
            &params()
        ));
    }

    #[test]
    fn test_zero_hash_with_limit_passes() {
        let p = params();
        assert!(check_proof_of_work(&[0u8; 32], p.pow_limit_compact(), &p));
    }

    #[test]
    fn test_negative_bits_rejected() {
        // 0x1d80ffff sets the sign bit
        assert!(!check_proof_of_work(
            &[0u8; 32],
            CompactTarget(0x1d80_ffff),
            &params()
        ));
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(!check_proof_of_work(&[0u8; 32], CompactTarget(0), &params()));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(!check_proof_of_work(
            &[0u8; 32],
            CompactTarget(0xff12_3456),
            &ChainParams::regtest()
        ));
    }

    #[test]
    fn test_above_limit_rejected() {
        // easier than 0x1e0fffff
        assert!(!check_proof_of_work(
            &[0u8; 32],
            CompactTarget(0x1f00_ffff),
            &params()
        ));
    }

    proptest! {
        #[test]
        fn prop_targets_above_limit_always_fail(bits in any::<u32>(), hash in any::<[u8; 32]>()) {
            let p = params();
            let bits = CompactTarget(bits);
            if bits.to_target() > p.pow_limit {
                prop_assert!(!check_proof_of_work(&hash, bits, &p));
            }
        }

        #[test]
        fn prop_negative_targets_always_fail(exponent in 1u32..=32, mantissa in 1u32..=0x7f_ffff, hash in any::<[u8; 32]>()) {
            let bits = CompactTarget((exponent << 24) | 0x0080_0000 | mantissa);
            if !bits.to_target().is_zero() {
                prop_assert!(!check_proof_of_work(&hash, bits, &ChainParams::regtest()));
            }
        }
    }
}
