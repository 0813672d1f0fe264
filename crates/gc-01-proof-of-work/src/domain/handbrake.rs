//! Mining Handbrake
//!
//! A divisor applied to a freshly computed target. Forces above 1 make an
//! algorithm harder to mine without a software release; a retirement rule
//! in the chain parameters can brake an algorithm permanently.

use super::algorithm::Algorithm;
use super::arith;
use super::params::ChainParams;
use crate::ports::NetworkParameters;
use primitive_types::U256;

/// Braking force for a header `version` at `height`.
///
/// Forces are 32-bit; wider network values are truncated.
pub fn handbrake_force<N>(version: i32, height: u64, params: &ChainParams, network: &N) -> u32
where
    N: NetworkParameters + ?Sized,
{
    let algorithm = Algorithm::from_version(version);

    if let Some(retired) = algorithm.and_then(|a| params.retirement(a)) {
        if height > retired.after_height {
            return retired.force;
        }
    }

    match algorithm {
        Some(algo) if height as i64 >= network.handbrake_height() => {
            network.handbrake_force(algo) as u32
        }
        _ => 1,
    }
}

/// Divide `target` by `force`, or clamp to `pow_limit` when
/// `pow_limit * force` (mod 2^256) is already below it. A zero force
/// always clamps.
pub fn apply_handbrake(target: U256, force: u32, pow_limit: U256) -> U256 {
    if arith::mul_u64(pow_limit, force as u64) < target || force == 0 {
        pow_limit
    } else {
        target / U256::from(force)
    }
}
