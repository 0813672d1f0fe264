//! Emergency Decay
//!
//! If no block arrives for several double-spacing intervals, every further
//! double-spacing interval halves the work required, so a hashrate collapse
//! cannot stall the chain.

use super::arith;
use super::block::{BlockIndexEntry, CandidateHeader};
use super::compact::CompactTarget;
use super::params::ChainParams;
use super::retarget::interleave_factor;
use tracing::debug;

/// Number of halvings owed to a candidate arriving at `candidate.time`.
///
/// Negative results mean no decay. Division truncates toward zero.
pub fn decay_halvings(
    tip: &BlockIndexEntry,
    candidate: &CandidateHeader,
    params: &ChainParams,
    fix_active: bool,
) -> i64 {
    (candidate.time - tip.time) / (params.pow_target_spacing * 2) - interleave_factor(fix_active) + 1
}

/// Relax `bits` for a stalled chain, never beyond `pow_limit`.
pub fn apply_emergency_decay(
    bits: CompactTarget,
    tip: &BlockIndexEntry,
    candidate: &CandidateHeader,
    params: &ChainParams,
    fix_active: bool,
) -> CompactTarget {
    let halvings = decay_halvings(tip, candidate, params, fix_active);
    if halvings <= 0 {
        return bits;
    }

    let shift = u32::try_from(halvings).unwrap_or(u32::MAX);
    let target = bits.to_target();
    let relaxed = if params.pow_allow_min_difficulty_blocks
        || arith::shr(params.pow_limit, shift) < target
    {
        params.pow_limit
    } else {
        arith::shl(target, shift)
    };

    debug!(
        height = tip.height + 1,
        halvings,
        from = %bits,
        "Emergency difficulty decay"
    );
    CompactTarget::from_target(relaxed)
}
