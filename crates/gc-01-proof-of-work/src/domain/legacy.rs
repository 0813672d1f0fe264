//! Interval Retargeting
//!
//! Bitcoin-style single-algorithm rules: the target only moves once every
//! `difficulty_adjustment_interval` blocks, scaled by how long that interval
//! actually took.

use super::arith;
use super::block::{BlockIndexEntry, CandidateHeader};
use super::compact::CompactTarget;
use super::errors::{PowError, PowResult};
use super::params::ChainParams;
use crate::ports::ChainIndex;
use primitive_types::U256;
use tracing::debug;

/// Interval retargeter bound to a chain and its parameters.
pub struct IntervalRetarget<'a, C: ?Sized> {
    params: &'a ChainParams,
    chain: &'a C,
}

impl<'a, C> IntervalRetarget<'a, C>
where
    C: ChainIndex + ?Sized,
{
    pub fn new(params: &'a ChainParams, chain: &'a C) -> Self {
        Self { params, chain }
    }

    /// Compact target required of `candidate` on top of `tip`.
    pub fn next_target(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget> {
        let params = self.params;
        let interval = u64::try_from(params.difficulty_adjustment_interval())
            .ok()
            .filter(|i| *i > 0)
            .ok_or_else(|| {
                PowError::InvalidParams("difficulty adjustment interval must be positive".into())
            })?;
        let limit = params.pow_limit_compact();

        if (tip.height + 1) % interval != 0 {
            if !params.pow_allow_min_difficulty_blocks {
                return Ok(tip.bits);
            }

            // A block more than two spacings late may be mined at minimum
            // difficulty.
            if candidate.time > tip.time + params.pow_target_spacing * 2 {
                return Ok(limit);
            }

            // Otherwise reuse the last target not produced by that rule.
            let mut cursor = *tip;
            while cursor.height % interval != 0 && cursor.bits == limit {
                match self.chain.previous(&cursor) {
                    Some(prev) => cursor = prev,
                    None => break,
                }
            }
            return Ok(cursor.bits);
        }

        let first_height = (tip.height + 1)
            .checked_sub(interval)
            .ok_or(PowError::AncestorMissing { height: tip.height })?;
        let first = self
            .chain
            .ancestor(tip, first_height)
            .ok_or(PowError::AncestorMissing {
                height: first_height,
            })?;

        Ok(self.calculate_next_target(tip, first.time))
    }

    /// Scale the tip's target by the elapsed time since `first_block_time`.
    ///
    /// The elapsed time is bounded to
    /// `[timespan / max_adjust_down, timespan * max_adjust_up]` and the
    /// result never exceeds `pow_limit`.
    pub fn calculate_next_target(
        &self,
        tip: &BlockIndexEntry,
        first_block_time: i64,
    ) -> CompactTarget {
        let params = self.params;
        if params.pow_no_retargeting {
            return tip.bits;
        }

        let timespan = params.pow_target_timespan;
        let actual = (tip.time - first_block_time).clamp(
            timespan / params.retarget_max_adjust_down,
            timespan * params.retarget_max_adjust_up,
        );

        // Drop a bit first when the product could overflow 256 bits.
        let mut target = tip.bits.to_target();
        let shift = target.bits() > params.pow_limit.bits().saturating_sub(1);
        if shift {
            target = target >> 1;
        }
        target = arith::mul_u64(target, actual as u64) / U256::from(timespan as u64);
        if shift {
            target = arith::shl(target, 1);
        }

        if target > params.pow_limit {
            target = params.pow_limit;
        }

        debug!(
            height = tip.height + 1,
            actual_timespan = actual,
            before = %tip.bits,
            "Interval retarget"
        );
        CompactTarget::from_target(target)
    }
}
