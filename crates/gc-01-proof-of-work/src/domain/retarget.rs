//! Multi-Algorithm Dark Gravity Wave
//!
//! Per-block retargeting over a moving window of ancestors. Two series are
//! tracked during one backward walk:
//!
//! - the aggregate series over every block, whatever its algorithm
//! - the series of blocks mined with the candidate's algorithm
//!
//! The per-algorithm average is scaled by how quickly that algorithm has
//! been producing blocks, then by how quickly the chain as a whole has.
//! Both series carry a "fast" snapshot that replaces the full window when
//! recent blocks arrived suspiciously close together (instamine defence).
//!
//! **IMPORTANT**: the target is a CEILING. Higher target = easier.
//!
//! All 256-bit arithmetic wraps modulo 2^256 and all division floors; the
//! output has to be bit-identical on every node.

use super::algorithm::{algo_efficiency, algo_tag, ALGO_ACTIVE_COUNT};
use super::arith;
use super::block::{BlockIndexEntry, CandidateHeader};
use super::compact::CompactTarget;
use super::errors::{PowError, PowResult};
use super::handbrake::{apply_handbrake, handbrake_force};
use super::params::ChainParams;
use crate::ports::{ChainIndex, NetworkParameters};
use primitive_types::U256;
use tracing::trace;

/// Per-algorithm fast window.
const PAST_ALGO_FAST_BLOCKS: u64 = 5;

/// Aggregate fast window.
const PAST_FAST_BLOCKS: u64 = PAST_ALGO_FAST_BLOCKS * 2;

/// Aggregate window multiplier before the spacing fix.
const STABILIZATION_FACTOR: u64 = 100;

/// Aggregate window once the spacing fix is active (one day of blocks).
const DAILY_WINDOW: u64 = 576;

/// Interleave factor before the spacing fix.
const LEGACY_INTERLEAVE: i64 = 5;

/// Whether the spacing-fix constants apply on top of a tip at `tip_height`.
pub fn spacing_fix_active<N>(tip_height: u64, params: &ChainParams, network: &N) -> bool
where
    N: NetworkParameters + ?Sized,
{
    let fix_height = network
        .spacing_fix_height()
        .unwrap_or(params.pow_target_timespan_fix_height);
    tip_height as i64 >= fix_height
}

/// How many blocks of other algorithms are expected between two blocks of
/// one algorithm.
pub fn interleave_factor(fix_active: bool) -> i64 {
    if fix_active {
        ALGO_ACTIVE_COUNT
    } else {
        LEGACY_INTERLEAVE
    }
}

/// `(avg * (n - 1) + next) / n`
fn running_average(avg: U256, n: u64, next: U256) -> U256 {
    arith::add(arith::mul_u64(avg, n - 1), next) / U256::from(n)
}

/// Scale `target` by `actual / expected`, with `actual` clamped to
/// `[1, 2 * expected]`.
fn scale_by_timespan(target: U256, actual: i64, expected: i64) -> U256 {
    let actual = actual.clamp(1, expected * 2);
    arith::mul_u64(target, actual as u64) / U256::from(expected as u64)
}

/// Moving average state for one series.
#[derive(Clone, Copy, Debug)]
struct Series {
    count: u64,
    average: U256,
    /// Oldest block folded into the series.
    earliest: BlockIndexEntry,
}

impl Series {
    fn start(tip: &BlockIndexEntry) -> Self {
        Self {
            count: 0,
            average: U256::zero(),
            earliest: *tip,
        }
    }

    fn push(&mut self, block: &BlockIndexEntry, target: U256) {
        self.count += 1;
        self.earliest = *block;
        self.average = running_average(self.average, self.count, target);
    }
}

/// Dark Gravity Wave retargeter bound to a chain and its parameters.
pub struct DarkGravityWave<'a, C: ?Sized, N: ?Sized> {
    params: &'a ChainParams,
    chain: &'a C,
    network: &'a N,
}

impl<'a, C, N> DarkGravityWave<'a, C, N>
where
    C: ChainIndex + ?Sized,
    N: NetworkParameters + ?Sized,
{
    pub fn new(params: &'a ChainParams, chain: &'a C, network: &'a N) -> Self {
        Self {
            params,
            chain,
            network,
        }
    }

    /// Compact target required of `candidate` on top of `tip`.
    ///
    /// # Errors
    /// `AncestorMissing` if the window walk needs a block the chain index
    /// does not have.
    pub fn next_target(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget> {
        let params = self.params;
        if params.pow_no_retargeting {
            return Ok(tip.bits);
        }

        // Constants in effect at the tip apply to the whole walk.
        let fix_active = spacing_fix_active(tip.height, params, self.network);
        let interleave = interleave_factor(fix_active);
        let spacing = params.pow_target_spacing;
        let pow_limit = params.pow_limit;

        let past_algo_blocks = PAST_ALGO_FAST_BLOCKS * interleave as u64;
        let mut past_blocks = if fix_active {
            DAILY_WINDOW
        } else {
            PAST_FAST_BLOCKS * interleave as u64 * STABILIZATION_FACTOR
        };

        if tip.height < past_blocks {
            if tip.height < past_algo_blocks {
                trace!(height = tip.height, "Bootstrap window, using pow limit");
                return Ok(params.pow_limit_compact());
            }
            past_blocks = tip.height;
        }

        let algo = algo_tag(candidate.version);

        let mut cursor = *tip;
        let mut chain = Series::start(tip);
        let mut chain_fast = chain;
        let mut algo_series = Series::start(tip);
        let mut algo_fast = algo_series;

        while chain.count < past_blocks && algo_series.count < past_algo_blocks {
            let target = cursor.bits.to_target()
                / U256::from(algo_efficiency(cursor.version, cursor.height));

            if algo_tag(cursor.version) == algo {
                algo_series.push(&cursor, target);
                if algo_series.count <= PAST_ALGO_FAST_BLOCKS {
                    algo_fast = algo_series;
                }
            }

            chain.push(&cursor, target);
            if chain.count <= PAST_FAST_BLOCKS {
                chain_fast = chain;
            }

            if chain.count != past_blocks {
                cursor = self
                    .chain
                    .previous(&cursor)
                    .ok_or(PowError::AncestorMissing {
                        height: cursor.height,
                    })?;
            }
        }

        // The aggregate elapsed time runs to wherever the walk stopped,
        // which may be one block past the last one averaged.
        if tip.time - chain_fast.earliest.time < spacing / 2 {
            chain = chain_fast;
            cursor = chain_fast.earliest;
        }

        trace!(
            height = tip.height + 1,
            blocks = chain.count,
            algo_blocks = algo_series.count,
            average = %chain.average,
            "DGW window"
        );

        let mut target = if algo_series.count > 1 {
            if tip.time - algo_fast.earliest.time < spacing * interleave / 2 {
                algo_series = algo_fast;
            }
            let expected = algo_series.count as i64 * spacing * interleave;
            scale_by_timespan(
                algo_series.average,
                tip.time - algo_series.earliest.time,
                expected,
            )
        } else {
            pow_limit
        };

        let expected = chain.count as i64 * spacing;
        target = scale_by_timespan(target, tip.time - cursor.time, expected);

        let next_height = tip.height + 1;
        let efficiency = U256::from(algo_efficiency(candidate.version, next_height));
        target = if pow_limit / efficiency > target {
            arith::mul(target, efficiency)
        } else {
            pow_limit
        };

        let force = handbrake_force(candidate.version, next_height, params, self.network);
        target = apply_handbrake(target, force, pow_limit);

        Ok(CompactTarget::from_target(target))
    }
}
