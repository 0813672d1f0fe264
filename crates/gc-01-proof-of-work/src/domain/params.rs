//! Chain Consensus Parameters
//!
//! Immutable per-network constants. Built once at startup and shared by
//! reference; nothing mutates them afterwards.

use super::algorithm::Algorithm;
use super::compact::CompactTarget;
use super::errors::{PowError, PowResult};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network a node runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    Regtest,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        })
    }
}

impl FromStr for Network {
    type Err = PowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(PowError::InvalidParams(format!("unknown network '{other}'"))),
        }
    }
}

/// Fixed braking force applied to an algorithm past a height, regardless of
/// network parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmRetirement {
    pub algorithm: Algorithm,
    /// Retirement applies to heights strictly above this.
    pub after_height: u64,
    pub force: u32,
}

/// Consensus parameters for one network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub network: Network,

    /// Easiest permitted target.
    pub pow_limit: U256,

    /// Nominal seconds between blocks.
    pub pow_target_spacing: i64,

    /// Seconds covered by one interval retarget.
    pub pow_target_timespan: i64,

    /// Height from which the spacing-fix constants apply, unless overridden
    /// at runtime.
    pub pow_target_timespan_fix_height: i64,

    /// Test networks may mine minimum-difficulty blocks after a stall.
    pub pow_allow_min_difficulty_blocks: bool,

    /// Every block reuses its parent's target.
    pub pow_no_retargeting: bool,

    /// Interval retarget lower bound is `timespan / max_adjust_down`.
    #[serde(default = "default_adjust")]
    pub retarget_max_adjust_down: i64,

    /// Interval retarget upper bound is `timespan * max_adjust_up`.
    #[serde(default = "default_adjust")]
    pub retarget_max_adjust_up: i64,

    #[serde(default)]
    pub retired_algorithms: Vec<AlgorithmRetirement>,
}

fn default_adjust() -> i64 {
    4
}

/// Height after which TimeTravel blocks are braked out of existence.
pub const TIMETRAVEL_RETIREMENT_HEIGHT: u64 = 97_610;

/// Force large enough that no TimeTravel block can meet its target.
pub const TIMETRAVEL_RETIREMENT_FORCE: u32 = 4_070_908_800;

fn timetravel_retirement() -> Vec<AlgorithmRetirement> {
    vec![AlgorithmRetirement {
        algorithm: Algorithm::TimeTravel,
        after_height: TIMETRAVEL_RETIREMENT_HEIGHT,
        force: TIMETRAVEL_RETIREMENT_FORCE,
    }]
}

impl ChainParams {
    /// Production network.
    pub fn main() -> Self {
        Self {
            network: Network::Main,
            pow_limit: U256::MAX >> 20,
            pow_target_spacing: 2 * 60,
            pow_target_timespan: 2 * 60,
            pow_target_timespan_fix_height: 105_000,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            retarget_max_adjust_down: 4,
            retarget_max_adjust_up: 4,
            retired_algorithms: timetravel_retirement(),
        }
    }

    /// Public test network.
    pub fn testnet() -> Self {
        Self {
            network: Network::Test,
            ..Self::main()
        }
    }

    /// Local regression-test network.
    pub fn regtest() -> Self {
        Self {
            network: Network::Regtest,
            pow_limit: U256::MAX >> 1,
            pow_target_spacing: 150,
            pow_target_timespan: 150,
            pow_target_timespan_fix_height: 1_000,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            retarget_max_adjust_down: 4,
            retarget_max_adjust_up: 4,
            retired_algorithms: Vec::new(),
        }
    }

    /// Preset for `network`.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::main(),
            Network::Test => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Blocks between interval retargets.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// `pow_limit` in compact form.
    pub fn pow_limit_compact(&self) -> CompactTarget {
        CompactTarget::from_target(self.pow_limit)
    }

    /// Retirement rule for `algorithm`, if any.
    pub fn retirement(&self, algorithm: Algorithm) -> Option<&AlgorithmRetirement> {
        self.retired_algorithms
            .iter()
            .find(|r| r.algorithm == algorithm)
    }

    /// Reject parameter sets that would divide by zero or never retarget.
    pub fn validate(&self) -> PowResult<()> {
        if self.pow_limit.is_zero() {
            return Err(PowError::InvalidParams("pow_limit must be non-zero".into()));
        }
        if self.pow_target_spacing <= 0 {
            return Err(PowError::InvalidParams(
                "pow_target_spacing must be positive".into(),
            ));
        }
        if self.pow_target_timespan < self.pow_target_spacing {
            return Err(PowError::InvalidParams(
                "pow_target_timespan must be at least one spacing".into(),
            ));
        }
        if self.retarget_max_adjust_down <= 0 || self.retarget_max_adjust_up <= 0 {
            return Err(PowError::InvalidParams(
                "retarget adjustment ratios must be positive".into(),
            ));
        }
        if self.pow_target_timespan / self.retarget_max_adjust_down <= 0 {
            return Err(PowError::InvalidParams(
                "retarget lower bound rounds to zero".into(),
            ));
        }
        if self.retired_algorithms.iter().any(|r| r.force == 0) {
            return Err(PowError::InvalidParams(
                "retirement force must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
