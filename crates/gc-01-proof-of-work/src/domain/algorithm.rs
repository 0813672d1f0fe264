//! Mining algorithms and their header version tags.
//!
//! Each header carries its hashing algorithm in `version & ALGO_VERSION_MASK`.
//! Blocks from different algorithms share one chain and one difficulty
//! scale, normalised by a per-algorithm efficiency divisor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bits of the header version that select the hashing algorithm.
pub const ALGO_VERSION_MASK: i32 = 0x0000_ff00;

/// Number of algorithms that may produce blocks concurrently.
pub const ALGO_ACTIVE_COUNT: i64 = 2;

/// Supported proof-of-work hashing algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// The chain's original algorithm.
    TimeTravel,
    /// X16R, added alongside TimeTravel.
    X16R,
}

impl Algorithm {
    /// All known algorithms.
    pub const ALL: [Algorithm; 2] = [Algorithm::TimeTravel, Algorithm::X16R];

    /// Version tag for this algorithm (already masked).
    pub const fn version_tag(self) -> i32 {
        match self {
            Algorithm::TimeTravel => 0x0000,
            Algorithm::X16R => 0x0100,
        }
    }

    /// Algorithm encoded in a header version, if known.
    pub fn from_version(version: i32) -> Option<Self> {
        let tag = algo_tag(version);
        Self::ALL.into_iter().find(|a| a.version_tag() == tag)
    }

    /// Normalisation divisor placing this algorithm's targets on the shared
    /// scale. Every algorithm currently weighs 1.
    pub fn efficiency(self, _height: u64) -> u64 {
        match self {
            Algorithm::TimeTravel => 1,
            Algorithm::X16R => 1,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::TimeTravel => f.write_str("timetravel"),
            Algorithm::X16R => f.write_str("x16r"),
        }
    }
}

/// Masked algorithm bits of a header version.
#[inline]
pub fn algo_tag(version: i32) -> i32 {
    version & ALGO_VERSION_MASK
}

/// Efficiency divisor for a header version. Unknown tags weigh 1.
pub fn algo_efficiency(version: i32, height: u64) -> u64 {
    Algorithm::from_version(version).map_or(1, |a| a.efficiency(height))
}
