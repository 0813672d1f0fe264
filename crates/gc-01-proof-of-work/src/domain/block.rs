//! Chain entries consumed by the retargeter.

use super::compact::CompactTarget;
use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Consensus view of an accepted block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// Block hash.
    pub hash: Hash,
    /// Hash of the parent, `None` for genesis.
    pub prev_hash: Option<Hash>,
    /// Distance from genesis.
    pub height: u64,
    /// Header version, carrying the algorithm tag.
    pub version: i32,
    /// Header timestamp (Unix seconds).
    pub time: i64,
    /// Target the block was mined against.
    pub bits: CompactTarget,
}

/// The fields of a not-yet-accepted header that retargeting depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHeader {
    /// Header version, carrying the algorithm tag.
    pub version: i32,
    /// Header timestamp (Unix seconds).
    pub time: i64,
}
